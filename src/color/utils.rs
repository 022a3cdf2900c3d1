pub use smart_leds::hsv::hsv2rgb;

use crate::color::{Hsv, HsvChannel, Rgb};

/// Reverse the pixel order of a frame end-to-end
pub fn mirror_frame(leds: &mut [Rgb]) {
    leds.reverse();
}

/// Convert RGB to HSV on the 0-255 scale of `smart_leds::hsv::Hsv`.
///
/// Inverse of [`hsv2rgb`] up to rounding.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rgb2hsv(rgb: Rgb) -> Hsv {
    let Rgb { r, g, b } = rgb;
    let max = r.max(g).max(b);
    let delta = i32::from(max - r.min(g).min(b));
    if delta == 0 {
        return Hsv {
            hue: 0,
            sat: 0,
            val: max,
        };
    }

    // Same sector origins as `hsv2rgb`: red 0, green 85, blue 170
    let (sector, rising, falling) = if max == r {
        (0, g, b)
    } else if max == g {
        (85, b, r)
    } else {
        (170, r, g)
    };
    let offset = 43 * (i32::from(rising) - i32::from(falling)) / delta;

    Hsv {
        hue: (sector + offset).rem_euclid(256) as u8,
        sat: (delta * 255 / i32::from(max)) as u8,
        val: max,
    }
}

/// Shift one HSV channel of a color by `step`.
///
/// Hue wraps around the color circle, saturation and value saturate at
/// the 0-255 bounds.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn shift_hsv(color: Rgb, channel: HsvChannel, step: i16) -> Rgb {
    let mut hsv = rgb2hsv(color);
    match channel {
        HsvChannel::Hue => {
            hsv.hue = (i32::from(hsv.hue) + i32::from(step)).rem_euclid(256) as u8;
        }
        HsvChannel::Saturation => {
            hsv.sat = (i32::from(hsv.sat) + i32::from(step)).clamp(0, 255) as u8;
        }
        HsvChannel::Value => {
            hsv.val = (i32::from(hsv.val) + i32::from(step)).clamp(0, 255) as u8;
        }
    }
    hsv2rgb(hsv)
}
