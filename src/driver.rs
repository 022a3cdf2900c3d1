//! Output drivers
//!
//! Implement [`OutputDriver`] to support different hardware platforms.
//! The scheduler writes one complete frame per tick.

use core::fmt::Debug;

use smart_leds::SmartLedsWrite;

use crate::color::{OFF, Rgb};

/// Abstract LED driver trait
pub trait OutputDriver {
    /// Stage a single pixel
    fn set_pixel(&mut self, index: usize, color: Rgb, brightness: f32);

    /// Display the staged pixels
    fn show(&mut self);

    /// Stage every pixel of a frame, then show it once
    fn write(&mut self, frame: &[Rgb], brightness: f32) {
        for (index, color) in frame.iter().enumerate() {
            self.set_pixel(index, *color, brightness);
        }
        self.show();
    }
}

/// Convert a 0.0-1.0 brightness to the 0-255 scale used by `smart-leds`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn brightness8(brightness: f32) -> u8 {
    libm::roundf(brightness.clamp(0.0, 1.0) * 255.0) as u8
}

/// Driver for any `smart-leds` writer (WS2812, APA102, ...)
pub struct SmartLedsDriver<W, const N: usize> {
    writer: W,
    pixels: [Rgb; N],
    brightness: u8,
}

impl<W, const N: usize> SmartLedsDriver<W, N>
where
    W: SmartLedsWrite<Color = Rgb>,
{
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            pixels: [OFF; N],
            brightness: 255,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W, const N: usize> OutputDriver for SmartLedsDriver<W, N>
where
    W: SmartLedsWrite<Color = Rgb>,
    W::Error: Debug,
{
    fn set_pixel(&mut self, index: usize, color: Rgb, brightness: f32) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
        // Strip brightness is global, the last staged value wins
        self.brightness = brightness8(brightness);
    }

    fn show(&mut self) {
        let pixels = smart_leds::brightness(self.pixels.iter().copied(), self.brightness);
        if let Err(err) = self.writer.write(pixels) {
            log::warn!("[SmartLedsDriver.show] write failed: {err:?}");
        }
    }
}
