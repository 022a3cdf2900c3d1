//! Gamma correction for LED output
//!
//! LEDs respond linearly to PWM duty while the eye does not, so sprite
//! colors look washed out without a correction curve.

use crate::color::Rgb;

/// Default gamma for WS2812-class LEDs
pub const DEFAULT_GAMMA: f32 = 2.6;

/// Precomputed 8-bit gamma curve
///
/// `output = 255 * (input / 255) ^ gamma`
#[derive(Debug, Clone)]
pub struct GammaLut {
    table: [u8; 256],
}

impl GammaLut {
    /// Build a lookup table for the given gamma
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn new(gamma: f32) -> Self {
        let mut table = [0u8; 256];
        for (input, slot) in table.iter_mut().enumerate() {
            let normalized = input as f32 / 255.0;
            let corrected = libm::roundf(255.0 * libm::powf(normalized, gamma));
            *slot = corrected.clamp(0.0, 255.0) as u8;
        }
        Self { table }
    }

    /// Correct a single channel value
    #[inline]
    pub fn apply(&self, value: u8) -> u8 {
        self.table[usize::from(value)]
    }

    /// Correct every channel of a color
    #[inline]
    pub fn apply_rgb(&self, color: Rgb) -> Rgb {
        Rgb {
            r: self.apply(color.r),
            g: self.apply(color.g),
            b: self.apply(color.b),
        }
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new(DEFAULT_GAMMA)
    }
}
