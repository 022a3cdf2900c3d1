mod utils;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use utils::{hsv2rgb, mirror_frame, rgb2hsv, shift_hsv};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Transparency key used by the compositor.
///
/// A layer pixel equal to `OFF` never covers the pixel below it.
pub const OFF: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Channel of an HSV color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsvChannel {
    Hue,
    Saturation,
    Value,
}
