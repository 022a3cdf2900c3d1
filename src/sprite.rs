//! Sprite decoding - images to frame sequences
//!
//! Two layouts are supported, chosen by the image shape:
//!
//! - grid: an image exactly `N` pixels wide, one frame per row, top to bottom
//! - scroll: a single row at least `N` pixels wide, played as a window of
//!   `N` pixels sliding one pixel per frame from left to right
//!
//! Opening image files is left to the caller.

use image::{DynamicImage, RgbImage};
use thiserror::Error;

use crate::Frame;
use crate::color::Rgb;
use crate::gamma::GammaLut;
use crate::script::FrameScript;

/// Image shape incompatible with the strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error(
        "sprite is {width}x{height}: expected rows of {expected} pixels, or a single row of at least {expected}"
    )]
    WidthMismatch {
        width: u32,
        height: u32,
        expected: usize,
    },
    #[error("sprite image is empty")]
    EmptyImage,
}

/// Frame layout of a sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteMode {
    /// One frame per image row
    Grid,
    /// Sliding window over a single row
    Scroll,
}

/// Pick the sprite layout for an image of the given size
#[allow(clippy::cast_possible_truncation)]
pub fn sprite_mode<const N: usize>(width: u32, height: u32) -> Result<SpriteMode, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage);
    }
    let mismatch = DecodeError::WidthMismatch {
        width,
        height,
        expected: N,
    };
    let width = width as usize;
    if N == 0 {
        return Err(mismatch);
    }
    if height == 1 {
        if width >= N { Ok(SpriteMode::Scroll) } else { Err(mismatch) }
    } else if width == N {
        Ok(SpriteMode::Grid)
    } else {
        Err(mismatch)
    }
}

/// Decode an RGB image into frames
///
/// With `gamma` set, the correction curve is applied to the whole image
/// before it is cut into frames.
pub fn decode<const N: usize>(
    image: &RgbImage,
    gamma: Option<f32>,
) -> Result<Vec<Frame<N>>, DecodeError> {
    let mode = sprite_mode::<N>(image.width(), image.height())?;

    let mut pixels: Vec<Rgb> = image
        .pixels()
        .map(|pixel| {
            let [r, g, b] = pixel.0;
            Rgb { r, g, b }
        })
        .collect();
    if let Some(gamma) = gamma {
        let lut = GammaLut::new(gamma);
        for pixel in &mut pixels {
            *pixel = lut.apply_rgb(*pixel);
        }
    }

    let frames: Vec<Frame<N>> = match mode {
        SpriteMode::Grid => pixels
            .chunks_exact(N)
            .filter_map(|row| row.try_into().ok())
            .collect(),
        SpriteMode::Scroll => pixels
            .windows(N)
            .filter_map(|window| window.try_into().ok())
            .collect(),
    };
    log::debug!(
        "[sprite.decode] {}x{} {:?} sprite -> {} frames",
        image.width(),
        image.height(),
        mode,
        frames.len()
    );
    Ok(frames)
}

/// Decode any image, dropping alpha
pub fn decode_image<const N: usize>(
    image: &DynamicImage,
    gamma: Option<f32>,
) -> Result<Vec<Frame<N>>, DecodeError> {
    decode(&image.to_rgb8(), gamma)
}

/// Decode an image into a static frame script
pub fn sprite_script<const N: usize>(
    image: &DynamicImage,
    gamma: Option<f32>,
) -> Result<FrameScript<N>, DecodeError> {
    decode_image(image, gamma).map(FrameScript::from_frames)
}
