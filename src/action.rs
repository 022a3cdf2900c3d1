//! Control directives embedded in frame scripts
//!
//! An action takes the place of a frame and expands into zero or more
//! frames derived from the last frame already emitted by the compiler.

use fastrand::Rng;

use crate::Frame;
use crate::color::{HsvChannel, OFF, shift_hsv};

/// Frame script directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Hold the previous frame for a random number of extra frames
    /// in `min..=max`.
    VariableDelay { min: u16, max: u16 },
    /// Emit `repeat` frames, each one shifting the hue of every lit pixel
    /// of the frame before it by `step`.
    ShiftHue { step: i16, repeat: u16 },
    /// Like [`Action::ShiftHue`], for saturation.
    ShiftSaturation { step: i16, repeat: u16 },
    /// Like [`Action::ShiftHue`], for value.
    ShiftValue { step: i16, repeat: u16 },
}

impl Action {
    /// Create a variable delay action
    pub const fn variable_delay(min: u16, max: u16) -> Self {
        Self::VariableDelay { min, max }
    }

    /// Check that the action parameters are consistent
    pub const fn is_valid(&self) -> bool {
        match *self {
            Self::VariableDelay { min, max } => min <= max,
            Self::ShiftHue { .. } | Self::ShiftSaturation { .. } | Self::ShiftValue { .. } => {
                true
            }
        }
    }

    /// Expand the action against the last emitted frame.
    ///
    /// Generated frames are appended to `output`. The action must be valid.
    pub(crate) fn resolve<const N: usize>(
        &self,
        previous: &Frame<N>,
        rng: &mut Rng,
        output: &mut Vec<Frame<N>>,
    ) {
        match *self {
            Self::VariableDelay { min, max } => {
                let count = rng.u16(min..=max);
                output.extend(core::iter::repeat_n(*previous, usize::from(count)));
            }
            Self::ShiftHue { step, repeat } => {
                shift_chain(previous, HsvChannel::Hue, step, repeat, output);
            }
            Self::ShiftSaturation { step, repeat } => {
                shift_chain(previous, HsvChannel::Saturation, step, repeat, output);
            }
            Self::ShiftValue { step, repeat } => {
                shift_chain(previous, HsvChannel::Value, step, repeat, output);
            }
        }
    }
}

/// Emit `repeat` frames, each derived from the one before it
fn shift_chain<const N: usize>(
    previous: &Frame<N>,
    channel: HsvChannel,
    step: i16,
    repeat: u16,
    output: &mut Vec<Frame<N>>,
) {
    let mut frame = *previous;
    for _ in 0..repeat {
        for pixel in &mut frame {
            if *pixel == OFF {
                continue;
            }
            // A lit pixel must never turn into the transparency key
            let shifted = shift_hsv(*pixel, channel, step);
            if shifted != OFF {
                *pixel = shifted;
            }
        }
        output.push(frame);
    }
}
