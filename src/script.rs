//! Frame scripts and the script compiler
//!
//! A script is an ordered list of frames interleaved with [`Action`]s.
//! Compiling it produces the flat, action-free list of frames that is
//! actually played.

use fastrand::Rng;
use thiserror::Error;

use crate::Frame;
use crate::action::Action;
use crate::color::{Rgb, mirror_frame};

/// Malformed frame script
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScriptError {
    /// Raw entry is neither a full frame nor a single action
    #[error("invalid frame entry of length {len}, must be 1 or {expected}")]
    InvalidEntry { len: usize, expected: usize },
    /// The first entry is an action, so there is no frame to act on
    #[error("first frame can't be an action frame")]
    LeadingAction,
    /// Action parameters are out of range
    #[error("invalid action {0:?}")]
    InvalidAction(Action),
    /// The script has no entries
    #[error("frame script is empty")]
    Empty,
}

/// Single entry of a frame script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameEntry<const N: usize> {
    /// Frame displayed as is
    Frame(Frame<N>),
    /// Directive expanded by the compiler
    Action(Action),
}

impl<const N: usize> FrameEntry<N> {
    /// Build a frame entry from a raw pixel row
    ///
    /// Fails unless the row holds exactly `N` pixels.
    pub fn from_pixels(pixels: &[Rgb]) -> Result<Self, ScriptError> {
        <Frame<N>>::try_from(pixels)
            .map(Self::Frame)
            .map_err(|_| ScriptError::InvalidEntry {
                len: pixels.len(),
                expected: N,
            })
    }

    pub const fn is_action(&self) -> bool {
        matches!(self, Self::Action(_))
    }

    /// Reverse the pixel order of a frame entry. Actions are unchanged.
    pub fn mirror(&mut self) {
        if let Self::Frame(frame) = self {
            mirror_frame(frame);
        }
    }
}

impl<const N: usize> From<Frame<N>> for FrameEntry<N> {
    fn from(frame: Frame<N>) -> Self {
        Self::Frame(frame)
    }
}

impl<const N: usize> From<Action> for FrameEntry<N> {
    fn from(action: Action) -> Self {
        Self::Action(action)
    }
}

/// Validated frame script
///
/// Scripts without actions are static and compile to themselves. Scripts
/// with actions are dynamic: each compilation may produce a different
/// sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameScript<const N: usize> {
    entries: Vec<FrameEntry<N>>,
}

impl<const N: usize> FrameScript<N> {
    /// Create a script from entries
    ///
    /// Structural errors are reported here, so a constructed script always
    /// compiles.
    pub fn new(entries: Vec<FrameEntry<N>>) -> Result<Self, ScriptError> {
        validate(&entries)?;
        Ok(Self { entries })
    }

    /// Create a static script from frames
    pub fn from_frames(frames: impl IntoIterator<Item = Frame<N>>) -> Self {
        Self {
            entries: frames.into_iter().map(FrameEntry::Frame).collect(),
        }
    }

    /// Create a static script from raw pixel rows
    pub fn from_rows<R: AsRef<[Rgb]>>(rows: &[R]) -> Result<Self, ScriptError> {
        let entries = rows
            .iter()
            .map(|row| FrameEntry::from_pixels(row.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[FrameEntry<N>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if the script contains actions
    pub fn is_dynamic(&self) -> bool {
        self.entries.iter().any(FrameEntry::is_action)
    }

    /// Reverse the pixel order of every frame
    pub fn mirror(&mut self) {
        for entry in &mut self.entries {
            entry.mirror();
        }
    }

    /// Compile the script into a playable sequence
    pub fn compile(&self, rng: &mut Rng) -> Result<Vec<Frame<N>>, ScriptError> {
        compile(&self.entries, rng)
    }
}

/// Check script structure without resolving actions
fn validate<const N: usize>(entries: &[FrameEntry<N>]) -> Result<(), ScriptError> {
    if matches!(entries.first(), Some(FrameEntry::Action(_))) {
        return Err(ScriptError::LeadingAction);
    }
    for entry in entries {
        if let FrameEntry::Action(action) = entry {
            if !action.is_valid() {
                return Err(ScriptError::InvalidAction(*action));
            }
        }
    }
    Ok(())
}

/// Compile script entries into a flat frame sequence
///
/// Frames are copied verbatim. Actions expand against the last frame
/// already placed in the output, not the last raw entry.
pub fn compile<const N: usize>(
    entries: &[FrameEntry<N>],
    rng: &mut Rng,
) -> Result<Vec<Frame<N>>, ScriptError> {
    let mut output = Vec::with_capacity(entries.len());
    for entry in entries {
        match entry {
            FrameEntry::Frame(frame) => output.push(*frame),
            FrameEntry::Action(action) => {
                if !action.is_valid() {
                    return Err(ScriptError::InvalidAction(*action));
                }
                let Some(previous) = output.last().copied() else {
                    return Err(ScriptError::LeadingAction);
                };
                action.resolve(&previous, rng, &mut output);
            }
        }
    }
    Ok(output)
}
