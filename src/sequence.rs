//! Frame sequence playback
//!
//! A [`FramePlayer`] keeps two independent buffers: the source script and
//! the compiled sequence derived from it. The sequence is rebuilt only by
//! [`FramePlayer::recompile`], which runs at construction and whenever a
//! dynamic looping sequence wraps around.

use std::collections::VecDeque;

use fastrand::Rng;
use thiserror::Error;

use crate::Frame;
use crate::color::mirror_frame;
use crate::script::{FrameEntry, FrameScript, ScriptError};

/// Frame sequence read failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// The sequence has no frames left
    #[error("frame sequence is exhausted")]
    Exhausted,
}

/// How a sequence behaves once its last frame was read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackMode {
    /// Start over from the first frame
    #[default]
    Loop,
    /// Play every frame once, then stay empty
    Once,
}

/// Cursor over a compiled frame sequence
#[derive(Debug, Clone)]
pub struct FramePlayer<const N: usize> {
    script: FrameScript<N>,
    frames: VecDeque<Frame<N>>,
    cursor: usize,
    mode: PlaybackMode,
    dynamic: bool,
    mirrored: bool,
    rng: Rng,
}

impl<const N: usize> FramePlayer<N> {
    /// Create a player for a script
    ///
    /// Mirroring is applied after compilation, to both the script and the
    /// compiled sequence.
    pub fn new(
        script: FrameScript<N>,
        mirrored: bool,
        mode: PlaybackMode,
        rng: Rng,
    ) -> Result<Self, ScriptError> {
        let dynamic = script.is_dynamic();
        let frames = if dynamic {
            VecDeque::new()
        } else {
            frames_of_static(&script)
        };
        let mut player = Self {
            frames,
            script,
            cursor: 0,
            mode,
            dynamic,
            mirrored: false,
            rng,
        };
        if player.dynamic {
            player.recompile()?;
        }
        if mirrored {
            player.mirror();
        }
        Ok(player)
    }

    /// Create a looping player
    pub fn looping(script: FrameScript<N>, mirrored: bool, rng: Rng) -> Result<Self, ScriptError> {
        Self::new(script, mirrored, PlaybackMode::Loop, rng)
    }

    /// Create a one-shot player
    pub fn once(script: FrameScript<N>, mirrored: bool, rng: Rng) -> Result<Self, ScriptError> {
        Self::new(script, mirrored, PlaybackMode::Once, rng)
    }

    /// Create a player with no frames
    pub fn empty(mode: PlaybackMode) -> Self {
        Self {
            script: FrameScript::default(),
            frames: VecDeque::new(),
            cursor: 0,
            mode,
            dynamic: false,
            mirrored: false,
            rng: Rng::with_seed(0),
        }
    }

    /// Read the current frame and advance
    ///
    /// Callers should check [`FramePlayer::is_empty`] first; the error is
    /// only returned for empty players.
    pub fn next_frame(&mut self) -> Result<Frame<N>, PlayerError> {
        match self.mode {
            PlaybackMode::Loop => {
                let frame = *self.frames.get(self.cursor).ok_or(PlayerError::Exhausted)?;
                self.advance();
                Ok(frame)
            }
            PlaybackMode::Once => self.frames.pop_front().ok_or(PlayerError::Exhausted),
        }
    }

    fn advance(&mut self) {
        self.cursor += 1;
        if self.cursor < self.frames.len() {
            return;
        }
        if self.dynamic {
            if let Err(err) = self.recompile() {
                log::warn!("[FramePlayer.advance] keeping previous sequence: {err}");
            }
        }
        self.cursor = 0;
    }

    /// Rebuild the compiled sequence from the script
    ///
    /// The script is stored mirrored when the player is, so the new
    /// sequence keeps the current orientation.
    pub fn recompile(&mut self) -> Result<(), ScriptError> {
        let frames = self.script.compile(&mut self.rng)?;
        log::debug!(
            "[FramePlayer.recompile] {} entries -> {} frames",
            self.script.len(),
            frames.len()
        );
        self.frames = frames.into();
        self.cursor = 0;
        Ok(())
    }

    /// Reverse the pixel order of the script and the compiled sequence
    pub fn mirror(&mut self) {
        self.script.mirror();
        for frame in &mut self.frames {
            mirror_frame(frame);
        }
        self.mirrored = !self.mirrored;
    }

    /// Check if there is nothing left to read
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of frames left in the compiled sequence
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Position of the next frame to be read in looping mode
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Compiled frames in playback order
    pub fn frames(&self) -> impl Iterator<Item = &Frame<N>> {
        self.frames.iter()
    }

    pub fn script(&self) -> &FrameScript<N> {
        &self.script
    }
}

/// Frames of a static script, in order. Actions are skipped.
fn frames_of_static<const N: usize>(script: &FrameScript<N>) -> VecDeque<Frame<N>> {
    script
        .entries()
        .iter()
        .filter_map(|entry| match entry {
            FrameEntry::Frame(frame) => Some(*frame),
            FrameEntry::Action(_) => None,
        })
        .collect()
}
