//! Effect player - layered frame composition
//!
//! Every tick reads the base sequence and composes the auxiliary layers on
//! top of it, in this order:
//!
//! 1. underlay, merged below the base
//! 2. overlay, merged above the result
//! 3. overwrite, replacing the result entirely
//!
//! Underlay and overlay are read even when an overwrite is playing, so they
//! stay in phase with the base sequence.

use fastrand::Rng;
use thiserror::Error;

use crate::Frame;
use crate::color::OFF;
use crate::composite::merge;
use crate::intent::PlayerIntent;
use crate::script::{FrameScript, ScriptError};
use crate::sequence::{FramePlayer, PlaybackMode};

/// Default frame rate of an effect
pub const DEFAULT_EFFECT_FPS: u32 = 5;

/// Default output brightness
pub const DEFAULT_BRIGHTNESS: f32 = 0.2;

/// Invalid effect configuration
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("frame rate must be positive")]
    InvalidFps,
    #[error("brightness {0} is outside 0.0..=1.0")]
    InvalidBrightness(f32),
}

/// Effect setup failure
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum EffectError {
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Configuration of an effect
#[derive(Debug, Clone)]
pub struct EffectConfig<const N: usize> {
    /// Frames per second
    pub fps: u32,
    /// Output brightness (0.0-1.0), passed through to the output driver
    pub brightness: f32,
    /// Reverse every frame of every layer
    pub mirrored: bool,
    /// Layer merged above the base sequence
    pub overlay: Option<FrameScript<N>>,
    /// Layer merged below the base sequence
    pub underlay: Option<FrameScript<N>>,
    /// Seed for action resolution. Random when unset.
    pub seed: Option<u64>,
}

impl<const N: usize> Default for EffectConfig<N> {
    fn default() -> Self {
        Self {
            fps: DEFAULT_EFFECT_FPS,
            brightness: DEFAULT_BRIGHTNESS,
            mirrored: false,
            overlay: None,
            underlay: None,
            seed: None,
        }
    }
}

/// Check that fps and brightness are in range
fn validate_config<const N: usize>(config: &EffectConfig<N>) -> Result<(), ConfigError> {
    if config.fps == 0 {
        return Err(ConfigError::InvalidFps);
    }
    check_brightness(config.brightness)
}

fn check_brightness(brightness: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&brightness) {
        Ok(())
    } else {
        Err(ConfigError::InvalidBrightness(brightness))
    }
}

/// Playback state of an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No frame was produced yet
    Idle,
    Running,
}

/// Auxiliary layers of an effect
///
/// Adding a layer replaces the previous one in that slot. An overwrite
/// that is still playing is abandoned.
#[derive(Debug)]
pub struct Layers<const N: usize> {
    underlay: Option<FramePlayer<N>>,
    overlay: Option<FramePlayer<N>>,
    overwrite: Option<FramePlayer<N>>,
    mirrored: bool,
    rng: Rng,
}

impl<const N: usize> Layers<N> {
    fn new(mirrored: bool, rng: Rng) -> Self {
        Self {
            underlay: None,
            overlay: None,
            overwrite: None,
            mirrored,
            rng,
        }
    }

    fn player(
        &mut self,
        script: FrameScript<N>,
        mode: PlaybackMode,
    ) -> Result<FramePlayer<N>, ScriptError> {
        FramePlayer::new(script, self.mirrored, mode, self.rng.fork())
    }

    /// Replace the running frames with a one-shot sequence
    pub fn add_overwrite(&mut self, script: FrameScript<N>) -> Result<(), ScriptError> {
        self.overwrite = Some(self.player(script, PlaybackMode::Once)?);
        Ok(())
    }

    /// Put a looping sequence under the base frames
    pub fn add_underlay(&mut self, script: FrameScript<N>) -> Result<(), ScriptError> {
        self.underlay = Some(self.player(script, PlaybackMode::Loop)?);
        Ok(())
    }

    /// Put a looping sequence over the base frames
    pub fn add_overlay(&mut self, script: FrameScript<N>) -> Result<(), ScriptError> {
        self.overlay = Some(self.player(script, PlaybackMode::Loop)?);
        Ok(())
    }

    pub fn clear_underlay(&mut self) {
        self.underlay = None;
    }

    pub fn clear_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn clear_overwrite(&mut self) {
        self.overwrite = None;
    }

    pub fn has_underlay(&self) -> bool {
        self.underlay.is_some()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// Check if an overwrite sequence is still playing
    pub fn has_overwrite(&self) -> bool {
        self.overwrite.as_ref().is_some_and(|player| !player.is_empty())
    }

    /// Random source shared with tick hooks
    pub fn rng(&mut self) -> &mut Rng {
        &mut self.rng
    }

    /// Compose the layers around a base frame
    fn compose(&mut self, base: Frame<N>) -> Frame<N> {
        let mut current = base;

        if let Some(under) = read_layer(self.underlay.as_mut()) {
            current = merge(&under, &current);
        }
        if let Some(over) = read_layer(self.overlay.as_mut()) {
            current = merge(&current, &over);
        }
        if let Some(overwrite) = read_layer(self.overwrite.as_mut()) {
            current = overwrite;
        }

        if self.overwrite.as_ref().is_some_and(FramePlayer::is_empty) {
            log::debug!("[Layers.compose] overwrite finished");
            self.overwrite = None;
        }

        current
    }
}

/// Read the next frame of a layer, if it has one
fn read_layer<const N: usize>(layer: Option<&mut FramePlayer<N>>) -> Option<Frame<N>> {
    let player = layer?;
    if player.is_empty() {
        return None;
    }
    player.next_frame().ok()
}

/// Per-tick extension point of an effect
///
/// Called after every composed frame, so changes to the layers show up
/// from the next tick on.
pub trait TickHook<const N: usize> {
    fn after_tick(&mut self, layers: &mut Layers<N>);
}

impl<const N: usize, F> TickHook<N> for F
where
    F: FnMut(&mut Layers<N>),
{
    fn after_tick(&mut self, layers: &mut Layers<N>) {
        self(layers);
    }
}

/// Effect player - composes a base sequence with its layers
pub struct EffectPlayer<const N: usize> {
    base: FramePlayer<N>,
    layers: Layers<N>,
    fps: u32,
    brightness: f32,
    state: PlaybackState,
    hook: Option<Box<dyn TickHook<N>>>,
}

impl<const N: usize> EffectPlayer<N> {
    /// Create an effect from its base script
    pub fn new(script: FrameScript<N>, config: &EffectConfig<N>) -> Result<Self, EffectError> {
        validate_config(config)?;
        if script.is_empty() {
            return Err(ScriptError::Empty.into());
        }

        let mut rng = match config.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        };
        let base = FramePlayer::new(script, config.mirrored, PlaybackMode::Loop, rng.fork())?;
        let mut layers = Layers::new(config.mirrored, rng);
        if let Some(underlay) = &config.underlay {
            layers.add_underlay(underlay.clone())?;
        }
        if let Some(overlay) = &config.overlay {
            layers.add_overlay(overlay.clone())?;
        }

        Ok(Self {
            base,
            layers,
            fps: config.fps,
            brightness: config.brightness,
            state: PlaybackState::Idle,
            hook: None,
        })
    }

    /// Attach a hook called after every tick
    #[must_use]
    pub fn with_hook(mut self, hook: impl TickHook<N> + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Produce the frame for this tick
    pub fn tick(&mut self) -> Frame<N> {
        self.state = PlaybackState::Running;

        debug_assert!(!self.base.is_empty(), "base sequence is empty");
        let base = self.base.next_frame().unwrap_or([OFF; N]);
        let frame = self.layers.compose(base);

        if let Some(hook) = self.hook.as_mut() {
            hook.after_tick(&mut self.layers);
        }

        frame
    }

    /// Apply a queued change
    pub fn apply_intent(&mut self, intent: PlayerIntent<N>) -> Result<(), EffectError> {
        match intent {
            PlayerIntent::Overwrite(script) => self.add_overwrite(script)?,
            PlayerIntent::Underlay(Some(script)) => self.add_underlay(script)?,
            PlayerIntent::Underlay(None) => self.layers.clear_underlay(),
            PlayerIntent::Overlay(Some(script)) => self.add_overlay(script)?,
            PlayerIntent::Overlay(None) => self.layers.clear_overlay(),
            PlayerIntent::Brightness(brightness) => self.set_brightness(brightness)?,
        }
        Ok(())
    }

    pub fn add_overwrite(&mut self, script: FrameScript<N>) -> Result<(), ScriptError> {
        self.layers.add_overwrite(script)
    }

    pub fn add_underlay(&mut self, script: FrameScript<N>) -> Result<(), ScriptError> {
        self.layers.add_underlay(script)
    }

    pub fn add_overlay(&mut self, script: FrameScript<N>) -> Result<(), ScriptError> {
        self.layers.add_overlay(script)
    }

    pub fn layers(&self) -> &Layers<N> {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut Layers<N> {
        &mut self.layers
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Set output brightness (0.0-1.0)
    pub fn set_brightness(&mut self, brightness: f32) -> Result<(), ConfigError> {
        check_brightness(brightness)?;
        self.brightness = brightness;
        Ok(())
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }
}
