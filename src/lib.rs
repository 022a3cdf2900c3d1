//! Scripted frame animations for short addressable LED strips.
//!
//! An effect is a [`FrameScript`]: frames interleaved with [`Action`]s. The
//! script is compiled into a flat frame sequence, played by a
//! [`FramePlayer`], layered by an [`EffectPlayer`] and written to an
//! [`OutputDriver`] at a fixed rate by the [`FrameScheduler`].

pub mod action;
pub mod color;
pub mod composite;
pub mod driver;
pub mod frame_scheduler;
pub mod gamma;
pub mod intent;
pub mod player;
pub mod script;
pub mod sequence;
pub mod signal;
pub mod sprite;

pub use action::Action;
pub use color::{OFF, Rgb};
pub use composite::{merge, merge_into};
pub use driver::{OutputDriver, SmartLedsDriver};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use gamma::{DEFAULT_GAMMA, GammaLut};
pub use intent::{IntentChannel, IntentProcessor, IntentReceiver, IntentSender, PlayerIntent};
pub use player::{
    ConfigError, EffectConfig, EffectError, EffectPlayer, Layers, PlaybackState, TickHook,
};
pub use script::{FrameEntry, FrameScript, ScriptError, compile};
pub use sequence::{FramePlayer, PlaybackMode, PlayerError};
pub use signal::StopSignal;
pub use sprite::{DecodeError, SpriteMode};

pub use embassy_time::{Duration, Instant};
pub use fastrand::Rng;

/// LED count of a Pimoroni Blinkt! strip
pub const BLINKT_LED_COUNT: usize = 8;

/// One color per LED
pub type Frame<const N: usize> = [Rgb; N];
