//! Frame scheduling and timing utilities.
//!
//! [`FrameScheduler::tick`] is portable: the caller passes the current time
//! and sleeps for the returned duration. [`FrameScheduler::run`] is the
//! blocking loop for hosted targets.

use embassy_time::{Duration, Instant};

use crate::driver::OutputDriver;
use crate::intent::{IntentProcessor, IntentReceiver};
use crate::player::EffectPlayer;
use crate::signal::StopSignal;

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Duration of one frame at the given rate
#[allow(clippy::cast_lossless)]
pub const fn frame_duration(fps: u32) -> Duration {
    let fps = if fps == 0 { 1 } else { fps as u64 };
    Duration::from_micros(1_000_000 / fps)
}

/// Fixed-rate playback loop
///
/// Each tick composes one frame, writes all of it to the output and then
/// reports how long to wait before the next one. If the loop falls more
/// than two frames behind, the backlog is skipped instead of replayed.
pub struct FrameScheduler<'a, O: OutputDriver, const N: usize, const INTENT_CHANNEL_SIZE: usize> {
    output: O,
    player: EffectPlayer<N>,
    intents: Option<IntentProcessor<'a, N, INTENT_CHANNEL_SIZE>>,
    next_frame: Instant,
    frame_duration: Duration,
    frames: u64,
}

impl<'a, O: OutputDriver, const N: usize, const INTENT_CHANNEL_SIZE: usize>
    FrameScheduler<'a, O, N, INTENT_CHANNEL_SIZE>
{
    /// Create a scheduler running at the effect's frame rate
    pub fn new(player: EffectPlayer<N>, driver: O) -> Self {
        let frame_duration = frame_duration(player.fps());
        Self {
            output: driver,
            player,
            intents: None,
            next_frame: Instant::from_millis(0),
            frame_duration,
            frames: 0,
        }
    }

    /// Apply intents from a channel between ticks
    #[must_use]
    pub fn with_intents(mut self, intents: IntentReceiver<'a, N, INTENT_CHANNEL_SIZE>) -> Self {
        self.intents = Some(IntentProcessor::new(intents));
        self
    }

    /// Process one frame and return timing information.
    ///
    /// Pending intents are applied first, then the composed frame is
    /// written to the output in full.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        if let Some(intents) = self.intents.as_mut() {
            intents.process_pending(&mut self.player);
        }

        let frame = self.player.tick();
        self.output.write(&frame, self.player.brightness());
        self.frames += 1;

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_ticks(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Play until `stop` is raised
    ///
    /// The signal is checked between frames only, so the output always
    /// holds a complete frame when this returns.
    pub fn run(&mut self, stop: &StopSignal) {
        let started = std::time::Instant::now();
        log::info!(
            "[FrameScheduler.run] playing at {} fps",
            self.player.fps()
        );
        while !stop.is_raised() {
            let elapsed = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
            let result = self.tick(Instant::from_micros(elapsed));
            if stop.is_raised() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_micros(
                result.sleep_duration.as_micros(),
            ));
        }
        log::info!("[FrameScheduler.run] stopped after {} frames", self.frames);
    }

    /// Number of frames written so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn player(&self) -> &EffectPlayer<N> {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut EffectPlayer<N> {
        &mut self.player
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }
}
