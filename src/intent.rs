//! Intents - layer changes queued from outside the playback loop
//!
//! A bounded queue built on `critical-section` and `heapless::Deque`.
//! Any context may send; the frame scheduler drains the queue between
//! ticks, so a change never lands in the middle of a frame.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::player::EffectPlayer;
use crate::script::FrameScript;

/// Change requested for a running effect
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerIntent<const N: usize> {
    /// Play a one-shot sequence over everything else
    Overwrite(FrameScript<N>),
    /// Replace the underlay, or remove it with `None`
    Underlay(Option<FrameScript<N>>),
    /// Replace the overlay, or remove it with `None`
    Overlay(Option<FrameScript<N>>),
    /// Set output brightness (0.0-1.0)
    Brightness(f32),
}

/// Error returned when trying to send to a full channel.
#[derive(Debug, Clone, PartialEq)]
pub struct TrySendError<const N: usize>(pub PlayerIntent<N>);

/// Error returned when trying to receive from an empty channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded intent queue, safe to share between threads and interrupts.
pub struct IntentChannel<const N: usize, const SIZE: usize> {
    queue: Mutex<RefCell<Deque<PlayerIntent<N>, SIZE>>>,
}

impl<const N: usize, const SIZE: usize> IntentChannel<N, SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    pub const fn sender(&self) -> IntentSender<'_, N, SIZE> {
        IntentSender { channel: self }
    }

    pub const fn receiver(&self) -> IntentReceiver<'_, N, SIZE> {
        IntentReceiver { channel: self }
    }

    /// Queue an intent
    ///
    /// Returns the intent back if the queue is full.
    pub fn try_send(&self, intent: PlayerIntent<N>) -> Result<(), TrySendError<N>> {
        critical_section::with(|cs| {
            let mut queue = self.queue.borrow(cs).borrow_mut();
            queue.push_back(intent).map_err(TrySendError)
        })
    }

    /// Take the oldest queued intent
    pub fn try_receive(&self) -> Result<PlayerIntent<N>, TryReceiveError> {
        critical_section::with(|cs| {
            let mut queue = self.queue.borrow(cs).borrow_mut();
            queue.pop_front().ok_or(TryReceiveError)
        })
    }
}

impl<const N: usize, const SIZE: usize> Default for IntentChannel<N, SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending side of an [`IntentChannel`]
#[derive(Clone, Copy)]
pub struct IntentSender<'a, const N: usize, const SIZE: usize> {
    channel: &'a IntentChannel<N, SIZE>,
}

impl<const N: usize, const SIZE: usize> IntentSender<'_, N, SIZE> {
    pub fn try_send(&self, intent: PlayerIntent<N>) -> Result<(), TrySendError<N>> {
        self.channel.try_send(intent)
    }
}

/// Receiving side of an [`IntentChannel`]
#[derive(Clone, Copy)]
pub struct IntentReceiver<'a, const N: usize, const SIZE: usize> {
    channel: &'a IntentChannel<N, SIZE>,
}

impl<const N: usize, const SIZE: usize> IntentReceiver<'_, N, SIZE> {
    pub fn try_receive(&self) -> Result<PlayerIntent<N>, TryReceiveError> {
        self.channel.try_receive()
    }
}

/// Applies queued intents to an effect player
pub struct IntentProcessor<'a, const N: usize, const SIZE: usize> {
    intents: IntentReceiver<'a, N, SIZE>,
}

impl<'a, const N: usize, const SIZE: usize> IntentProcessor<'a, N, SIZE> {
    pub const fn new(intents: IntentReceiver<'a, N, SIZE>) -> Self {
        Self { intents }
    }

    /// Apply all pending intents (non-blocking)
    ///
    /// Intents the player rejects are logged and dropped. Returns the
    /// number of intents applied.
    pub fn process_pending(&mut self, player: &mut EffectPlayer<N>) -> usize {
        let mut applied = 0;
        while let Ok(intent) = self.intents.try_receive() {
            match player.apply_intent(intent) {
                Ok(()) => applied += 1,
                Err(err) => log::warn!("[IntentProcessor.process_pending] dropped intent: {err}"),
            }
        }
        applied
    }
}
