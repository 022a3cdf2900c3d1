//! Cooperative stop request for the playback loop

use core::cell::Cell;

use critical_section::Mutex;

/// Flag raised from a signal handler and checked between frames
pub struct StopSignal {
    raised: Mutex<Cell<bool>>,
}

impl StopSignal {
    pub const fn new() -> Self {
        Self {
            raised: Mutex::new(Cell::new(false)),
        }
    }

    /// Ask the loop to stop after the current frame
    pub fn raise(&self) {
        critical_section::with(|cs| self.raised.borrow(cs).set(true));
    }

    pub fn is_raised(&self) -> bool {
        critical_section::with(|cs| self.raised.borrow(cs).get())
    }

    pub fn reset(&self) {
        critical_section::with(|cs| self.raised.borrow(cs).set(false));
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}
