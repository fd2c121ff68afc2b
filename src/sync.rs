//! Synchronization primitives for gitstate.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

/// Which of the two prerequisite slots a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Left,
    Right,
}

impl Slot {
    const fn bit(self) -> u8 {
        match self {
            Slot::Left => 0b01,
            Slot::Right => 0b10,
        }
    }
}

const BOTH: u8 = 0b11;

/// A two-slot latch that releases exactly once.
///
/// Each slot is written once. After writing its value, a writer sets its bit in
/// a shared mask with a single `fetch_or`; the writer whose `fetch_or` completes
/// the mask is handed both values. Because the mask transitions through one
/// atomic location, exactly one writer ever observes the completing transition,
/// regardless of arrival order or simultaneous arrival.
#[derive(Debug, Default)]
pub struct PairLatch<T> {
    left: OnceLock<T>,
    right: OnceLock<T>,
    arrived: AtomicU8,
}

impl<T> PairLatch<T> {
    pub fn new() -> Self {
        Self {
            left: OnceLock::new(),
            right: OnceLock::new(),
            arrived: AtomicU8::new(0),
        }
    }

    /// Publish `value` into `slot`.
    ///
    /// Returns `Some((left, right))` to the single caller that completes the
    /// latch and `None` to everyone else. Arriving twice on the same slot keeps
    /// the first value and never releases a second time.
    pub fn arrive(&self, slot: Slot, value: T) -> Option<(&T, &T)> {
        let cell = match slot {
            Slot::Left => &self.left,
            Slot::Right => &self.right,
        };
        if cell.set(value).is_err() {
            return None;
        }

        // AcqRel: publishes our slot to the other writer and observes theirs.
        let other = BOTH & !slot.bit();
        if self.arrived.fetch_or(slot.bit(), Ordering::AcqRel) != other {
            return None;
        }
        Some((self.left.get()?, self.right.get()?))
    }

    /// Whether both slots have arrived.
    pub fn is_released(&self) -> bool {
        self.arrived.load(Ordering::Acquire) == BOTH
    }
}
