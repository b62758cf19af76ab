//! Sample type and the single-slot handoff between the timer ISR and the
//! foreground loop.
//!
//! The slot holds at most one unconsumed [`Sample`]. Publishing while a sample
//! is still pending overwrites it, so the reader only ever sees the newest
//! reading and detects losses through gaps in the sequence numbers.
//!
//! Both fields travel together: [`SampleSlot::publish`] and
//! [`SampleSlot::take`] each run inside one critical section, which on AVR
//! means with interrupts disabled for a handful of cycles.

use core::cell::Cell;

use critical_section::Mutex;

/// Bit width of a raw analog reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Bits8,
    Bits10,
    Bits12,
    Bits16,
}

impl Resolution {
    pub const fn bits(self) -> u8 {
        match self {
            Resolution::Bits8 => 8,
            Resolution::Bits10 => 10,
            Resolution::Bits12 => 12,
            Resolution::Bits16 => 16,
        }
    }

    /// Largest value a reading of this width can take.
    pub const fn max(self) -> u16 {
        (u16::MAX) >> (16 - self.bits())
    }

    #[inline]
    pub const fn clamp(self, raw: u16) -> u16 {
        let max = self.max();
        if raw > max {
            max
        } else {
            raw
        }
    }
}

/// One reading stamped with the tick that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sample {
    pub sequence: u32,
    pub value: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    Empty,
    Ready,
}

pub struct SampleSlot {
    pending: Mutex<Cell<Option<Sample>>>,
}

impl SampleSlot {
    pub const fn new() -> Self {
        Self {
            pending: Mutex::new(Cell::new(None)),
        }
    }

    /// Store `sample`, returning the unconsumed one it replaced.
    #[inline]
    pub fn publish(&self, sample: Sample) -> Option<Sample> {
        critical_section::with(|cs| self.pending.borrow(cs).replace(Some(sample)))
    }

    /// Consume the pending sample, leaving the slot empty.
    #[inline]
    pub fn take(&self) -> Option<Sample> {
        critical_section::with(|cs| self.pending.borrow(cs).take())
    }

    pub fn state(&self) -> SlotState {
        critical_section::with(|cs| match self.pending.borrow(cs).get() {
            Some(_) => SlotState::Ready,
            None => SlotState::Empty,
        })
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state() == SlotState::Ready
    }
}

impl Default for SampleSlot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(sequence: u32, value: u16) -> Sample {
        Sample { sequence, value }
    }

    #[test]
    fn resolution_limits() {
        assert_eq!(Resolution::Bits8.max(), 255);
        assert_eq!(Resolution::Bits10.max(), 1023);
        assert_eq!(Resolution::Bits12.max(), 4095);
        assert_eq!(Resolution::Bits16.max(), u16::MAX);
        assert_eq!(Resolution::Bits12.clamp(5000), 4095);
        assert_eq!(Resolution::Bits12.clamp(17), 17);
    }

    #[test]
    fn slot_starts_empty() {
        let slot = SampleSlot::new();
        assert_eq!(slot.state(), SlotState::Empty);
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn take_empties_the_slot() {
        let slot = SampleSlot::new();
        assert_eq!(slot.publish(sample(1, 100)), None);
        assert!(slot.is_ready());

        assert_eq!(slot.take(), Some(sample(1, 100)));
        assert_eq!(slot.state(), SlotState::Empty);
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn publish_overwrites_pending_sample() {
        let slot = SampleSlot::new();
        slot.publish(sample(1, 10));

        let dropped = slot.publish(sample(2, 20));
        assert_eq!(dropped, Some(sample(1, 10)));
        assert_eq!(slot.state(), SlotState::Ready);
        assert_eq!(slot.take(), Some(sample(2, 20)));
    }
}
