//! Consumer side of the handoff, run from the foreground loop.

use ufmt::{uWrite, uwriteln};

use crate::record::GapTracker;
use crate::sample::{Sample, SampleSlot};

pub struct Reporter<'a, W> {
    slot: &'a SampleSlot,
    out: W,
    gaps: GapTracker,
}

impl<'a, W> Reporter<'a, W>
where
    W: uWrite,
{
    pub fn new(slot: &'a SampleSlot, out: W) -> Self {
        Self {
            slot,
            out,
            gaps: GapTracker::new(),
        }
    }

    /// Drain the slot once. Emits `"<sequence>,<value>\n"` if a sample was
    /// pending and returns it.
    ///
    /// The sample is consumed even when writing it fails.
    pub fn poll(&mut self) -> Result<Option<Sample>, W::Error> {
        let sample = match self.slot.take() {
            Some(sample) => sample,
            None => return Ok(None),
        };

        self.gaps.observe(sample.sequence);
        uwriteln!(&mut self.out, "{},{}", sample.sequence, sample.value)?;
        Ok(Some(sample))
    }

    /// One pass of the foreground loop: poll, and call `idle` only if the
    /// slot was empty. A failed write skips `idle` so the next pass polls
    /// straight away.
    pub fn step<F>(&mut self, idle: &mut F) -> Result<Option<Sample>, W::Error>
    where
        F: FnMut(),
    {
        let polled = self.poll();
        if let Ok(None) = polled {
            idle();
        }
        polled
    }

    /// Step forever.
    ///
    /// Transport errors are dropped here; the sample that failed to go out is
    /// lost like any overwritten one.
    pub fn run<F>(mut self, mut idle: F) -> !
    where
        F: FnMut(),
    {
        loop {
            let _ = self.step(&mut idle);
        }
    }

    /// Samples lost to overwrites, judged by sequence gaps.
    pub fn dropped(&self) -> u64 {
        self.gaps.dropped()
    }

    /// Samples taken from the slot so far.
    pub fn consumed(&self) -> u64 {
        self.gaps.observed()
    }

    pub fn last_sequence(&self) -> Option<u32> {
        self.gaps.last()
    }

    pub fn into_writer(self) -> W {
        self.out
    }
}
