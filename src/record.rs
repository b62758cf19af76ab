//! The `"<sequence>,<value>"` line format as seen by a receiver, plus
//! sequence gap accounting shared with the reporter.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record {
    pub sequence: u32,
    pub value: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordError {
    /// Line did not split into exactly two comma separated fields.
    FieldCount,
    InvalidSequence,
    InvalidValue,
}

impl Record {
    /// Parse one received line. Surrounding whitespace and a trailing
    /// `\r\n` are ignored, so diagnostic lines such as `[INF] ...` are
    /// rejected rather than misread.
    pub fn parse(line: &str) -> Result<Self, RecordError> {
        let mut fields = line.trim().split(',');
        let (sequence, value) = match (fields.next(), fields.next(), fields.next()) {
            (Some(sequence), Some(value), None) => (sequence, value),
            _ => return Err(RecordError::FieldCount),
        };

        let sequence = sequence
            .trim()
            .parse()
            .map_err(|_| RecordError::InvalidSequence)?;
        let value = value.trim().parse().map_err(|_| RecordError::InvalidValue)?;

        Ok(Self { sequence, value })
    }
}

/// Counts samples lost between consecutive observed sequence numbers.
///
/// Sequences wrap at `u32::MAX`; a step of one across the wrap is not a gap.
#[derive(Clone, Copy, Debug, Default)]
pub struct GapTracker {
    last: Option<u32>,
    dropped: u64,
    observed: u64,
}

impl GapTracker {
    pub const fn new() -> Self {
        Self {
            last: None,
            dropped: 0,
            observed: 0,
        }
    }

    /// Record `sequence` and return how many samples were skipped before it.
    pub fn observe(&mut self, sequence: u32) -> u32 {
        let gap = match self.last {
            // The first sample after reset is numbered 1.
            None => sequence.saturating_sub(1),
            Some(last) => sequence.wrapping_sub(last).wrapping_sub(1),
        };
        self.last = Some(sequence);
        self.observed += 1;
        self.dropped += u64::from(gap);
        gap
    }

    pub fn last(&self) -> Option<u32> {
        self.last
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn observed(&self) -> u64 {
        self.observed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_firmware_lines() {
        assert_eq!(
            Record::parse("100,1234\n"),
            Ok(Record { sequence: 100, value: 1234 })
        );
        assert_eq!(
            Record::parse(" 7 , 42 \r\n"),
            Ok(Record { sequence: 7, value: 42 })
        );
    }

    #[test]
    fn parse_rejects_malformed_lines() {
        assert_eq!(Record::parse(""), Err(RecordError::FieldCount));
        assert_eq!(Record::parse("1,2,3"), Err(RecordError::FieldCount));
        assert_eq!(
            Record::parse("[INF] ATmega128 sampler"),
            Err(RecordError::FieldCount)
        );
        assert_eq!(Record::parse("x,2"), Err(RecordError::InvalidSequence));
        assert_eq!(Record::parse("1,70000"), Err(RecordError::InvalidValue));
        assert_eq!(Record::parse("-1,2"), Err(RecordError::InvalidSequence));
    }

    #[test]
    fn gap_tracker_counts_skipped_sequences() {
        let mut gaps = GapTracker::new();
        assert_eq!(gaps.observe(1), 0);
        assert_eq!(gaps.observe(2), 0);
        assert_eq!(gaps.observe(5), 2);
        assert_eq!(gaps.observe(6), 0);
        assert_eq!(gaps.dropped(), 2);
        assert_eq!(gaps.observed(), 4);
        assert_eq!(gaps.last(), Some(6));
    }

    #[test]
    fn gap_tracker_counts_lead_in_and_wrap() {
        let mut gaps = GapTracker::new();
        assert_eq!(gaps.observe(10), 9);
        assert_eq!(gaps.observe(u32::MAX), u32::MAX - 11);

        let mut gaps = GapTracker::new();
        gaps.observe(1);
        gaps.last = Some(u32::MAX);
        assert_eq!(gaps.observe(0), 0);
    }
}
