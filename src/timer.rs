//! Tick timer abstraction, Timer1 compare-match math and a software timer
//! used when no hardware timer is present.

use ufmt::{uDisplay, uWrite, uwrite, Formatter};

const MICROS_PER_SECOND: u64 = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerError {
    ZeroFrequency,
    /// Requested rate cannot be produced by the timer.
    OutOfRange(u32),
}

impl uDisplay for TimerError {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            TimerError::ZeroFrequency => f.write_str("timer init failed: frequency is zero"),
            TimerError::OutOfRange(hz) => {
                uwrite!(f, "timer init failed: {} Hz out of range", *hz)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running,
    Paused,
}

/// A periodic tick source.
///
/// The tick handler itself is bound statically: the hardware timer fires its
/// interrupt vector, the software timer hands back the number of due ticks.
pub trait TickTimer {
    type Error;

    fn configure(&mut self, frequency_hz: u32) -> Result<(), Self::Error>;
    fn start(&mut self);
    /// Stop and reset the phase; the next `start` begins a full period.
    fn stop(&mut self);
    /// Stop counting but keep the phase.
    fn pause(&mut self);
    fn resume(&mut self);
}

/// Timer1 clock select values (CS12:0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Prescaler {
    Stop = 0,
    Direct = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
}

impl Prescaler {
    const SELECTABLE: [Prescaler; 5] = [
        Prescaler::Direct,
        Prescaler::Div8,
        Prescaler::Div64,
        Prescaler::Div256,
        Prescaler::Div1024,
    ];

    pub const fn divisor(self) -> u32 {
        match self {
            Prescaler::Stop => 0,
            Prescaler::Direct => 1,
            Prescaler::Div8 => 8,
            Prescaler::Div64 => 64,
            Prescaler::Div256 => 256,
            Prescaler::Div1024 => 1024,
        }
    }
}

/// CTC mode settings for a 16-bit timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompareMatch {
    prescaler: Prescaler,
    compare: u16,
    cpu_hz: u32,
}

impl CompareMatch {
    /// Pick the finest prescaler whose compare value fits in 16 bits.
    pub fn for_frequency(cpu_hz: u32, frequency_hz: u32) -> Result<Self, TimerError> {
        if frequency_hz == 0 {
            return Err(TimerError::ZeroFrequency);
        }

        for prescaler in Prescaler::SELECTABLE {
            let divisor = u64::from(prescaler.divisor()) * u64::from(frequency_hz);
            let counts = (u64::from(cpu_hz) + divisor / 2) / divisor;
            if counts < 2 {
                break;
            }
            if counts - 1 <= u64::from(u16::MAX) {
                return Ok(Self {
                    prescaler,
                    compare: (counts - 1) as u16,
                    cpu_hz,
                });
            }
        }

        Err(TimerError::OutOfRange(frequency_hz))
    }

    pub fn prescaler(&self) -> Prescaler {
        self.prescaler
    }

    /// OCR1A value; the timer counts `compare + 1` prescaled clocks per tick.
    pub fn compare(&self) -> u16 {
        self.compare
    }

    /// Tick rate actually produced, after rounding the compare value.
    pub fn achieved_hz(&self) -> u32 {
        self.cpu_hz / (self.prescaler.divisor() * (u32::from(self.compare) + 1))
    }
}

/// Software tick timer advanced by elapsed microseconds.
///
/// Phase is tracked in `Hz * us` so that after `T` microseconds at `F` Hz
/// exactly `floor(F * T / 1e6)` ticks have been reported.
#[derive(Debug)]
pub struct SoftTimer {
    frequency_hz: Option<u32>,
    max_hz: u32,
    state: TimerState,
    phase: u64,
    ticks: u64,
}

impl SoftTimer {
    pub const fn new() -> Self {
        Self::with_limit(MICROS_PER_SECOND as u32)
    }

    /// Refuse configurations faster than `max_hz`.
    pub const fn with_limit(max_hz: u32) -> Self {
        Self {
            frequency_hz: None,
            max_hz,
            state: TimerState::Stopped,
            phase: 0,
            ticks: 0,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn frequency_hz(&self) -> Option<u32> {
        self.frequency_hz
    }

    /// Total ticks reported since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Let `elapsed_us` pass and return how many ticks fell due.
    ///
    /// `elapsed_us * frequency_hz` stays below `u64::MAX` for any pair of
    /// `u32` inputs, and the carried phase is under one second.
    pub fn advance(&mut self, elapsed_us: u32) -> u64 {
        let frequency_hz = match (self.state, self.frequency_hz) {
            (TimerState::Running, Some(hz)) => hz,
            _ => return 0,
        };

        self.phase += u64::from(elapsed_us) * u64::from(frequency_hz);
        let due = self.phase / MICROS_PER_SECOND;
        self.phase %= MICROS_PER_SECOND;
        self.ticks += due;
        due
    }
}

impl Default for SoftTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TickTimer for SoftTimer {
    type Error = TimerError;

    fn configure(&mut self, frequency_hz: u32) -> Result<(), TimerError> {
        if frequency_hz == 0 {
            return Err(TimerError::ZeroFrequency);
        }
        if frequency_hz > self.max_hz {
            return Err(TimerError::OutOfRange(frequency_hz));
        }
        self.frequency_hz = Some(frequency_hz);
        self.phase = 0;
        Ok(())
    }

    fn start(&mut self) {
        if self.frequency_hz.is_none() {
            return;
        }
        if self.state == TimerState::Stopped {
            self.phase = 0;
        }
        self.state = TimerState::Running;
    }

    fn stop(&mut self) {
        self.state = TimerState::Stopped;
        self.phase = 0;
    }

    fn pause(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Paused;
        }
    }

    fn resume(&mut self) {
        if self.state == TimerState::Paused {
            self.state = TimerState::Running;
        }
    }
}
