use avr_device::atmega128a::TC1;

use crate::config::{CPU_FREQ_HZ, MAX_SAMPLE_RATE_HZ};
use crate::timer::{CompareMatch, Prescaler, TickTimer, TimerError};

const PRESCALER_MASK: u8 = 0x07;
// TCCR1B: clear timer on compare match with OCR1A
const WGM12: u8 = 1 << 3;
// TIMSK / TIFR: output compare A
const OCIE1A: u8 = 1 << 4;
const OCF1A: u8 = 1 << 4;

/// Timer1 in CTC mode, firing `TIMER1_COMPA` once per sample period.
pub struct SampleTimer {
    tc1: TC1,
    setting: Option<CompareMatch>,
}

impl SampleTimer {
    pub fn new(tc1: TC1) -> Self {
        unsafe {
            tc1.tccr1a.write(|w| w.bits(0));
            tc1.tccr1b.write(|w| w.bits(0));
            tc1.tcnt1.write(|w| w.bits(0));
        }
        Self { tc1, setting: None }
    }

    fn set_clock(&mut self, prescaler: Prescaler) {
        unsafe {
            self.tc1.tccr1b.modify(|r, w| {
                w.bits((r.bits() & !PRESCALER_MASK) | (prescaler as u8 & PRESCALER_MASK))
            });
        }
    }

    fn enable_compare_interrupt(&mut self) {
        unsafe {
            // Writing one clears a stale flag
            self.tc1.tifr.write(|w| w.bits(OCF1A));
            self.tc1.timsk.modify(|r, w| w.bits(r.bits() | OCIE1A));
        }
    }

    fn disable_compare_interrupt(&mut self) {
        unsafe {
            self.tc1.timsk.modify(|r, w| w.bits(r.bits() & !OCIE1A));
        }
    }
}

impl TickTimer for SampleTimer {
    type Error = TimerError;

    fn configure(&mut self, frequency_hz: u32) -> Result<(), TimerError> {
        if frequency_hz > MAX_SAMPLE_RATE_HZ {
            return Err(TimerError::OutOfRange(frequency_hz));
        }
        let setting = CompareMatch::for_frequency(CPU_FREQ_HZ, frequency_hz)?;

        self.stop();
        unsafe {
            self.tc1.ocr1a.write(|w| w.bits(setting.compare()));
            self.tc1.tccr1b.write(|w| w.bits(WGM12));
        }
        self.setting = Some(setting);
        Ok(())
    }

    fn start(&mut self) {
        if let Some(setting) = self.setting {
            unsafe { self.tc1.tcnt1.write(|w| w.bits(0)) };
            self.enable_compare_interrupt();
            self.set_clock(setting.prescaler());
        }
    }

    fn stop(&mut self) {
        self.set_clock(Prescaler::Stop);
        self.disable_compare_interrupt();
        unsafe { self.tc1.tcnt1.write(|w| w.bits(0)) };
    }

    fn pause(&mut self) {
        self.set_clock(Prescaler::Stop);
    }

    fn resume(&mut self) {
        if let Some(setting) = self.setting {
            self.set_clock(setting.prescaler());
        }
    }
}
