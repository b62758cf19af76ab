//! Producer side of the handoff, run from the timer interrupt.

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_hal::adc::{Channel, OneShot};
use embedded_hal::digital::v2::ToggleableOutputPin;

use crate::sample::{Resolution, Sample, SampleSlot};

/// A single analog input.
///
/// Called from interrupt context: implementations must not block for longer
/// than one conversion and must not allocate.
pub trait AnalogSource {
    fn read(&mut self) -> u16;
}

impl<F> AnalogSource for F
where
    F: FnMut() -> u16,
{
    fn read(&mut self) -> u16 {
        self()
    }
}

/// Adapts an `embedded-hal` one-shot ADC and its channel pin.
///
/// A failed conversion repeats the last good reading.
pub struct OneShotSource<A, ADC, PIN> {
    adc: A,
    pin: PIN,
    last: u16,
    _adc: PhantomData<ADC>,
}

impl<A, ADC, PIN> OneShotSource<A, ADC, PIN>
where
    A: OneShot<ADC, u16, PIN>,
    PIN: Channel<ADC>,
{
    pub fn new(adc: A, pin: PIN) -> Self {
        Self {
            adc,
            pin,
            last: 0,
            _adc: PhantomData,
        }
    }

    pub fn release(self) -> (A, PIN) {
        (self.adc, self.pin)
    }
}

impl<A, ADC, PIN> AnalogSource for OneShotSource<A, ADC, PIN>
where
    A: OneShot<ADC, u16, PIN>,
    PIN: Channel<ADC>,
{
    fn read(&mut self) -> u16 {
        if let Ok(value) = nb::block!(self.adc.read(&mut self.pin)) {
            self.last = value;
        }
        self.last
    }
}

/// Stand-in for boards without a tick indicator pin.
#[derive(Debug, Default)]
pub struct NoIndicator;

impl ToggleableOutputPin for NoIndicator {
    type Error = Infallible;

    fn toggle(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct Sampler<S, P = NoIndicator> {
    source: S,
    resolution: Resolution,
    sequence: u32,
    indicator: P,
}

impl<S: AnalogSource> Sampler<S, NoIndicator> {
    pub fn new(source: S, resolution: Resolution) -> Self {
        Self::with_indicator(source, resolution, NoIndicator)
    }
}

impl<S, P> Sampler<S, P>
where
    S: AnalogSource,
    P: ToggleableOutputPin,
{
    /// `indicator` flips on every tick, so a scope on the pin shows half the
    /// sample rate.
    pub fn with_indicator(source: S, resolution: Resolution, indicator: P) -> Self {
        Self {
            source,
            resolution,
            sequence: 0,
            indicator,
        }
    }

    /// Handle one timer tick: read, stamp, publish.
    ///
    /// Returns the sample now sitting in `slot`.
    #[inline]
    pub fn tick(&mut self, slot: &SampleSlot) -> Sample {
        let value = self.resolution.clamp(self.source.read());
        self.sequence = self.sequence.wrapping_add(1);

        let sample = Sample {
            sequence: self.sequence,
            value,
        };
        slot.publish(sample);

        let _ = self.indicator.toggle();
        sample
    }

    /// Number of ticks handled so far.
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn release(self) -> (S, P) {
        (self.source, self.indicator)
    }
}
