//! Configuration constants for the ATmega128 sampler firmware

use crate::sample::Resolution;

/// CPU frequency in Hz, provided by the build script
pub const CPU_FREQ_HZ: u32 = parse_hz(env!("MCU_FREQ_HZ"));

/// UART baud rate. 250 kBd divides 16 MHz exactly (UBRR = 3).
pub const UART_BAUD: u32 = 250_000;

/// Sampling rate of the timer interrupt
pub const SAMPLE_RATE_HZ: u32 = 1_000;

/// Highest rate the ADC can keep up with: one conversion takes 13 ADC
/// clocks at 125 kHz, plus interrupt entry and exit.
pub const MAX_SAMPLE_RATE_HZ: u32 = 5_000;

/// ADC input channel the sampler reads
pub const ADC_CHANNEL: u8 = 0;

/// Width of a raw ADC reading
pub const ADC_RESOLUTION: Resolution = Resolution::Bits10;

pub const FIRMWARE_NAME: &str = "ATmega128 sampler";
pub const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run-time view of the sampling setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplerConfig {
    pub frequency_hz: u32,
    pub channel: u8,
    pub resolution: Resolution,
}

impl SamplerConfig {
    pub const DEFAULT: Self = Self {
        frequency_hz: SAMPLE_RATE_HZ,
        channel: ADC_CHANNEL,
        resolution: ADC_RESOLUTION,
    };

    pub const fn with_frequency(self, frequency_hz: u32) -> Self {
        Self {
            frequency_hz,
            ..self
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const fn parse_hz(s: &str) -> u32 {
    let bytes = s.as_bytes();
    let mut value = 0u32;
    let mut i = 0;
    while i < bytes.len() {
        let digit = bytes[i];
        assert!(digit.is_ascii_digit(), "MCU_FREQ_HZ must be decimal");
        value = value * 10 + (digit - b'0') as u32;
        i += 1;
    }
    value
}
