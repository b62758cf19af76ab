use avr_device::atmega128a::ADC;

use crate::sampler::AnalogSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AdcChannel {
    Adc0 = 0,
    Adc1 = 1,
    Adc2 = 2,
    Adc3 = 3,
    Adc4 = 4,
    Adc5 = 5,
    Adc6 = 6,
    Adc7 = 7,
}

impl AdcChannel {
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(AdcChannel::Adc0),
            1 => Some(AdcChannel::Adc1),
            2 => Some(AdcChannel::Adc2),
            3 => Some(AdcChannel::Adc3),
            4 => Some(AdcChannel::Adc4),
            5 => Some(AdcChannel::Adc5),
            6 => Some(AdcChannel::Adc6),
            7 => Some(AdcChannel::Adc7),
            _ => None,
        }
    }
}

// ADCSRA bits
const ADEN: u8 = 1 << 7;
const ADSC: u8 = 1 << 6;
const ADPS_DIV128: u8 = 0x07;

// ADMUX REFS1:0 = 01, AVCC with external cap at AREF
const REFS_AVCC: u8 = 1 << 6;

/// Single-ended ADC bound to one input channel.
pub struct Adc {
    adc: ADC,
}

impl Adc {
    /// Enable the ADC at 125 kHz (16 MHz / 128) with AVCC reference.
    pub fn new(adc: ADC, channel: AdcChannel) -> Self {
        unsafe {
            adc.adcsra.write(|w| w.bits(ADEN | ADPS_DIV128));
            adc.admux.write(|w| w.bits(REFS_AVCC | channel as u8));
        }
        Self { adc }
    }

    /// Blocking conversion, 13 ADC clocks (about 104 us).
    pub fn read_channel(&mut self) -> u16 {
        unsafe {
            self.adc.adcsra.modify(|r, w| w.bits(r.bits() | ADSC));
        }
        while self.adc.adcsra.read().bits() & ADSC != 0 {}
        self.adc.adc.read().bits()
    }
}

impl AnalogSource for Adc {
    #[inline]
    fn read(&mut self) -> u16 {
        self.read_channel()
    }
}
