use core::convert::Infallible;
use core::marker::PhantomData;

use avr_device::atmega128a::PORTB;
use embedded_hal::digital::v2::ToggleableOutputPin;

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

#[derive(Debug)]
pub struct Pin<PORT, const PIN: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

macro_rules! impl_port {
    ($PORT:ident, $ddr:ident, $port:ident, $pin:ident) => {
        impl<const P: u8, MODE: PinMode> Pin<$PORT, P, MODE> {
            pub fn into_output(self) -> Pin<$PORT, P, Output> {
                // Set DDRx bit, output starts low
                unsafe {
                    let regs = &*$PORT::ptr();
                    regs.$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    regs.$ddr.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin {
                    _port: PhantomData,
                    _mode: PhantomData,
                }
            }
        }

        impl<const P: u8> ToggleableOutputPin for Pin<$PORT, P, Output> {
            type Error = Infallible;

            // Writing a one to PINx flips the output latch in one cycle
            #[inline]
            fn toggle(&mut self) -> Result<(), Infallible> {
                unsafe {
                    (*$PORT::ptr()).$pin.write(|w| w.bits(1 << P));
                }
                Ok(())
            }
        }
    };
}

impl_port!(PORTB, ddrb, portb, pinb);

pub mod board {
    use super::*;

    /// Scope probe toggled on every sample tick.
    pub type TickIndicator = Pin<PORTB, 0, Output>;

    /// Claim the tick indicator pin. Taking `PORTB` keeps other code from
    /// driving the port behind the ISR's back.
    pub fn tick_indicator(_portb: PORTB) -> TickIndicator {
        Pin::<PORTB, 0, Input> {
            _port: PhantomData,
            _mode: PhantomData,
        }
        .into_output()
    }
}
