use core::convert::Infallible;

use avr_device::atmega128a::USART0;

use crate::hal::Uart;

/// Line oriented output on USART0 shared by the sample stream and the
/// diagnostic lines.
pub struct SerialConsole {
    uart: Uart,
}

impl SerialConsole {
    pub fn new(usart: USART0) -> Self {
        Self {
            uart: Uart::new(usart),
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.uart.write_str(s);
    }
}

impl ufmt::uWrite for SerialConsole {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        SerialConsole::write_str(self, s);
        Ok(())
    }
}
