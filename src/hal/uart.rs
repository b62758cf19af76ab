use core::cell::RefCell;

use avr_device::atmega128a::USART0;
use critical_section::Mutex;

use crate::config::{CPU_FREQ_HZ, UART_BAUD};

// Buffer size must be power of 2 for efficient masking
const BUFFER_SIZE: usize = 64;
const BUFFER_MASK: usize = BUFFER_SIZE - 1;

const UBRR: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16;

// UCSR0B bits
const UDRIE0: u8 = 1 << 5;
const TXEN0: u8 = 1 << 3;
// UCSR0C: 8 data bits, no parity, 1 stop bit
const UCSZ_8N1: u8 = 0x06;

struct Buffer {
    data: [u8; BUFFER_SIZE],
    write_idx: usize,
    read_idx: usize,
}

impl Buffer {
    const fn new() -> Self {
        Self {
            data: [0; BUFFER_SIZE],
            write_idx: 0,
            read_idx: 0,
        }
    }

    fn write(&mut self, byte: u8) -> bool {
        let next_write = (self.write_idx + 1) & BUFFER_MASK;
        if next_write != self.read_idx {
            self.data[self.write_idx] = byte;
            self.write_idx = next_write;
            true
        } else {
            false
        }
    }

    fn read(&mut self) -> Option<u8> {
        if self.read_idx != self.write_idx {
            let byte = self.data[self.read_idx];
            self.read_idx = (self.read_idx + 1) & BUFFER_MASK;
            Some(byte)
        } else {
            None
        }
    }
}

// Drained by the data register empty interrupt
static TX_BUFFER: Mutex<RefCell<Buffer>> = Mutex::new(RefCell::new(Buffer::new()));

/// Transmit-only USART0, interrupt driven.
pub struct Uart {
    usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0) -> Self {
        unsafe {
            usart.ubrr0h.write(|w| w.bits((UBRR >> 8) as u8));
            usart.ubrr0l.write(|w| w.bits(UBRR as u8));
            usart.ucsr0c.write(|w| w.bits(UCSZ_8N1));
            usart.ucsr0b.write(|w| w.bits(TXEN0));
        }
        Self { usart }
    }

    /// Queue one byte, spinning while the buffer is full.
    pub fn write_byte(&mut self, byte: u8) {
        loop {
            let queued = critical_section::with(|cs| {
                let queued = TX_BUFFER.borrow_ref_mut(cs).write(byte);
                // Kick the interrupt in the same section so it cannot
                // disable itself between queueing and enabling.
                unsafe {
                    self.usart.ucsr0b.modify(|r, w| w.bits(r.bits() | UDRIE0));
                }
                queued
            });
            if queued {
                return;
            }
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
    }
}

#[avr_device::interrupt(atmega128a)]
fn USART0_UDRE() {
    // SAFETY: only this handler and the critical section in `write_byte`
    // touch UDR0 and UDRIE0.
    let usart = unsafe { &*USART0::ptr() };
    critical_section::with(|cs| {
        if let Some(byte) = TX_BUFFER.borrow_ref_mut(cs).read() {
            unsafe { usart.udr0.write(|w| w.bits(byte)) };
        } else {
            // Buffer empty - disable TX interrupt
            unsafe { usart.ucsr0b.modify(|r, w| w.bits(r.bits() & !UDRIE0)) };
        }
    });
}
