use avr_device::atmega128a::CPU;

// MCUCR: SE and SM2:0. All SM bits clear selects idle mode.
const SE: u8 = 1 << 5;
const SM_MASK: u8 = 0x1C;

pub struct Power {
    cpu: CPU,
}

impl Power {
    pub fn new(cpu: CPU) -> Self {
        Self { cpu }
    }

    /// Sleep until the next interrupt unless `pending` reports work.
    ///
    /// `pending` runs with interrupts disabled. `sei` delays interrupts by one
    /// instruction, so an interrupt cannot slip in between the check and
    /// `sleep` and leave the CPU asleep with work outstanding. Timer1 and the
    /// UART keep running in idle mode.
    pub fn idle_unless<F>(&mut self, pending: F)
    where
        F: FnOnce() -> bool,
    {
        avr_device::interrupt::disable();
        if pending() {
            unsafe { avr_device::interrupt::enable() };
            return;
        }

        unsafe {
            self.cpu.mcucr.modify(|r, w| w.bits((r.bits() & !SM_MASK) | SE));
            core::arch::asm!("sei", "sleep", options(nostack));
            self.cpu.mcucr.modify(|r, w| w.bits(r.bits() & !SE));
        }
    }
}
