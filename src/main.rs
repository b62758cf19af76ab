#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
mod firmware {
    use core::cell::RefCell;

    use critical_section::Mutex;
    use panic_halt as _;

    use atmega128_sampler::drivers::SerialConsole;
    use atmega128_sampler::hal::{board, Adc, AdcChannel, Power, SampleTimer};
    use atmega128_sampler::{Application, Reporter, SampleSlot, Sampler, SamplerConfig};

    type TimerSampler = Sampler<Adc, board::TickIndicator>;

    static SLOT: SampleSlot = SampleSlot::new();

    // Installed once in `main`, used only by TIMER1_COMPA afterwards
    static SAMPLER: Mutex<RefCell<Option<TimerSampler>>> = Mutex::new(RefCell::new(None));

    #[avr_device::entry]
    fn main() -> ! {
        let dp = avr_device::atmega128a::Peripherals::take().unwrap();
        let config = SamplerConfig::DEFAULT;

        let mut console = SerialConsole::new(dp.USART0);
        let mut power = Power::new(dp.CPU);
        let mut timer = SampleTimer::new(dp.TC1);

        let channel = AdcChannel::from_index(config.channel).unwrap_or(AdcChannel::Adc0);
        let sampler = Sampler::with_indicator(
            Adc::new(dp.ADC, channel),
            config.resolution,
            board::tick_indicator(dp.PORTB),
        );
        critical_section::with(|cs| {
            SAMPLER.borrow(cs).replace(Some(sampler));
        });

        // The UART transmits from its interrupt, so enable before the banner
        unsafe { avr_device::interrupt::enable() };

        // On failure the timer stays stopped and the reporter idles forever.
        // The console cannot fail, so the result only carries `Sampling`.
        let _ = Application::new(config).startup(&mut timer, &mut console);

        Reporter::new(&SLOT, console).run(|| power.idle_unless(|| SLOT.is_ready()))
    }

    #[avr_device::interrupt(atmega128a)]
    fn TIMER1_COMPA() {
        critical_section::with(|cs| {
            if let Some(sampler) = SAMPLER.borrow_ref_mut(cs).as_mut() {
                sampler.tick(&SLOT);
            }
        });
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("atmega128_sampler is ATmega128A firmware; build it for an AVR target");
}
