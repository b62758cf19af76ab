mod common;

use atmega128_sampler::{CompareMatch, Prescaler, SoftTimer, TickTimer, TimerError, TimerState};
use common::Capture;
use ufmt::uwrite;

const CPU_HZ: u32 = 16_000_000;

#[test]
fn compare_match_prefers_finest_prescaler() {
    let one_khz = CompareMatch::for_frequency(CPU_HZ, 1_000).unwrap();
    assert_eq!(one_khz.prescaler(), Prescaler::Direct);
    assert_eq!(one_khz.compare(), 15_999);
    assert_eq!(one_khz.achieved_hz(), 1_000);

    let ten_hz = CompareMatch::for_frequency(CPU_HZ, 10).unwrap();
    assert_eq!(ten_hz.prescaler(), Prescaler::Div64);
    assert_eq!(ten_hz.compare(), 24_999);
    assert_eq!(ten_hz.achieved_hz(), 10);

    let one_hz = CompareMatch::for_frequency(CPU_HZ, 1).unwrap();
    assert_eq!(one_hz.prescaler(), Prescaler::Div256);
    assert_eq!(one_hz.compare(), 62_499);
}

#[test]
fn compare_match_rejects_impossible_rates() {
    assert_eq!(
        CompareMatch::for_frequency(CPU_HZ, 0),
        Err(TimerError::ZeroFrequency)
    );
    assert_eq!(
        CompareMatch::for_frequency(CPU_HZ, CPU_HZ),
        Err(TimerError::OutOfRange(CPU_HZ))
    );
    // Slowest Timer1 rate at 1 MHz is about 0.015 Hz, so 1 Hz still fits
    assert!(CompareMatch::for_frequency(1_000_000, 1).is_ok());
}

#[test]
fn soft_timer_needs_configuration_and_start() {
    let mut timer = SoftTimer::new();
    timer.start();
    assert_eq!(timer.state(), TimerState::Stopped);
    assert_eq!(timer.advance(10_000), 0);

    timer.configure(1_000).unwrap();
    assert_eq!(timer.advance(10_000), 0);

    timer.start();
    assert_eq!(timer.state(), TimerState::Running);
    assert_eq!(timer.advance(10_000), 10);
    assert_eq!(timer.ticks(), 10);
}

#[test]
fn soft_timer_keeps_fractional_phase() {
    let mut timer = SoftTimer::new();
    timer.configure(3).unwrap();
    timer.start();

    let due: u64 = (0..1_000).map(|_| timer.advance(1_000)).sum();
    assert_eq!(due, 3);
}

#[test]
fn soft_timer_counts_past_u32_ticks_in_one_step() {
    let mut timer = SoftTimer::with_limit(u32::MAX);
    timer.configure(4_000_000_000).unwrap();
    timer.start();

    let due = timer.advance(2_000_000_000);
    assert_eq!(due, 8_000_000_000_000);
    assert_eq!(due, timer.ticks());

    timer.configure(u32::MAX).unwrap();
    let due = timer.advance(u32::MAX);
    assert_eq!(due, u64::from(u32::MAX) * u64::from(u32::MAX) / 1_000_000);
}

#[test]
fn compare_match_settings_always_tick() {
    for hz in [1, 10, 245, 1_000, 5_000, 100_000, 8_000_000] {
        let setting = CompareMatch::for_frequency(CPU_HZ, hz).unwrap();
        assert_ne!(setting.prescaler(), Prescaler::Stop);
        assert!(setting.achieved_hz() > 0);
    }
}

#[test]
fn pause_keeps_phase_and_stop_resets_it() {
    let mut timer = SoftTimer::new();
    timer.configure(1_000).unwrap();
    timer.start();

    assert_eq!(timer.advance(600), 0);
    timer.pause();
    assert_eq!(timer.state(), TimerState::Paused);
    assert_eq!(timer.advance(5_000), 0);
    timer.resume();
    assert_eq!(timer.advance(400), 1);

    assert_eq!(timer.advance(600), 0);
    timer.stop();
    assert_eq!(timer.state(), TimerState::Stopped);
    timer.start();
    assert_eq!(timer.advance(400), 0);
    assert_eq!(timer.advance(600), 1);
}

#[test]
fn resume_only_applies_to_a_paused_timer() {
    let mut timer = SoftTimer::new();
    timer.configure(1_000).unwrap();
    timer.resume();
    assert_eq!(timer.state(), TimerState::Stopped);

    timer.pause();
    assert_eq!(timer.state(), TimerState::Stopped);
}

#[test]
fn soft_timer_limit() {
    let mut timer = SoftTimer::with_limit(5_000);
    assert_eq!(timer.configure(5_001), Err(TimerError::OutOfRange(5_001)));
    assert_eq!(timer.configure(0), Err(TimerError::ZeroFrequency));
    assert_eq!(timer.frequency_hz(), None);
    assert_eq!(timer.configure(5_000), Ok(()));
}

#[test]
fn timer_errors_render_as_text() {
    let mut out = Capture::default();
    uwrite!(&mut out, "{}", TimerError::OutOfRange(20_000)).unwrap();
    assert_eq!(out.text, "timer init failed: 20000 Hz out of range");
}
