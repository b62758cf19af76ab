//! Timer driven single channel ADC sampler for the ATmega128A.
//!
//! A timer interrupt runs the [`Sampler`], which reads the ADC and publishes
//! a sequence-stamped [`Sample`] into a one-element [`SampleSlot`]. The
//! foreground [`Reporter`] drains the slot and prints `<sequence>,<value>`
//! lines over the UART. Samples the reporter misses are overwritten and show
//! up as gaps in the sequence numbers.
//!
//! Everything outside `hal` and `drivers` is target independent and is
//! tested on the host.

#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]
#![cfg_attr(target_arch = "avr", feature(asm_experimental_arch))]

pub mod application;
pub mod config;
pub mod diag;
pub mod record;
pub mod reporter;
pub mod sample;
pub mod sampler;
pub mod timer;

#[cfg(target_arch = "avr")]
pub mod drivers;
#[cfg(target_arch = "avr")]
pub mod hal;

pub use application::{Application, Sampling};
pub use config::SamplerConfig;
pub use record::{GapTracker, Record, RecordError};
pub use reporter::Reporter;
pub use sample::{Resolution, Sample, SampleSlot, SlotState};
pub use sampler::{AnalogSource, NoIndicator, OneShotSource, Sampler};
pub use timer::{CompareMatch, Prescaler, SoftTimer, TickTimer, TimerError, TimerState};
