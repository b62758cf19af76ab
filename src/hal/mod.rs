pub mod adc;
pub mod gpio;
pub mod power;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use adc::{Adc, AdcChannel};
pub use gpio::board;
pub use power::Power;
pub use timer::SampleTimer;
pub use uart::Uart;
