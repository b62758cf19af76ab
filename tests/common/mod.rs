#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;

use ufmt::uWrite;

/// Serial line stand-in that keeps everything written to it.
#[derive(Default)]
pub struct Capture {
    pub text: String,
}

impl Capture {
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }

    /// Lines that are data records rather than diagnostics.
    pub fn records(&self) -> Vec<&str> {
        self.lines()
            .into_iter()
            .filter(|line| !line.starts_with('['))
            .collect()
    }
}

impl uWrite for Capture {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.text.push_str(s);
        Ok(())
    }
}

/// Writer that appends to a buffer the test keeps hold of, for code that
/// takes the writer by value and never gives it back.
pub struct Shared<'a>(pub &'a RefCell<String>);

impl uWrite for Shared<'_> {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        self.0.borrow_mut().push_str(s);
        Ok(())
    }
}

/// Transport that accepts nothing.
pub struct Unplugged;

#[derive(Debug, PartialEq)]
pub struct Disconnected;

impl uWrite for Unplugged {
    type Error = Disconnected;

    fn write_str(&mut self, _s: &str) -> Result<(), Disconnected> {
        Err(Disconnected)
    }
}

/// Triangle wave between 0 and `max`, one step per reading.
pub fn ramp(max: u16) -> impl FnMut() -> u16 {
    let mut value = 0u16;
    let mut rising = true;
    move || {
        let current = value;
        if rising && value == max {
            rising = false;
        } else if !rising && value == 0 {
            rising = true;
        }
        value = if rising { value + 1 } else { value - 1 };
        current
    }
}
