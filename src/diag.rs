//! Human readable diagnostic lines on the sample stream.
//!
//! Every line starts with a bracketed level tag (`[INF]`, `[ERR]`, ...), which
//! keeps it from parsing as a `<sequence>,<value>` record on the receiving end.

use ufmt::{uDisplay, uWrite, uwriteln, Formatter};

use crate::config::{SamplerConfig, FIRMWARE_NAME, FIRMWARE_VERSION};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error,
    Info,
    Debug,
}

impl Level {
    pub const fn tag(self) -> &'static str {
        match self {
            Level::Error => "[ERR]",
            Level::Info => "[INF]",
            Level::Debug => "[DBG]",
        }
    }

    /// Debug lines are compiled in only with the `debug` feature.
    #[inline]
    pub const fn enabled(self) -> bool {
        match self {
            Level::Debug => cfg!(feature = "debug"),
            _ => true,
        }
    }
}

impl uDisplay for Level {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str(self.tag())
    }
}

/// Write `msg` as one diagnostic line.
pub fn emit<W, M>(out: &mut W, level: Level, msg: &M) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
    M: uDisplay + ?Sized,
{
    if !level.enabled() {
        return Ok(());
    }
    uwriteln!(out, "{} {}", level, msg)
}

pub fn error<W, M>(out: &mut W, msg: &M) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
    M: uDisplay + ?Sized,
{
    emit(out, Level::Error, msg)
}

pub fn debug<W, M>(out: &mut W, msg: &M) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
    M: uDisplay + ?Sized,
{
    emit(out, Level::Debug, msg)
}

/// Startup banner, printed once before the timer starts.
pub fn banner<W>(out: &mut W, config: &SamplerConfig) -> Result<(), W::Error>
where
    W: uWrite + ?Sized,
{
    uwriteln!(out, "{} {} v{}", Level::Info, FIRMWARE_NAME, FIRMWARE_VERSION)?;
    uwriteln!(
        out,
        "{} ADC{} @ {} Hz, {}-bit",
        Level::Info,
        config.channel,
        config.frequency_hz,
        config.resolution.bits()
    )
}
