//! Application layer: startup sequence shared by the firmware and host tests

use ufmt::{uDisplay, uWrite};

use crate::config::SamplerConfig;
use crate::diag;
use crate::timer::TickTimer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sampling {
    Enabled,
    /// Timer could not be configured; the reporter runs but never sees data.
    Disabled,
}

pub struct Application {
    config: SamplerConfig,
    sampling: Sampling,
}

impl Application {
    pub fn new(config: SamplerConfig) -> Self {
        Self {
            config,
            sampling: Sampling::Disabled,
        }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Print the banner, then configure and start the tick timer.
    ///
    /// A timer that rejects the configuration is reported with a single
    /// error line and left stopped. Nothing is retried.
    ///
    /// The timer is set up even when the console fails; the first write
    /// error is returned in that case and [`Application::sampling`] still
    /// tells whether the timer runs.
    pub fn startup<T, W>(&mut self, timer: &mut T, console: &mut W) -> Result<Sampling, W::Error>
    where
        T: TickTimer,
        T::Error: uDisplay,
        W: uWrite + ?Sized,
    {
        let banner = diag::banner(console, &self.config);

        let (sampling, reported) = match timer.configure(self.config.frequency_hz) {
            Ok(()) => {
                timer.start();
                (Sampling::Enabled, diag::debug(console, "timer started"))
            }
            Err(err) => (Sampling::Disabled, diag::error(console, &err)),
        };
        self.sampling = sampling;

        banner.and(reported).map(|()| sampling)
    }
}
