//! Configuration primitives for the HX711 driver.

use crate::params::GainChannel;

/// User-facing configuration for the HX711 driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Gain/channel requested for the first conversion after start-up.
    pub gain: GainChannel,
    /// Unmask the data-ready notification at the end of `init()`.
    pub listen_on_init: bool,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the gain/channel selection.
    pub fn gain(mut self, gain: GainChannel) -> Self {
        self.config.gain = gain;
        self
    }

    /// Starts listening for conversions as part of initialization.
    pub fn listen_on_init(mut self, listen: bool) -> Self {
        self.config.listen_on_init = listen;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gain: GainChannel::A128,
            listen_on_init: false,
        }
    }
}
