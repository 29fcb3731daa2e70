//! Test doubles: a behavioral model of the HX711 serial interface and a
//! notifier that records mask/unmask calls.

use core::convert::Infallible;

use crate::interface::{DataReadyNotifier, Hx711Interface};
use crate::params::{DATA_BITS, GainChannel};

/// Models the chip side of the clock/data protocol.
///
/// A loaded conversion pulls DOUT low. Each rising SCK edge shifts the next
/// bit out MSB first; after the 24th edge DOUT returns high and further edges
/// are counted as gain selection pulses.
#[derive(Debug, Default)]
pub(crate) struct SimulatedChip {
    clock_high: bool,
    value: u32,
    active: bool,
    rising_edges: u32,
    dout_high: bool,
    data_samples: u32,
}

impl SimulatedChip {
    pub(crate) fn new() -> Self {
        Self {
            dout_high: true,
            ..Self::default()
        }
    }

    /// Finishes a conversion and signals it ready.
    pub(crate) fn load(&mut self, value: u32) {
        self.value = value & 0x00FF_FFFF;
        self.active = true;
        self.rising_edges = 0;
        self.dout_high = false;
    }

    /// Pulses seen after the data bits of the current read-out.
    pub(crate) fn trailing_pulses(&self) -> u32 {
        self.rising_edges.saturating_sub(u32::from(DATA_BITS))
    }

    /// Selection the chip will use for its next conversion.
    pub(crate) fn selected(&self) -> Option<GainChannel> {
        u8::try_from(self.trailing_pulses())
            .ok()
            .and_then(GainChannel::from_code)
    }

    pub(crate) fn rising_edges(&self) -> u32 {
        self.rising_edges
    }

    pub(crate) fn data_samples(&self) -> u32 {
        self.data_samples
    }

    pub(crate) fn clock_level(&self) -> bool {
        self.clock_high
    }
}

impl Hx711Interface for SimulatedChip {
    type Error = Infallible;

    fn set_clock(&mut self, high: bool) -> Result<(), Self::Error> {
        if high && !self.clock_high && self.active {
            self.rising_edges += 1;
            let shift = u32::from(DATA_BITS).checked_sub(self.rising_edges);
            self.dout_high = match shift {
                Some(shift) => (self.value >> shift) & 1 == 1,
                None => true,
            };
        }
        self.clock_high = high;
        Ok(())
    }

    fn clock_is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.clock_high)
    }

    fn data_is_high(&mut self) -> Result<bool, Self::Error> {
        self.data_samples += 1;
        Ok(self.dout_high)
    }
}

/// Tracks the mask state of the data-ready notification.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RecordingNotifier {
    pub(crate) enabled: bool,
    pub(crate) enables: u32,
    pub(crate) disables: u32,
}

impl DataReadyNotifier for RecordingNotifier {
    fn enable_notification(&mut self) {
        self.enabled = true;
        self.enables += 1;
    }

    fn disable_notification(&mut self) {
        self.enabled = false;
        self.disables += 1;
    }
}
