//! Strongly typed parameter enumerations for the HX711 driver.
//!
//! The HX711 has no register map: the input channel and gain of the *next*
//! conversion are selected by the number of clock pulses sent after the 24
//! data bits. [`GainChannel`] encodes that pulse count directly, and the same
//! code is stamped into bits 30–31 of every [`TaggedSample`](crate::sample::TaggedSample).
//!
//! # Examples
//!
//! ```rust
//! use hx711_irq::params::{Channel, GainChannel};
//!
//! let selection = GainChannel::B32;
//! assert_eq!(selection.pulses(), 2);
//! assert_eq!(selection.channel(), Channel::B);
//! assert_eq!(GainChannel::try_from(3), Ok(GainChannel::A64));
//! ```

use modular_bitfield::prelude::Specifier;

/// Number of data bits clocked out per conversion.
pub const DATA_BITS: u8 = 24;

/// DOUT becomes valid at most this long after the SCK rising edge (T2).
pub const DOUT_SETTLE_NS: u32 = 100;
/// Minimum SCK high and low time (T3, T4).
pub const SCK_MIN_PULSE_NS: u32 = 200;
/// SCK must not stay high longer than this during a read-out (T3 max).
pub const SCK_MAX_HIGH_US: u32 = 50;
/// SCK held high this long puts the chip into power-down mode.
pub const POWER_DOWN_HOLD_US: u32 = 60;

/// Analog input channel of the HX711.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Channel A (gain 128 or 64).
    A,
    /// Channel B (fixed gain 32).
    B,
}

/// Input channel and gain selection, encoded as the number of trailing clock pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum GainChannel {
    /// Channel A, gain 128. Power-on default of the chip.
    A128 = 1,
    /// Channel B, gain 32.
    B32 = 2,
    /// Channel A, gain 64.
    A64 = 3,
}

impl GainChannel {
    /// Raw selection code (also the tag value stored in samples).
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Trailing clock pulses that commit this selection for the next conversion.
    pub const fn pulses(self) -> u8 {
        self as u8
    }

    /// Input channel used by this selection.
    pub const fn channel(self) -> Channel {
        match self {
            Self::A128 | Self::A64 => Channel::A,
            Self::B32 => Channel::B,
        }
    }

    /// Amplifier gain factor.
    pub const fn factor(self) -> u8 {
        match self {
            Self::A128 => 128,
            Self::B32 => 32,
            Self::A64 => 64,
        }
    }

    /// Decodes a raw selection code, returning `None` outside `1..=3`.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::A128),
            2 => Some(Self::B32),
            3 => Some(Self::A64),
            _ => None,
        }
    }
}

impl Default for GainChannel {
    fn default() -> Self {
        Self::A128
    }
}

/// Raw code that does not name a [`GainChannel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidGainCode(pub u8);

impl TryFrom<u8> for GainChannel {
    type Error = InvalidGainCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or(InvalidGainCode(code))
    }
}

impl From<GainChannel> for u8 {
    fn from(value: GainChannel) -> Self {
        value.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulses_match_datasheet_table() {
        assert_eq!(GainChannel::A128.pulses(), 1);
        assert_eq!(GainChannel::B32.pulses(), 2);
        assert_eq!(GainChannel::A64.pulses(), 3);
    }

    #[test]
    fn channel_and_factor() {
        assert_eq!(GainChannel::A128.channel(), Channel::A);
        assert_eq!(GainChannel::A64.channel(), Channel::A);
        assert_eq!(GainChannel::B32.channel(), Channel::B);
        assert_eq!(GainChannel::A64.factor(), 64);
    }

    #[test]
    fn codes_outside_range_are_rejected() {
        assert_eq!(GainChannel::try_from(0), Err(InvalidGainCode(0)));
        assert_eq!(GainChannel::try_from(4), Err(InvalidGainCode(4)));
        assert_eq!(GainChannel::try_from(255), Err(InvalidGainCode(255)));
        for code in 1..=3u8 {
            let gain = GainChannel::try_from(code).unwrap();
            assert_eq!(u8::from(gain), code);
        }
    }

    #[test]
    fn default_is_power_on_selection() {
        assert_eq!(GainChannel::default(), GainChannel::A128);
    }
}
