//! Bit layout of the 32-bit tagged sample word.
//!
//! ```text
//!  31 30 29        24 23                              0
//! +-----+------------+--------------------------------+
//! | tag |  reserved  |  24-bit two's complement data  |
//! +-----+------------+--------------------------------+
//! ```
//!
//! The tag is the [`GainChannel`] code of the conversion that produced the
//! data, which is the selection committed one conversion earlier.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::GainChannel;

/// Mask of the data bits inside the sample word.
pub const READING_MASK: u32 = 0x00FF_FFFF;
/// Bit position of the gain/channel tag.
pub const TAG_SHIFT: u32 = 30;
/// Largest reading the chip reports (positive full scale).
pub const MAX_READING: i32 = 0x7F_FFFF;
/// Smallest reading the chip reports (negative full scale).
pub const MIN_READING: i32 = -0x80_0000;

/// Raw conversion result stamped with the gain/channel that produced it.
#[allow(unused_parens)]
#[bitfield(bits = 32)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TaggedSample {
    // Conversion data exactly as shifted out, MSB first (bits 23:0).
    pub raw: B24,
    #[skip]
    __: B6,
    // Gain/channel tag (bits 31:30). Read through `gain_channel`: words
    // built from arbitrary `u32`s may carry the unused code 0.
    #[skip(getters)]
    pub gain: GainChannel,
}

impl TaggedSample {
    /// Packs a 24-bit conversion result with its gain/channel tag.
    ///
    /// Bits above the 24 data bits of `raw` are discarded.
    pub fn from_parts(raw: u32, gain: GainChannel) -> Self {
        Self::new().with_raw(raw & READING_MASK).with_gain(gain)
    }

    /// Returns the whole 32-bit word.
    pub fn bits(self) -> u32 {
        u32::from_le_bytes(self.into_bytes())
    }

    /// Sign-extends the 24-bit data to a signed reading.
    pub fn reading(self) -> i32 {
        ((self.raw() << 8) as i32) >> 8
    }

    /// Decodes the tag, `None` when the word carries no valid selection.
    pub fn gain_channel(self) -> Option<GainChannel> {
        GainChannel::from_code((self.bits() >> TAG_SHIFT) as u8)
    }
}

impl core::fmt::Debug for TaggedSample {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TaggedSample")
            .field("raw", &self.raw())
            .field("gain", &self.gain_channel())
            .finish()
    }
}

impl From<u32> for TaggedSample {
    fn from(value: u32) -> Self {
        Self::from_bytes(value.to_le_bytes())
    }
}

impl From<TaggedSample> for u32 {
    fn from(value: TaggedSample) -> Self {
        value.bits()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TaggedSample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "TaggedSample {{ reading: {}, gain: {} }}",
            self.reading(),
            self.gain_channel()
        );
    }
}
