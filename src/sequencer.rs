//! Gain/channel bookkeeping across conversions.
//!
//! The HX711 applies a new selection one conversion late: the trailing pulses
//! sent after conversion N choose the gain of conversion N + 1. The sequencer
//! keeps the selection requested for the next conversion apart from the one
//! that produced the data currently being clocked out.

use crate::params::GainChannel;

/// Pending and last-applied gain/channel selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GainSequencer {
    pending: GainChannel,
    last_applied: GainChannel,
}

impl GainSequencer {
    /// Both selections start at the chip's power-on default.
    pub const fn new() -> Self {
        Self {
            pending: GainChannel::A128,
            last_applied: GainChannel::A128,
        }
    }

    /// Requests `selection` for the next conversion.
    pub fn set_pending(&mut self, selection: GainChannel) {
        self.pending = selection;
    }

    /// Requests the selection named by a raw code.
    ///
    /// Codes outside `1..=3` are ignored and the previous selection is kept.
    /// Returns whether the code was accepted.
    pub fn set_pending_code(&mut self, code: u8) -> bool {
        match GainChannel::from_code(code) {
            Some(selection) => {
                self.pending = selection;
                true
            }
            None => false,
        }
    }

    /// Selection that the next trailing pulses will commit.
    pub const fn pending(&self) -> GainChannel {
        self.pending
    }

    /// Selection that produced the data of the conversion in progress.
    pub const fn last_applied(&self) -> GainChannel {
        self.last_applied
    }

    /// Ends a conversion whose trailing pulses committed `committed`.
    ///
    /// Returns the tag for the sample just read, then remembers `committed`
    /// as the selection of the following conversion.
    pub fn advance(&mut self, committed: GainChannel) -> GainChannel {
        core::mem::replace(&mut self.last_applied, committed)
    }

    /// The chip left power-down and is back on its default selection.
    pub fn chip_reset(&mut self) {
        self.last_applied = GainChannel::A128;
    }
}

impl Default for GainSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_lags_requested_selection_by_one_conversion() {
        let mut gains = GainSequencer::new();
        gains.set_pending(GainChannel::B32);

        let tag_n = gains.advance(gains.pending());
        assert_eq!(tag_n, GainChannel::A128);

        let tag_n1 = gains.advance(gains.pending());
        assert_eq!(tag_n1, GainChannel::B32);
    }

    #[test]
    fn invalid_codes_keep_previous_selection() {
        let mut gains = GainSequencer::new();
        assert!(gains.set_pending_code(3));
        assert_eq!(gains.pending(), GainChannel::A64);

        for code in [0u8, 4, 7, 0xFF] {
            assert!(!gains.set_pending_code(code));
            assert_eq!(gains.pending(), GainChannel::A64);
        }
    }

    #[test]
    fn chip_reset_only_touches_last_applied() {
        let mut gains = GainSequencer::new();
        gains.set_pending(GainChannel::A64);
        gains.advance(GainChannel::A64);
        assert_eq!(gains.last_applied(), GainChannel::A64);

        gains.chip_reset();
        assert_eq!(gains.last_applied(), GainChannel::A128);
        assert_eq!(gains.pending(), GainChannel::A64);
    }
}
