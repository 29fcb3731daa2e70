//! Settle delay used between clock edges.
//!
//! After SCK rises the chip needs up to 100 ns before DOUT is valid. SCK must
//! stay high at least 200 ns, never more than 50 µs, and must stay low at
//! least 200 ns between pulses. The driver calls [`SettleDelay::settle`] once
//! after every rising edge and once after every falling edge, so the length
//! of one settle bounds both phases of every pulse.
//!
//! [`HalDelay::new`] waits the full 200 ns pulse width per settle.
//! [`CycleDelay::for_cpu_hz`] only guarantees the 100 ns DOUT-valid time; on
//! fast cores where the pin writes themselves are quicker than 100 ns, use
//! [`HalDelay`] or [`CycleDelay::from_cycles`] with a count covering 200 ns.
//! How long a busy-wait takes depends on the core clock, so the delay is
//! calibrated per target instead of being hard-coded in the protocol loop.

use embedded_hal::delay::DelayNs;

use crate::params::{DOUT_SETTLE_NS, SCK_MIN_PULSE_NS};

/// Short fixed delay inserted after clock edges.
///
/// Implementations must be constant-time and must stay far below
/// [`SCK_MAX_HIGH_US`](crate::params::SCK_MAX_HIGH_US).
pub trait SettleDelay {
    /// Waits for the calibrated settle time.
    fn settle(&mut self);
}

/// Busy-wait calibrated in CPU cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleDelay {
    cycles: u32,
}

impl CycleDelay {
    /// Spins for exactly `cycles` iterations per settle.
    pub const fn from_cycles(cycles: u32) -> Self {
        Self { cycles }
    }

    /// Calibrates for a core running at `cpu_hz` so each settle lasts at least
    /// [`DOUT_SETTLE_NS`].
    ///
    /// Parts clocked between 10 and 20 MHz get two cycles, slower parts one.
    pub const fn for_cpu_hz(cpu_hz: u32) -> Self {
        let per_cycle = 1_000_000_000 / DOUT_SETTLE_NS;
        let cycles = cpu_hz.div_ceil(per_cycle);
        Self::from_cycles(if cycles == 0 { 1 } else { cycles })
    }

    /// Spin iterations per settle.
    pub const fn cycles(&self) -> u32 {
        self.cycles
    }
}

impl SettleDelay for CycleDelay {
    #[inline(always)]
    fn settle(&mut self) {
        for i in 0..self.cycles {
            core::hint::black_box(i);
            core::hint::spin_loop();
        }
    }
}

/// Settle delay backed by an `embedded-hal` [`DelayNs`] provider.
#[derive(Debug)]
pub struct HalDelay<D> {
    delay: D,
    ns: u32,
}

impl<D: DelayNs> HalDelay<D> {
    /// Waits the minimum SCK pulse width on each settle.
    pub const fn new(delay: D) -> Self {
        Self::with_ns(delay, SCK_MIN_PULSE_NS)
    }

    /// Waits `ns` nanoseconds on each settle.
    pub const fn with_ns(delay: D, ns: u32) -> Self {
        Self { delay, ns }
    }

    /// Consumes the wrapper and returns the delay provider.
    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> SettleDelay for HalDelay<D> {
    #[inline(always)]
    fn settle(&mut self) {
        self.delay.delay_ns(self.ns);
    }
}
