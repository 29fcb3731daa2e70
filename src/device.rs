//! High-level HX711 device driver implementation.
//!
//! The driver owns the clock/data lines, the data-ready notifier, the settle
//! delay, the sample buffer and the gain bookkeeping. Two contexts use it:
//!
//! * the interrupt context calls [`Hx711::on_data_ready`] whenever the data
//!   line transitions; it clocks the conversion out and buffers it;
//! * the foreground context calls [`Hx711::read`] and the control methods.
//!
//! Because every method takes `&mut self`, the two contexts can only share a
//! driver through something that serializes access, such as
//! [`SharedHx711`](crate::shared::SharedHx711).

use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::fifo::{DEFAULT_CAPACITY, SampleFifo};
use crate::interface::{DataReadyNotifier, Hx711Interface};
use crate::params::{DATA_BITS, GainChannel, POWER_DOWN_HOLD_US};
use crate::sample::TaggedSample;
use crate::sequencer::GainSequencer;
use crate::timing::SettleDelay;

/// Interrupt-driven driver for the HX711 load cell ADC.
///
/// `N` is the capacity of the sample buffer.
pub struct Hx711<IFACE, NOTIFY, DELAY, const N: usize = DEFAULT_CAPACITY> {
    interface: IFACE,
    notifier: NOTIFY,
    delay: DELAY,
    config: Config,
    fifo: SampleFifo<N>,
    gains: GainSequencer,
    listening: bool,
    initialized: bool,
    lost: u32,
}

/// Coarse driver state as seen from the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Not initialized and not listening; chip power state unknown.
    Idle,
    /// Chip powered, conversions are buffered.
    Listening,
    /// Chip powered, conversions are not buffered.
    NotListening,
    /// Clock held high; the chip is (or is entering) power-down.
    PoweredDown,
}

impl<IFACE, NOTIFY, DELAY, const N: usize> Hx711<IFACE, NOTIFY, DELAY, N> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance. Call [`init`](Self::init) before use.
    pub fn new(interface: IFACE, notifier: NOTIFY, delay: DELAY, config: Config) -> Self {
        let mut gains = GainSequencer::new();
        gains.set_pending(config.gain);

        Self {
            interface,
            notifier,
            delay,
            config,
            fifo: SampleFifo::new(),
            gains,
            listening: false,
            initialized: false,
            lost: 0,
        }
    }

    /// Consumes the driver and returns the owned collaborators.
    pub fn release(self) -> (IFACE, NOTIFY, DELAY) {
        (self.interface, self.notifier, self.delay)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Provides mutable access to the data-ready notifier.
    pub fn notifier_mut(&mut self) -> &mut NOTIFY {
        &mut self.notifier
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================================================================
    // == Buffer & Loss Accounting ======================================
    // ==================================================================
    /// Number of buffered samples.
    pub fn available(&self) -> usize {
        self.fifo.available()
    }

    /// Capacity of the sample buffer.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Conversions dropped because the buffer was full. Saturates at `u32::MAX`.
    pub fn lost(&self) -> u32 {
        self.lost
    }

    /// Clears the lost-conversion counter.
    pub fn reset_lost(&mut self) {
        self.lost = 0;
    }

    /// Whether produced conversions are being buffered.
    pub fn is_listening(&self) -> bool {
        self.listening
    }

    // ==================================================================
    // == Gain & Channel Selection ======================================
    // ==================================================================
    /// Selects gain and channel for the conversion after the next one.
    ///
    /// The chip only learns the selection from the trailing pulses of the
    /// next read-out, so the sample after that is the first one to use it.
    pub fn set_gain(&mut self, gain: GainChannel) {
        self.gains.set_pending(gain);
    }

    /// Same as [`set_gain`](Self::set_gain) for a raw selection code.
    ///
    /// Codes other than 1, 2 and 3 are ignored.
    pub fn set_gain_code(&mut self, code: u8) {
        if !self.gains.set_pending_code(code) {
            debug!("hx711: ignoring gain code {}", code);
        }
    }

    /// Gain/channel requested for upcoming conversions.
    pub fn gain(&self) -> GainChannel {
        self.gains.pending()
    }

    /// Gain/channel that will tag the next sample read out.
    pub fn last_applied_gain(&self) -> GainChannel {
        self.gains.last_applied()
    }

    fn store(&mut self, sample: TaggedSample) {
        if self.fifo.push(sample) {
            return;
        }

        if self.lost == 0 {
            warn!("hx711: sample buffer full, dropping conversions");
        }
        self.lost = self.lost.saturating_add(1);
        if self.lost == u32::MAX {
            trace!("hx711: lost counter saturated");
        }
    }
}

impl<IFACE, NOTIFY, DELAY, const N: usize> Hx711<IFACE, NOTIFY, DELAY, N>
where
    NOTIFY: DataReadyNotifier,
{
    // ==================================================================
    // == Interrupt Control =============================================
    // ==================================================================
    /// Unmasks the data-ready notification and starts buffering conversions.
    pub fn enable(&mut self) {
        self.notifier.enable_notification();
        self.listening = true;
        debug!("hx711: listening");
    }

    /// Masks the data-ready notification and stops buffering conversions.
    ///
    /// The chip keeps converting; its power state is unaffected.
    pub fn disable(&mut self) {
        self.notifier.disable_notification();
        self.listening = false;
        debug!("hx711: not listening");
    }
}

impl<IFACE, NOTIFY, DELAY, CommE, const N: usize> Hx711<IFACE, NOTIFY, DELAY, N>
where
    IFACE: Hx711Interface<Error = CommE>,
    NOTIFY: DataReadyNotifier,
    DELAY: SettleDelay,
{
    // ==================================================================
    // == Initialization ================================================
    // ==================================================================
    /// Resets driver state from the configuration and powers the chip up.
    ///
    /// Clears the buffer and the lost counter, requests `config.gain` for the
    /// next conversion and, if `config.listen_on_init` is set, enables
    /// listening.
    pub fn init(&mut self) -> Result<(), CommE> {
        self.disable();
        self.fifo.clear();
        self.lost = 0;
        self.gains = GainSequencer::new();
        self.gains.set_pending(self.config.gain);

        self.power_up()?;
        self.initialized = true;
        debug!("hx711: initialized, gain {}", self.config.gain);

        if self.config.listen_on_init {
            self.enable();
        }
        Ok(())
    }

    /// Returns the current driver state.
    pub fn state(&mut self) -> Result<DriverState, CommE> {
        if !self.initialized && !self.listening {
            return Ok(DriverState::Idle);
        }
        if self.interface.clock_is_high()? {
            return Ok(DriverState::PoweredDown);
        }

        Ok(if self.listening {
            DriverState::Listening
        } else {
            DriverState::NotListening
        })
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Whether the chip signals a finished conversion (data line low).
    pub fn is_ready(&mut self) -> Result<bool, CommE> {
        self.interface.data_ready().map_err(Error::from)
    }

    /// Pops the oldest buffered sample.
    ///
    /// With an empty buffer and a ready chip the conversion is clocked out
    /// right here, with the data-ready notification masked, and returned
    /// without being buffered. Returns [`Error::NotReady`] otherwise.
    pub fn read(&mut self) -> Result<TaggedSample, CommE> {
        if let Some(sample) = self.fifo.pop() {
            return Ok(sample);
        }
        if !self.is_ready()? {
            return Err(Error::NotReady);
        }

        let listening = self.listening;
        if listening {
            self.notifier.disable_notification();
        }
        let sample = critical_section::with(|_| self.run_conversion());
        if listening {
            self.notifier.enable_notification();
        }
        sample
    }

    /// Data-ready interrupt handler.
    ///
    /// Spurious calls (data line high) return without touching the clock.
    /// When not listening the conversion is still clocked out so the gain
    /// sequence stays correct, but the sample is discarded.
    pub fn on_data_ready(&mut self) -> Result<(), CommE> {
        if !self.interface.data_ready()? {
            return Ok(());
        }

        let sample = self.run_conversion()?;
        if self.listening {
            self.store(sample);
        }
        Ok(())
    }

    /// Clocks one conversion out of the chip and tags it.
    ///
    /// The caller must have seen the data line low. Shifts 24 bits MSB first,
    /// then sends the pulses that commit the pending gain/channel. The sample
    /// is tagged with the selection that produced it.
    pub fn run_conversion(&mut self) -> Result<TaggedSample, CommE> {
        let mut raw = 0u32;
        for _ in 0..DATA_BITS {
            let bit = self.clock_bit()?;
            raw = (raw << 1) | u32::from(bit);
        }

        let next = self.gains.pending();
        for _ in 0..next.pulses() {
            self.clock_gain_pulse()?;
        }

        let tag = self.gains.advance(next);
        Ok(TaggedSample::from_parts(raw, tag))
    }

    #[inline(always)]
    fn clock_bit(&mut self) -> Result<bool, CommE> {
        self.interface.set_clock(true)?;
        self.delay.settle();
        let bit = self.interface.data_is_high()?;
        self.interface.set_clock(false)?;
        self.delay.settle();
        Ok(bit)
    }

    #[inline(always)]
    fn clock_gain_pulse(&mut self) -> Result<(), CommE> {
        self.interface.set_clock(true)?;
        self.delay.settle();
        self.interface.set_clock(false)?;
        self.delay.settle();
        Ok(())
    }

    // ==================================================================
    // == Power Control =================================================
    // ==================================================================
    /// Raises the clock line and leaves it high.
    ///
    /// The chip enters power-down once the line has been high for 60 µs. The
    /// caller must not request conversions until [`power_up`](Self::power_up).
    pub fn power_down(&mut self) -> Result<(), CommE> {
        self.interface.set_clock(true)?;
        debug!("hx711: power down");
        Ok(())
    }

    /// [`power_down`](Self::power_down), then waits out the hold time.
    pub fn power_down_blocking(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.power_down()?;
        delay.delay_us(POWER_DOWN_HOLD_US);
        Ok(())
    }

    /// Lowers the clock line, waking the chip if it was powered down.
    ///
    /// The chip comes out of power-down on its default selection, so the
    /// last-applied gain is reset when the line was high before this call.
    pub fn power_up(&mut self) -> Result<(), CommE> {
        let was_powered_down = self.interface.clock_is_high()?;
        if was_powered_down {
            self.gains.chip_reset();
            debug!("hx711: power up");
        }
        self.interface.set_clock(false)?;
        Ok(())
    }
}
