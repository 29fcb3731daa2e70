//! Process-wide driver slot for fixed-signature interrupt handlers.
//!
//! Interrupt entry points take no arguments, so the handler has to reach the
//! driver through a `static`. [`SharedHx711`] is that static: the driver is
//! registered once at start-up with [`install`](SharedHx711::install) and must
//! stay installed for as long as the data-ready notification is enabled.
//!
//! ```ignore
//! static ADC: SharedHx711<Hx711<Pins, ExtiLine, CycleDelay>> = SharedHx711::new();
//!
//! #[interrupt]
//! fn EXTI0() {
//!     let _ = ADC.on_data_ready();
//! }
//!
//! fn main() -> ! {
//!     let mut adc = Hx711::new(pins, exti, CycleDelay::for_cpu_hz(16_000_000), Config::default());
//!     adc.init().ok();
//!     adc.enable();
//!     ADC.install(adc);
//!     loop {
//!         if let Some(Ok(sample)) = ADC.with(|adc| adc.read()) {
//!             // ...
//!         }
//!     }
//! }
//! ```
//!
//! Every access runs inside a critical section, so the foreground can never
//! be interrupted halfway through updating the buffer indices, on any target.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::device::Hx711;
use crate::error::Result;
use crate::interface::{DataReadyNotifier, Hx711Interface};
use crate::timing::SettleDelay;

/// Critical-section guarded slot holding at most one driver.
pub struct SharedHx711<D> {
    slot: Mutex<RefCell<Option<D>>>,
}

impl<D> SharedHx711<D> {
    /// Creates an empty slot, usable in a `static` initializer.
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(None)),
        }
    }

    /// Registers `driver`, returning the one previously installed.
    pub fn install(&self, driver: D) -> Option<D> {
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).replace(driver))
    }

    /// Removes and returns the installed driver.
    ///
    /// Disable the data-ready notification first; afterwards the interrupt
    /// handler finds the slot empty and does nothing.
    pub fn take(&self) -> Option<D> {
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).take())
    }

    /// Whether a driver currently occupies the slot.
    pub fn is_installed(&self) -> bool {
        critical_section::with(|cs| self.slot.borrow_ref(cs).is_some())
    }

    /// Runs `f` on the installed driver inside a critical section.
    ///
    /// Returns `None` when no driver is installed.
    pub fn with<R>(&self, f: impl FnOnce(&mut D) -> R) -> Option<R> {
        critical_section::with(|cs| self.slot.borrow_ref_mut(cs).as_mut().map(f))
    }
}

impl<D> Default for SharedHx711<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<IFACE, NOTIFY, DELAY, CommE, const N: usize> SharedHx711<Hx711<IFACE, NOTIFY, DELAY, N>>
where
    IFACE: Hx711Interface<Error = CommE>,
    NOTIFY: DataReadyNotifier,
    DELAY: SettleDelay,
{
    /// Interrupt trampoline: forwards to [`Hx711::on_data_ready`].
    ///
    /// Does nothing when no driver is installed.
    pub fn on_data_ready(&self) -> Result<(), CommE> {
        self.with(|adc| adc.on_data_ready()).unwrap_or(Ok(()))
    }
}
