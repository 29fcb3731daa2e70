//! Line and interrupt abstractions required by the HX711 driver.

pub mod gpio;

/// Access to the two wires of the HX711: PD_SCK (output) and DOUT (input).
///
/// Implementations are expected to have configured pin directions already:
/// SCK as a push-pull output, DOUT as an input.
pub trait Hx711Interface {
    /// Error type produced by the concrete pin implementation.
    type Error;

    /// Drives the clock line.
    fn set_clock(&mut self, high: bool) -> core::result::Result<(), Self::Error>;

    /// Reads back the level the clock line is currently driven to.
    fn clock_is_high(&mut self) -> core::result::Result<bool, Self::Error>;

    /// Samples the data line.
    fn data_is_high(&mut self) -> core::result::Result<bool, Self::Error>;

    /// DOUT low outside a read-out means a conversion is ready.
    fn data_ready(&mut self) -> core::result::Result<bool, Self::Error> {
        self.data_is_high().map(|high| !high)
    }
}

/// Masks and unmasks the "data ready" notification of the interrupt controller.
///
/// The platform must route that notification to
/// [`Hx711::on_data_ready`](crate::device::Hx711::on_data_ready) and must not
/// deliver it re-entrantly.
pub trait DataReadyNotifier {
    /// Unmasks the data-line transition interrupt.
    fn enable_notification(&mut self);

    /// Masks the data-line transition interrupt.
    fn disable_notification(&mut self);
}

/// Notifier for setups without a data-ready interrupt.
///
/// Samples are then only obtained through the synchronous fallback of
/// [`Hx711::read`](crate::device::Hx711::read) or by calling
/// [`Hx711::on_data_ready`](crate::device::Hx711::on_data_ready) from a poll loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Polled;

impl DataReadyNotifier for Polled {
    fn enable_notification(&mut self) {}

    fn disable_notification(&mut self) {}
}

impl<T: DataReadyNotifier + ?Sized> DataReadyNotifier for &mut T {
    fn enable_notification(&mut self) {
        T::enable_notification(self)
    }

    fn disable_notification(&mut self) {
        T::disable_notification(self)
    }
}
