//! GPIO interface implementation built on top of `embedded-hal` digital pins.

use embedded_hal::digital::{InputPin, PinState, StatefulOutputPin};

use super::Hx711Interface;

/// Two-pin interface for the HX711 driver.
///
/// `SCK` must be stateful so the driver can read back the level it drives,
/// which is how power-down is detected on [`power_up`](crate::device::Hx711::power_up).
pub struct GpioInterface<SCK, DOUT> {
    sck: SCK,
    dout: DOUT,
}

impl<SCK, DOUT> GpioInterface<SCK, DOUT> {
    /// Creates a new interface from an output clock pin and an input data pin.
    pub const fn new(sck: SCK, dout: DOUT) -> Self {
        Self { sck, dout }
    }

    /// Provides mutable access to the clock pin.
    pub fn sck_mut(&mut self) -> &mut SCK {
        &mut self.sck
    }

    /// Provides mutable access to the data pin.
    pub fn dout_mut(&mut self) -> &mut DOUT {
        &mut self.dout
    }

    /// Consumes the interface and returns the owned pins.
    pub fn release(self) -> (SCK, DOUT) {
        (self.sck, self.dout)
    }
}

impl<SCK, DOUT, E> Hx711Interface for GpioInterface<SCK, DOUT>
where
    SCK: StatefulOutputPin<Error = E>,
    DOUT: InputPin<Error = E>,
{
    type Error = E;

    #[inline(always)]
    fn set_clock(&mut self, high: bool) -> core::result::Result<(), Self::Error> {
        self.sck.set_state(PinState::from(high))
    }

    fn clock_is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        self.sck.is_set_high()
    }

    #[inline(always)]
    fn data_is_high(&mut self) -> core::result::Result<bool, Self::Error> {
        self.dout.is_high()
    }
}
