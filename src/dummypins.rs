//! # Placeholder output pin
//!
//! Stands in for the optional external power line when the display is powered permanently, or
//! for the LIGHT pin when the backlight is driven by other code (PWM for example).
//!
//! The error type is a parameter so the dummy fits next to real pins of any HAL.

use core::convert::Infallible;
use core::marker::PhantomData;

use hal::digital::v2::OutputPin;

/// An OutputPin that does nothing.
pub struct DummyOutputPin<E = Infallible> {
    _error: PhantomData<E>,
}

impl<E> DummyOutputPin<E> {
    pub const fn new() -> Self {
        DummyOutputPin {
            _error: PhantomData,
        }
    }
}

impl<E> Default for DummyOutputPin<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> core::fmt::Debug for DummyOutputPin<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("DummyOutputPin")
    }
}

impl<E> OutputPin for DummyOutputPin<E> {
    type Error = E;

    fn set_low(&mut self) -> Result<(), E> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), E> {
        Ok(())
    }
}
