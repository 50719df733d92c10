//! Errors of the PCD8544 driver

use core::fmt;

use crate::instructions::InstructionSet;
use crate::state::WrongInstructionSet;

/// A rejected argument together with the value that was passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Argument {
    /// raw power mode, must be 0x00 or 0x04
    Power(u8),
    /// raw addressing mode, must be 0x00 or 0x02
    Addressing(u8),
    /// raw instruction set, must be 0x00 or 0x01
    InstructionSet(u8),
    /// raw display mode command, must be one of 0x08, 0x09, 0x0c, 0x0d
    DisplayMode(u8),
    /// raw temperature control command, must be in 0x04..=0x07
    TemperatureCoefficient(u8),
    /// raw bias system command, must be in 0x10..=0x17
    Bias(u8),
    /// operating voltage in millivolts, must be in 3060..=10680
    ContrastVoltage(u16),
    /// contrast (Vop command byte), must be in 0x80..=0xff
    Contrast(u8),
    /// column, must be below 84
    X(u8),
    /// bank, must be below 6
    Y(u8),
}

/// Errors of the driver.
///
/// `InvalidArgument` and `InvalidState` are raised before anything is sent to the display, the
/// mirrored controller state is left untouched in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<SpiE, PinE> {
    /// an argument was out of range
    InvalidArgument(Argument),
    /// the command is not available in the current instruction set
    InvalidState {
        required: InstructionSet,
        current: InstructionSet,
    },
    /// writing to the SPI bus failed
    Spi(SpiE),
    /// setting one of the control pins failed
    Pin(PinE),
}

impl<SpiE, PinE> From<Argument> for Error<SpiE, PinE> {
    fn from(argument: Argument) -> Self {
        Error::InvalidArgument(argument)
    }
}

impl<SpiE, PinE> From<WrongInstructionSet> for Error<SpiE, PinE> {
    fn from(e: WrongInstructionSet) -> Self {
        Error::InvalidState {
            required: e.required,
            current: e.current,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Power(v) => write!(f, "power mode {:#04x}, expected 0x00 or 0x04", v),
            Argument::Addressing(v) => {
                write!(f, "addressing mode {:#04x}, expected 0x00 or 0x02", v)
            }
            Argument::InstructionSet(v) => {
                write!(f, "instruction set {:#04x}, expected 0x00 or 0x01", v)
            }
            Argument::DisplayMode(v) => write!(
                f,
                "display mode {:#04x}, expected 0x08, 0x09, 0x0c or 0x0d",
                v
            ),
            Argument::TemperatureCoefficient(v) => write!(
                f,
                "temperature coefficient {:#04x}, expected 0x04..=0x07",
                v
            ),
            Argument::Bias(v) => write!(f, "bias {:#04x}, expected 0x10..=0x17", v),
            Argument::ContrastVoltage(v) => {
                write!(f, "voltage {}mV, expected 3060..=10680mV", v)
            }
            Argument::Contrast(v) => write!(f, "contrast {:#04x}, expected 0x80..=0xff", v),
            Argument::X(v) => write!(f, "x {}, expected 0..84", v),
            Argument::Y(v) => write!(f, "y {}, expected 0..6", v),
        }
    }
}

impl<SpiE: fmt::Debug, PinE: fmt::Debug> fmt::Display for Error<SpiE, PinE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(argument) => write!(f, "invalid argument: {}", argument),
            Error::InvalidState { required, current } => write!(
                f,
                "command needs the {:?} instruction set, controller is in {:?}",
                required, current
            ),
            Error::Spi(e) => write!(f, "spi write failed: {:?}", e),
            Error::Pin(e) => write!(f, "control pin failed: {:?}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Argument {}

#[cfg(feature = "std")]
impl<SpiE: fmt::Debug, PinE: fmt::Debug> std::error::Error for Error<SpiE, PinE> {}
