//! # Instruction set of the PCD8544
//!
//! All instructions are implemented as enums and so are most of their arguments.
//! The encoding follows the data sheet as close as possible:
//! <https://www.sparkfun.com/datasheets/LCD/Monochrome/Nokia5110.pdf>
//!
//! The controller knows two instruction sets. The "function set" command is valid in both of them
//! and selects the set for the commands that follow:
//!
//! | instruction set | commands                                        |
//! |-----------------|-------------------------------------------------|
//! | basic           | display control, set X address, set Y address   |
//! | extended        | temperature control, bias system, set Vop       |
//!
//! ## Operating voltage (contrast)
//! The LCD segments get darker the higher the operating voltage is. The PCD8544 generates it
//! internally, starting at 3.06V with steps of 60mV, up to 10.68V (7 bit). The Nokia 5110 glass
//! looks best somewhere in the middle of that range, the crate defaults to Vop 63 (6.84V).
//! Be careful with high values in a cold environment, because the temperature compensation adds
//! to it and the crystals get damaged above roughly 8.5V.
//!
//! ## Temperature coefficient
//! The viscosity of the liquid crystals changes with temperature, so the operating voltage has to
//! rise when it gets colder. The coefficient tells the controller by how much.
//!
//! ## Bias system
//! The glass is multiplex driven and the controller needs the bias voltage levels that match the
//! multiplex rate of the glass. The Nokia 5110 is 1:48 which wants a bias of 1:8 (or 1:7).

use core::convert::TryFrom;

use crate::error::Argument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// PD bit of the function set.
pub enum PowerMode {
    /// chip is active
    Active = 0b000,
    /// chip is in power down (standby) mode
    PowerDown = 0b100,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// V bit of the function set, how the DDRAM cursor moves after a data byte.
pub enum AddressingMode {
    /// the X address increments, wrapping into the next bank
    Horizontal = 0b000,
    /// the Y address (bank) increments, wrapping into the next column
    Vertical = 0b010,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// H bit of the function set.
pub enum InstructionSet {
    /// display control and addressing
    Basic = 0b000,
    /// temperature coefficient, bias and operating voltage
    Extended = 0b001,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// The display mode (normal, inversed, all black or all blank).
pub enum DisplayMode {
    /// Show a blank screen (all pixels off)
    Blank = 0b000,

    /// Show a black screen (all pixels on)
    AllOn = 0b001,

    /// Show image from DDRAM, a set bit is a black pixel
    Normal = 0b100,

    /// Show the inverse image from DDRAM, a cleared bit is a black pixel
    Inverse = 0b101,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// The Temperature Coefficient.
///
/// Voltage added to the LCD driver voltage for every Kelvin the temperature drops below 27
/// degrees Celsius.
pub enum TemperatureCoefficient {
    /// Adds 1 mV/K
    TC0 = 0b00,

    /// Adds 9 mV/K
    TC1 = 0b01,

    /// Adds 17 mV/K
    TC2 = 0b10,

    /// Adds 24 mV/K
    TC3 = 0b11,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
/// The bias system (BS2..BS0), named after the resulting bias ratio.
///
/// The recommended multiplex rate of the glass is noted on every variant.
pub enum Bias {
    /// multiplex rate 1:100
    Bias1To11 = 0,
    /// multiplex rate 1:80
    Bias1To10 = 1,
    /// multiplex rate 1:65
    Bias1To9 = 2,
    /// multiplex rate 1:48, the Nokia 5110
    Bias1To8 = 3,
    /// multiplex rate 1:40 or 1:34
    Bias1To7 = 4,
    /// multiplex rate 1:24
    Bias1To6 = 5,
    /// multiplex rate 1:18 or 1:16
    Bias1To5 = 6,
    /// multiplex rate 1:10, 1:9 or 1:8
    Bias1To4 = 7,
}

impl TryFrom<u8> for PowerMode {
    type Error = Argument;

    fn try_from(value: u8) -> Result<Self, Argument> {
        match value {
            0x00 => Ok(PowerMode::Active),
            0x04 => Ok(PowerMode::PowerDown),
            _ => Err(Argument::Power(value)),
        }
    }
}

impl TryFrom<u8> for AddressingMode {
    type Error = Argument;

    fn try_from(value: u8) -> Result<Self, Argument> {
        match value {
            0x00 => Ok(AddressingMode::Horizontal),
            0x02 => Ok(AddressingMode::Vertical),
            _ => Err(Argument::Addressing(value)),
        }
    }
}

impl TryFrom<u8> for InstructionSet {
    type Error = Argument;

    fn try_from(value: u8) -> Result<Self, Argument> {
        match value {
            0x00 => Ok(InstructionSet::Basic),
            0x01 => Ok(InstructionSet::Extended),
            _ => Err(Argument::InstructionSet(value)),
        }
    }
}

/// Parses a complete "display control" command byte (0x08, 0x09, 0x0c or 0x0d).
impl TryFrom<u8> for DisplayMode {
    type Error = Argument;

    fn try_from(value: u8) -> Result<Self, Argument> {
        match value {
            0x08 => Ok(DisplayMode::Blank),
            0x09 => Ok(DisplayMode::AllOn),
            0x0c => Ok(DisplayMode::Normal),
            0x0d => Ok(DisplayMode::Inverse),
            _ => Err(Argument::DisplayMode(value)),
        }
    }
}

/// Parses a complete "temperature control" command byte (0x04..=0x07).
impl TryFrom<u8> for TemperatureCoefficient {
    type Error = Argument;

    fn try_from(value: u8) -> Result<Self, Argument> {
        match value {
            0x04 => Ok(TemperatureCoefficient::TC0),
            0x05 => Ok(TemperatureCoefficient::TC1),
            0x06 => Ok(TemperatureCoefficient::TC2),
            0x07 => Ok(TemperatureCoefficient::TC3),
            _ => Err(Argument::TemperatureCoefficient(value)),
        }
    }
}

/// Parses a complete "bias system" command byte (0x10..=0x17).
impl TryFrom<u8> for Bias {
    type Error = Argument;

    fn try_from(value: u8) -> Result<Self, Argument> {
        use Bias::*;
        const ALL: [Bias; 8] = [
            Bias1To11, Bias1To10, Bias1To9, Bias1To8, Bias1To7, Bias1To6, Bias1To5, Bias1To4,
        ];
        match value {
            0x10..=0x17 => Ok(ALL[(value & 0x07) as usize]),
            _ => Err(Argument::Bias(value)),
        }
    }
}

/// PCD8544 instruction set, both basic and extended instructions, see data sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Instruction {
    /// no operation, do nothing
    // translates to: 0x00
    Nop,

    /// power down, addressing mode and instruction set
    // translates to: 0x20 OR with the lowest three bits PD, V, H
    FunctionSet {
        power: PowerMode,
        addressing: AddressingMode,
        instruction_set: InstructionSet,
    },

    /// set display configuration
    // translates to: 0x08 OR with the DisplayMode bits
    SetDisplayMode(DisplayMode),

    /// set Y address (bank) of DDRAM; 0 <= Y <= 5
    // translates to: 0x40 OR with Y
    SetYAddress(u8),

    /// set X address of DDRAM; 0 <= X <= 83
    // translates to: 0x80 OR with X
    SetXAddress(u8),

    /// set the temperature coefficient of the voltage regulation
    // translates to: 0x04 OR with TC1, TC0
    SetTemperatureCoefficient(TemperatureCoefficient),

    /// set the bias system
    // translates to: 0x10 OR with BS2..BS0
    SetBias(Bias),

    /// set the operating voltage, 3.06V + value * 60mV
    // translates to: 0x80 OR with 7 bits Vop
    SetVop(u8),
}

use Instruction::*;

// Use full binary presentation instead of hex, to look the same as data sheet
impl Instruction {
    /// Returns the specific instruction as a byte which can be sent over a wire.
    ///
    /// Address and Vop arguments are masked to their field width, range checks are up to the
    /// caller (see [`crate::PCD8544`]).
    pub fn byte(self) -> u8 {
        match self {
            Nop => 0b0000_0000,
            FunctionSet {
                power,
                addressing,
                instruction_set,
            } => 0b0010_0000 | power as u8 | addressing as u8 | instruction_set as u8,
            SetDisplayMode(mode) => 0b0000_1000 | mode as u8,
            SetYAddress(y) => 0b0100_0000 | (y & 0b0000_0111),
            SetXAddress(x) => 0b1000_0000 | (x & 0b0111_1111),
            SetTemperatureCoefficient(coeff) => 0b0000_0100 | coeff as u8,
            SetBias(bias) => 0b0001_0000 | bias as u8,
            SetVop(vop) => 0b1000_0000 | (vop & 0b0111_1111),
        }
    }

    /// The instruction set this instruction belongs to.
    ///
    /// `None` for NOP and the function set, they are understood in both sets. This is the single
    /// table the driver consults before sending anything.
    pub fn instruction_set(&self) -> Option<InstructionSet> {
        match self {
            Nop | FunctionSet { .. } => None,
            SetDisplayMode(_) | SetYAddress(_) | SetXAddress(_) => Some(InstructionSet::Basic),
            SetTemperatureCoefficient(_) | SetBias(_) | SetVop(_) => {
                Some(InstructionSet::Extended)
            }
        }
    }
}

/// A prelude for convenience, it pulls all enums into scope.
pub mod prelude {
    pub use super::{
        AddressingMode, Bias, DisplayMode, Instruction, InstructionSet, PowerMode,
        TemperatureCoefficient,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_set_bits() {
        let byte = |power, addressing, instruction_set| {
            FunctionSet {
                power,
                addressing,
                instruction_set,
            }
            .byte()
        };
        use AddressingMode::*;
        use InstructionSet::*;
        use PowerMode::*;
        assert_eq!(byte(Active, Horizontal, Basic), 0x20);
        assert_eq!(byte(Active, Horizontal, Extended), 0x21);
        assert_eq!(byte(Active, Vertical, Basic), 0x22);
        assert_eq!(byte(PowerDown, Horizontal, Basic), 0x24);
        assert_eq!(byte(PowerDown, Vertical, Extended), 0x27);
    }

    #[test]
    fn command_bytes() {
        assert_eq!(Nop.byte(), 0x00);
        assert_eq!(SetDisplayMode(DisplayMode::Blank).byte(), 0x08);
        assert_eq!(SetDisplayMode(DisplayMode::AllOn).byte(), 0x09);
        assert_eq!(SetDisplayMode(DisplayMode::Normal).byte(), 0x0c);
        assert_eq!(SetDisplayMode(DisplayMode::Inverse).byte(), 0x0d);
        assert_eq!(SetTemperatureCoefficient(TemperatureCoefficient::TC2).byte(), 0x06);
        assert_eq!(SetBias(Bias::Bias1To11).byte(), 0x10);
        assert_eq!(SetBias(Bias::Bias1To7).byte(), 0x14);
        assert_eq!(SetBias(Bias::Bias1To4).byte(), 0x17);
        assert_eq!(SetXAddress(83).byte(), 0x80 | 83);
        assert_eq!(SetYAddress(5).byte(), 0x45);
        assert_eq!(SetVop(63).byte(), 0xbf);
    }

    #[test]
    fn raw_bytes_round_into_enums() {
        for raw in 0x10..=0x17u8 {
            let bias = Bias::try_from(raw).unwrap();
            assert_eq!(SetBias(bias).byte(), raw);
        }
        for raw in 0x04..=0x07u8 {
            let tc = TemperatureCoefficient::try_from(raw).unwrap();
            assert_eq!(SetTemperatureCoefficient(tc).byte(), raw);
        }
        for raw in [0x08u8, 0x09, 0x0c, 0x0d].iter() {
            let mode = DisplayMode::try_from(*raw).unwrap();
            assert_eq!(SetDisplayMode(mode).byte(), *raw);
        }
    }

    #[test]
    fn illegal_raw_bytes() {
        assert_eq!(Bias::try_from(0x18), Err(Argument::Bias(0x18)));
        assert_eq!(Bias::try_from(0x0f), Err(Argument::Bias(0x0f)));
        assert_eq!(
            TemperatureCoefficient::try_from(0x08),
            Err(Argument::TemperatureCoefficient(0x08))
        );
        assert_eq!(DisplayMode::try_from(0x0a), Err(Argument::DisplayMode(0x0a)));
        assert_eq!(PowerMode::try_from(0x01), Err(Argument::Power(0x01)));
        assert_eq!(AddressingMode::try_from(0x01), Err(Argument::Addressing(0x01)));
        assert_eq!(InstructionSet::try_from(0x02), Err(Argument::InstructionSet(0x02)));
    }

    #[test]
    fn instruction_set_table() {
        assert_eq!(Nop.instruction_set(), None);
        assert_eq!(SetXAddress(0).instruction_set(), Some(InstructionSet::Basic));
        assert_eq!(SetYAddress(0).instruction_set(), Some(InstructionSet::Basic));
        assert_eq!(
            SetDisplayMode(DisplayMode::Normal).instruction_set(),
            Some(InstructionSet::Basic)
        );
        assert_eq!(SetVop(0).instruction_set(), Some(InstructionSet::Extended));
        assert_eq!(SetBias(Bias::Bias1To8).instruction_set(), Some(InstructionSet::Extended));
    }
}
