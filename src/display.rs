//! # Main driver for the PCD8544
//!
//! The [`PCD8544`] struct owns the SPI bus, the control pins and a delay provider. It keeps a
//! mirror of the controller configuration ([`ControllerState`]) because the chip cannot be read
//! back, and uses it to refuse commands that belong to the instruction set which is not active.
//!
//! Typically you want to look into the following functions:
//!  - [`PCD8544::new`] to create and initialize a driver instance
//!  - [`PCD8544::data`] to send a frame buffer to the DDRAM
//!  - [`PCD8544::set_contrast`] to change the contrast of the display
//!  - [`PCD8544::set_light`] to enable or disable the backlight
//!
//! The other setters configure the controller register by register. They follow the rules of the
//! data sheet: the extended commands (temperature coefficient, bias, Vop) are only accepted after
//! switching to the extended instruction set with [`PCD8544::set_instruction_set`], while the
//! display mode and the cursor position need the basic instruction set.
use hal::blocking::delay::{DelayMs, DelayUs};
use hal::blocking::spi::Write as SpiWrite;
use hal::digital::v2::OutputPin;

use crate::{
    config::Config,
    dummypins::DummyOutputPin,
    error::{Argument, Error},
    instructions::{prelude::*, Instruction::*},
    state::{millivolts_to_vop, ControllerState},
    ticker::FrameSink,
    DDRAM_SIZE, HEIGHT, ROWS, WIDTH,
};

/// RST has to be held low for at least 100ns, keep some margin
const RESET_PULSE_US: u16 = 100;

/// time the charge pump needs to discharge before the supply may be cut
const POWER_DOWN_SETTLE_MS: u16 = 10;

#[derive(Debug, Clone, Copy)]
enum Transfer {
    Command,
    Data,
}

/// State keeping driver for the PCD8544
pub struct PCD8544<SPI, DC, CE, RST, LIGHT, PWR, DELAY> {
    spi: SPI,
    dc: DC,
    ce: CE,
    rst: RST,
    light: LIGHT,
    power: Option<PWR>,
    delay: DELAY,
    config: Config,
    state: ControllerState,
}

impl<SPI, DC, CE, RST, LIGHT, DELAY, SpiE, PinE>
    PCD8544<SPI, DC, CE, RST, LIGHT, DummyOutputPin<PinE>, DELAY>
where
    SPI: SpiWrite<u8, Error = SpiE>,
    DC: OutputPin<Error = PinE>,
    CE: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
    LIGHT: OutputPin<Error = PinE>,
    DELAY: DelayUs<u16> + DelayMs<u16>,
{
    /// Create and initialize a driver for a display that is powered permanently.
    ///
    /// Arguments:
    ///
    /// - spi: SPI bus in mode 0, at most 4MHz
    /// - dc: Data/Command, a GPIO OutputPin connected to DC on the display
    /// - ce: Chip Enable, a GPIO OutputPin connected to CE on the display
    /// - rst: Reset, a GPIO OutputPin connected to RST on the display
    /// - light: a GPIO OutputPin connected to the backlight, see [`Config::backlight`]
    /// - delay: used for the reset pulse and the power down sequence
    ///
    /// The display is reset, configured with `config.contrast` and cleared.
    pub fn new(
        spi: SPI,
        dc: DC,
        ce: CE,
        rst: RST,
        light: LIGHT,
        delay: DELAY,
        config: Config,
    ) -> Result<Self, Error<SpiE, PinE>> {
        Self::init(spi, dc, ce, rst, light, None, delay, config)
    }
}

impl<SPI, DC, CE, RST, LIGHT, PWR, DELAY, SpiE, PinE> PCD8544<SPI, DC, CE, RST, LIGHT, PWR, DELAY>
where
    SPI: SpiWrite<u8, Error = SpiE>,
    DC: OutputPin<Error = PinE>,
    CE: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
    LIGHT: OutputPin<Error = PinE>,
    PWR: OutputPin<Error = PinE>,
    DELAY: DelayUs<u16> + DelayMs<u16>,
{
    /// Like [`PCD8544::new`], for a display whose supply is switched by the `power` pin.
    #[allow(clippy::too_many_arguments)]
    pub fn with_power(
        spi: SPI,
        dc: DC,
        ce: CE,
        rst: RST,
        light: LIGHT,
        power: PWR,
        delay: DELAY,
        config: Config,
    ) -> Result<Self, Error<SpiE, PinE>> {
        Self::init(spi, dc, ce, rst, light, Some(power), delay, config)
    }

    #[allow(clippy::too_many_arguments)]
    fn init(
        spi: SPI,
        dc: DC,
        ce: CE,
        rst: RST,
        light: LIGHT,
        power: Option<PWR>,
        delay: DELAY,
        config: Config,
    ) -> Result<Self, Error<SpiE, PinE>> {
        let mut pcd = PCD8544 {
            spi,
            dc,
            ce,
            rst,
            light,
            power,
            delay,
            config,
            state: ControllerState::default(),
        };

        log::debug!("initializing PCD8544 with {:?}", config);

        pcd.light_off()?;
        pcd.power_on()?;
        pcd.ce.set_high().map_err(Error::Pin)?;

        // the controller is in an undefined state until it got a reset pulse after power up,
        // running it that way can damage the glass
        pcd.reset()?;
        pcd.set_contrast(config.contrast)?;
        pcd.clear()?;

        Ok(pcd)
    }

    /// Switch on the external supply (if there is a power pin) and reset the controller.
    ///
    /// This leaves the controller in its reset state (power down, blank display), nothing is
    /// shown until [`PCD8544::set_contrast`] configured it again.
    pub fn power_on(&mut self) -> Result<(), Error<SpiE, PinE>> {
        if let Some(power) = self.power.as_mut() {
            power.set_high().map_err(Error::Pin)?;
        }
        self.reset()
    }

    /// Hardware reset with the RST pin.
    ///
    /// The mirrored state goes back to the power on defaults. Backlight and power pin are left
    /// alone.
    pub fn reset(&mut self) -> Result<(), Error<SpiE, PinE>> {
        self.rst.set_low().map_err(Error::Pin)?;
        self.delay.delay_us(RESET_PULSE_US);
        self.rst.set_high().map_err(Error::Pin)?;

        self.state = ControllerState::default();
        log::debug!("reset PCD8544");
        Ok(())
    }

    /// Blank the display, put the controller in power down mode and cut the external supply.
    ///
    /// The DDRAM is cleared first, the data sheet requires that for the specified standby
    /// current. To bring the display back call [`PCD8544::power_on`] and then
    /// [`PCD8544::set_contrast`]: after the reset the controller is still powered down and blank.
    pub fn power_off(&mut self) -> Result<(), Error<SpiE, PinE>> {
        self.clear()?;

        let addressing = self.state.addressing;
        let sequence = [
            FunctionSet {
                power: PowerMode::Active,
                addressing,
                instruction_set: InstructionSet::Basic,
            },
            SetDisplayMode(DisplayMode::Blank),
            FunctionSet {
                power: PowerMode::PowerDown,
                addressing,
                instruction_set: InstructionSet::Basic,
            },
        ];
        self.run_script(&sequence)?;

        self.delay.delay_ms(POWER_DOWN_SETTLE_MS);
        if let Some(power) = self.power.as_mut() {
            power.set_low().map_err(Error::Pin)?;
        }
        log::debug!("PCD8544 powered down");
        Ok(())
    }

    /// Set the PD bit. Sends the function set right away if `send` is true.
    ///
    /// Passing `false` allows changing power, addressing and instruction set with a single
    /// command: only the last setter of a batch needs to send. If that send fails, the mirror
    /// keeps the values it had before the failing call.
    pub fn set_power(&mut self, power: PowerMode, send: bool) -> Result<(), Error<SpiE, PinE>> {
        self.update_function_set(|state| state.power = power, send)
    }

    /// Set the V bit (horizontal or vertical addressing), see [`PCD8544::set_power`] for `send`.
    pub fn set_addressing_mode(
        &mut self,
        addressing: AddressingMode,
        send: bool,
    ) -> Result<(), Error<SpiE, PinE>> {
        self.update_function_set(|state| state.addressing = addressing, send)
    }

    /// Set the H bit (basic or extended instructions), see [`PCD8544::set_power`] for `send`.
    pub fn set_instruction_set(
        &mut self,
        instruction_set: InstructionSet,
        send: bool,
    ) -> Result<(), Error<SpiE, PinE>> {
        self.update_function_set(|state| state.instruction_set = instruction_set, send)
    }

    /// Blank, all segments on, normal or inverse video. Needs the basic instruction set.
    pub fn set_display_mode(&mut self, mode: DisplayMode) -> Result<(), Error<SpiE, PinE>> {
        self.write_instruction(SetDisplayMode(mode))
    }

    /// Needs the extended instruction set.
    pub fn set_temperature_coefficient(
        &mut self,
        coefficient: TemperatureCoefficient,
    ) -> Result<(), Error<SpiE, PinE>> {
        self.write_instruction(SetTemperatureCoefficient(coefficient))
    }

    /// Needs the extended instruction set.
    pub fn set_bias(&mut self, bias: Bias) -> Result<(), Error<SpiE, PinE>> {
        self.write_instruction(SetBias(bias))
    }

    /// Set the operating voltage (Vop) in millivolts, 3060..=10680 in steps of 60.
    ///
    /// Values between two steps are rounded down. Needs the extended instruction set.
    pub fn set_contrast_voltage(&mut self, millivolts: u16) -> Result<(), Error<SpiE, PinE>> {
        let vop = millivolts_to_vop(millivolts).ok_or(Argument::ContrastVoltage(millivolts))?;
        self.write_instruction(SetVop(vop))
    }

    /// Configure the display for normal operation with the given Set Vop byte (0x80..=0xff).
    ///
    /// Sends one command block: extended instructions, TC2, bias 1:7, `contrast`, back to basic
    /// instructions with the chip active, normal display mode. Works from either instruction set.
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), Error<SpiE, PinE>> {
        if contrast < 0x80 {
            return Err(Argument::Contrast(contrast).into());
        }
        let script = [
            FunctionSet {
                power: PowerMode::Active,
                addressing: AddressingMode::Horizontal,
                instruction_set: InstructionSet::Extended,
            },
            SetTemperatureCoefficient(TemperatureCoefficient::TC2),
            SetBias(Bias::Bias1To7),
            SetVop(contrast & 0x7f),
            FunctionSet {
                power: PowerMode::Active,
                addressing: AddressingMode::Horizontal,
                instruction_set: InstructionSet::Basic,
            },
            SetDisplayMode(DisplayMode::Normal),
        ];
        self.run_script(&script)
    }

    /// Move the DDRAM cursor to column `x` (0..84) and bank `y` (0..6).
    ///
    /// Needs the basic instruction set.
    pub fn set_position(&mut self, x: u8, y: u8) -> Result<(), Error<SpiE, PinE>> {
        if x >= WIDTH {
            return Err(Argument::X(x).into());
        }
        if y >= ROWS {
            return Err(Argument::Y(y).into());
        }
        let (column, bank) = (SetXAddress(x), SetYAddress(y));
        self.check(&column)?;
        self.check(&bank)?;
        self.command(&[column.byte(), bank.byte()])
    }

    /// Zero the whole DDRAM and leave the cursor at (0, 0).
    pub fn clear(&mut self) -> Result<(), Error<SpiE, PinE>> {
        self.set_position(0, 0)?;
        self.data(&[0u8; DDRAM_SIZE])?;
        self.set_position(0, 0)
    }

    /// Enable or disable the backlight, honouring [`Config::backlight`].
    pub fn set_light(&mut self, enabled: bool) -> Result<(), Error<SpiE, PinE>> {
        if self.config.backlight.level(enabled) {
            self.light.set_high().map_err(Error::Pin)
        } else {
            self.light.set_low().map_err(Error::Pin)
        }
    }

    pub fn light_on(&mut self) -> Result<(), Error<SpiE, PinE>> {
        self.set_light(true)
    }

    pub fn light_off(&mut self) -> Result<(), Error<SpiE, PinE>> {
        self.set_light(false)
    }

    /// Send raw command bytes.
    ///
    /// Nothing is checked and the mirrored state is not updated, prefer the setters.
    pub fn command(&mut self, commands: &[u8]) -> Result<(), Error<SpiE, PinE>> {
        self.transfer(Transfer::Command, commands)
    }

    /// Send bytes to the DDRAM at the current cursor position.
    ///
    /// With horizontal addressing a full frame of [`DDRAM_SIZE`] bytes wraps the cursor back to
    /// where it started.
    pub fn data(&mut self, data: &[u8]) -> Result<(), Error<SpiE, PinE>> {
        self.transfer(Transfer::Data, data)
    }

    /// the mirrored controller configuration
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn width(&self) -> u8 {
        WIDTH
    }

    pub fn height(&self) -> u8 {
        HEIGHT
    }

    /// Give back the bus, the pins and the delay.
    #[allow(clippy::type_complexity)]
    pub fn release(self) -> (SPI, DC, CE, RST, LIGHT, Option<PWR>, DELAY) {
        (
            self.spi, self.dc, self.ce, self.rst, self.light, self.power, self.delay,
        )
    }

    fn update_function_set(
        &mut self,
        update: impl FnOnce(&mut ControllerState),
        send: bool,
    ) -> Result<(), Error<SpiE, PinE>> {
        let previous = self.state;
        update(&mut self.state);
        if !send {
            return Ok(());
        }
        let function_set = self.state.function_set();
        let sent = self.command(&[function_set.byte()]);
        if sent.is_err() {
            // the controller never saw the new bits
            self.state = previous;
        }
        sent
    }

    fn check(&self, instruction: &Instruction) -> Result<(), Error<SpiE, PinE>> {
        self.state.permits(instruction).map_err(|e| {
            log::warn!(
                "refusing {:?}, it needs the {:?} instruction set",
                instruction,
                e.required
            );
            Error::from(e)
        })
    }

    fn write_instruction(&mut self, instruction: Instruction) -> Result<(), Error<SpiE, PinE>> {
        self.check(&instruction)?;
        self.command(&[instruction.byte()])?;
        self.state.apply(instruction);
        Ok(())
    }

    // sends a fixed sequence as a single command block and records its effect afterwards
    fn run_script(&mut self, script: &[Instruction]) -> Result<(), Error<SpiE, PinE>> {
        let mut bytes = [0u8; 8];
        let bytes = &mut bytes[..script.len()];
        for (byte, instruction) in bytes.iter_mut().zip(script) {
            *byte = instruction.byte();
        }
        self.command(bytes)?;
        for instruction in script {
            self.state.apply(*instruction);
        }
        Ok(())
    }

    // DC low means command, DC high means DDRAM data.
    // CE low frames the whole block, not every single byte.
    fn transfer(&mut self, kind: Transfer, bytes: &[u8]) -> Result<(), Error<SpiE, PinE>> {
        log::trace!("{:?} transfer of {} bytes", kind, bytes.len());
        let selected = match kind {
            Transfer::Command => self.dc.set_low(),
            Transfer::Data => self.dc.set_high(),
        };
        selected.map_err(Error::Pin)?;

        self.ce.set_low().map_err(Error::Pin)?;
        let written = self.spi.write(bytes).map_err(Error::Spi);
        self.ce.set_high().map_err(Error::Pin)?;
        written
    }
}

impl<SPI, DC, CE, RST, LIGHT, PWR, DELAY, SpiE, PinE> FrameSink
    for PCD8544<SPI, DC, CE, RST, LIGHT, PWR, DELAY>
where
    SPI: SpiWrite<u8, Error = SpiE>,
    DC: OutputPin<Error = PinE>,
    CE: OutputPin<Error = PinE>,
    RST: OutputPin<Error = PinE>,
    LIGHT: OutputPin<Error = PinE>,
    PWR: OutputPin<Error = PinE>,
    DELAY: DelayUs<u16> + DelayMs<u16>,
{
    type Error = Error<SpiE, PinE>;

    fn width(&self) -> u8 {
        WIDTH
    }

    fn height(&self) -> u8 {
        HEIGHT
    }

    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        self.data(frame)
    }

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error> {
        self.set_light(on)
    }
}
