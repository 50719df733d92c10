//! Board specific settings of the driver

/// Level of the LIGHT pin that switches the backlight on.
///
/// This differs between boards: the common red no-name boards light up with the pin pulled low,
/// Adafruit and Sparkfun boards with the pin high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightPolarity {
    ActiveLow,
    ActiveHigh,
}

impl BacklightPolarity {
    /// pin level (high = true) for the requested backlight state
    pub fn level(self, on: bool) -> bool {
        match self {
            BacklightPolarity::ActiveHigh => on,
            BacklightPolarity::ActiveLow => !on,
        }
    }
}

/// Settings applied by [`crate::PCD8544::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// polarity of the LIGHT pin
    pub backlight: BacklightPolarity,
    /// Set Vop command byte sent at start up, in range 0x80..=0xff
    pub contrast: u8,
}

impl Config {
    /// power on contrast, Vop 63 (6.84V)
    pub const DEFAULT_CONTRAST: u8 = 0xbf;

    pub fn with_backlight(mut self, backlight: BacklightPolarity) -> Self {
        self.backlight = backlight;
        self
    }

    pub fn with_contrast(mut self, contrast: u8) -> Self {
        self.contrast = contrast;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            backlight: BacklightPolarity::ActiveLow,
            contrast: Self::DEFAULT_CONTRAST,
        }
    }
}
