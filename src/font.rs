//! Bitmap font for the price ticker
//!
//! Large digits (19 px tall, variable width) and a bitcoin symbol that is two pixels taller than
//! the digits. The bitmaps use the same layout as the PCD8544 DDRAM: one byte per column inside
//! 8 pixel high bands, least significant bit on top. That way a glyph can be copied into a
//! [`FrameBuffer`](crate::framebuffer::FrameBuffer) without any conversion.

/// A fixed-size monochrome bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    /// width in pixels, also the horizontal advance of the glyph
    pub width: u8,
    /// height in pixels
    pub height: u8,
    /// packed pixel data, `ceil(height / 8) * width` bytes
    pub data: &'static [u8],
}

impl Glyph {
    /// Returns whether the pixel at (x, y) inside the glyph is set.
    ///
    /// Coordinates outside of the glyph read as unset.
    pub fn pixel(&self, x: u8, y: u8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = (y / 8) as usize * self.width as usize + x as usize;
        self.data
            .get(index)
            .map_or(false, |byte| byte & (1 << (y % 8)) != 0)
    }

    /// number of 8 pixel bands the glyph spans
    pub fn bands(&self) -> u8 {
        (self.height + 7) / 8
    }
}

/// The bitcoin currency symbol, drawn one pixel above the digit baseline.
pub const BITCOIN: Glyph = Glyph {
    width: 15,
    height: 21,
    data: &[
        0x18, 0x18, 0xf8, 0xf8, 0xff, 0xff, 0x18, 0x1f, 0x1f, 0x38, 0x78, 0xf8, 0xf0, 0xe0, 0x00,
        0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0x06, 0x06, 0x06, 0x06, 0x8f, 0xdf, 0xff, 0xfd, 0xf8,
        0x03, 0x03, 0x03, 0x03, 0x1f, 0x1f, 0x03, 0x1f, 0x1f, 0x03, 0x03, 0x03, 0x03, 0x01, 0x00,
    ],
};

pub const ZERO: Glyph = Glyph {
    width: 15,
    height: 19,
    data: &[
        0xc0, 0xf0, 0xfc, 0x3c, 0x0e, 0x07, 0x07, 0x07, 0x07, 0x0f, 0x1e, 0x3e, 0xfc, 0xf0, 0xc0,
        0x1f, 0x7f, 0xff, 0xe0, 0xc0, 0x80, 0x00, 0x00, 0x00, 0x00, 0x80, 0xe0, 0xff, 0x7f, 0x1f,
        0x00, 0x00, 0x01, 0x03, 0x03, 0x07, 0x07, 0x07, 0x07, 0x07, 0x03, 0x01, 0x01, 0x00, 0x00,
    ],
};

pub const ONE: Glyph = Glyph {
    width: 7,
    height: 19,
    data: &[
        0x04, 0x0e, 0x0e, 0x0e, 0xff, 0xff, 0xff,
        0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff,
        0x00, 0x00, 0x00, 0x00, 0x07, 0x07, 0x07,
    ],
};

pub const TWO: Glyph = Glyph {
    width: 13,
    height: 19,
    data: &[
        0x00, 0x18, 0x3c, 0x1e, 0x0e, 0x07, 0x07, 0x07, 0x07, 0x0f, 0xfe, 0xfc, 0xf8,
        0x00, 0x80, 0x80, 0xc0, 0xe0, 0xf0, 0x78, 0x3c, 0x1e, 0x0f, 0x07, 0x03, 0x00,
        0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07,
    ],
};

pub const THREE: Glyph = Glyph {
    width: 13,
    height: 19,
    data: &[
        0x00, 0x07, 0x07, 0x07, 0x07, 0xc7, 0xe7, 0xf7, 0x7f, 0x3f, 0x1f, 0x0f, 0x07,
        0x80, 0xc0, 0xc0, 0x80, 0x03, 0x03, 0x03, 0x03, 0x07, 0x8f, 0xfe, 0xfe, 0xf8,
        0x00, 0x01, 0x03, 0x03, 0x07, 0x07, 0x07, 0x07, 0x07, 0x03, 0x03, 0x01, 0x00,
    ],
};

pub const FOUR: Glyph = Glyph {
    width: 16,
    height: 19,
    data: &[
        0x00, 0x00, 0x00, 0x00, 0x80, 0xc0, 0xe0, 0xf0, 0x7c, 0x1e, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00,
        0x10, 0x78, 0x7c, 0x7f, 0x7f, 0x73, 0x71, 0x70, 0x70, 0x70, 0xff, 0xff, 0xff, 0x70, 0x70, 0x70,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x07, 0x07, 0x07, 0x00, 0x00, 0x00,
    ],
};

pub const FIVE: Glyph = Glyph {
    width: 13,
    height: 19,
    data: &[
        0x00, 0xff, 0xff, 0xff, 0x87, 0x87, 0x87, 0x87, 0x87, 0x07, 0x07, 0x07, 0x00,
        0x80, 0xc3, 0x87, 0x83, 0x03, 0x03, 0x03, 0x03, 0x03, 0x87, 0xff, 0xfe, 0x7c,
        0x01, 0x03, 0x03, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x03, 0x03, 0x01, 0x00,
    ],
};

pub const SIX: Glyph = Glyph {
    width: 13,
    height: 19,
    data: &[
        0xc0, 0xf0, 0xfc, 0x3e, 0x0e, 0x87, 0x87, 0x87, 0x87, 0x0f, 0x1e, 0x06, 0x00,
        0x3f, 0xff, 0xff, 0x87, 0x03, 0x03, 0x03, 0x03, 0x03, 0x87, 0xff, 0xfe, 0x78,
        0x00, 0x00, 0x01, 0x03, 0x07, 0x07, 0x07, 0x07, 0x07, 0x03, 0x03, 0x01, 0x00,
    ],
};

pub const SEVEN: Glyph = Glyph {
    width: 13,
    height: 19,
    data: &[
        0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0xc7, 0xf7, 0xff, 0x7f, 0x1f, 0x07,
        0x00, 0x00, 0x00, 0xc0, 0xf0, 0xfc, 0x7f, 0x1f, 0x07, 0x01, 0x00, 0x00, 0x00,
        0x00, 0x04, 0x07, 0x07, 0x07, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ],
};

pub const EIGHT: Glyph = Glyph {
    width: 14,
    height: 19,
    data: &[
        0x00, 0x78, 0xfc, 0xfe, 0x8f, 0x07, 0x07, 0x07, 0x07, 0x8f, 0xfe, 0xfc, 0x78, 0x00,
        0xf0, 0xf8, 0xfc, 0x8f, 0x0f, 0x07, 0x07, 0x07, 0x07, 0x0f, 0x8f, 0xfd, 0xf8, 0xf0,
        0x00, 0x01, 0x03, 0x03, 0x07, 0x07, 0x07, 0x07, 0x07, 0x07, 0x03, 0x03, 0x01, 0x00,
    ],
};

pub const NINE: Glyph = Glyph {
    width: 13,
    height: 19,
    data: &[
        0xf0, 0xfc, 0xfe, 0x0e, 0x07, 0x07, 0x07, 0x07, 0x0f, 0x1e, 0xfc, 0xf8, 0xe0,
        0x01, 0x87, 0x8f, 0x0f, 0x1e, 0x1c, 0x1c, 0x1c, 0x8e, 0xc7, 0xff, 0x7f, 0x1f,
        0x01, 0x03, 0x03, 0x07, 0x07, 0x07, 0x07, 0x07, 0x03, 0x03, 0x01, 0x00, 0x00,
    ],
};

/// Digits indexed by their value.
pub const DIGITS: [Glyph; 10] = [ZERO, ONE, TWO, THREE, FOUR, FIVE, SIX, SEVEN, EIGHT, NINE];

/// Looks up the glyph of a decimal digit.
pub fn digit(c: char) -> Option<&'static Glyph> {
    c.to_digit(10).map(|d| &DIGITS[d as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyph_data_matches_declared_size() {
        for glyph in DIGITS.iter().chain(core::iter::once(&BITCOIN)) {
            assert_eq!(
                glyph.data.len(),
                glyph.bands() as usize * glyph.width as usize
            );
        }
    }

    #[test]
    fn digit_widths() {
        let widths: [u8; 10] = [15, 7, 13, 13, 16, 13, 13, 13, 14, 13];
        for (glyph, width) in DIGITS.iter().zip(widths.iter()) {
            assert_eq!(glyph.width, *width);
            assert_eq!(glyph.height, 19);
        }
        assert_eq!(BITCOIN.width, 15);
        assert_eq!(BITCOIN.height, 21);
    }

    #[test]
    fn digit_lookup() {
        assert_eq!(digit('4'), Some(&FOUR));
        assert_eq!(digit('x'), None);
        assert_eq!(digit('.'), None);
    }

    #[test]
    fn pixel_reads_column_bands() {
        // first column of "1" is 0x04 in the top band
        assert!(!ONE.pixel(0, 0));
        assert!(ONE.pixel(0, 2));
        // stem of "1" runs the full height
        assert!(ONE.pixel(4, 0));
        assert!(ONE.pixel(4, 18));
        assert!(!ONE.pixel(4, 19));
        assert!(!ONE.pixel(7, 0));
    }
}
