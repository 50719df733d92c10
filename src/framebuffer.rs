//! In-memory copy of the display DDRAM
//!
//! The layout matches the controller with horizontal addressing: six banks of 84 bytes, every
//! byte a column of 8 pixels with the least significant bit on top. A frame is sent with a single
//! [`crate::PCD8544::data`] call.
//!
//! Coordinates are signed so glyphs can be placed partly outside of the screen, everything that
//! falls outside is clipped.

use crate::{font::Glyph, DDRAM_SIZE, HEIGHT, WIDTH};

#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    buffer: [u8; DDRAM_SIZE],
}

impl FrameBuffer {
    /// an all blank frame
    pub const fn new() -> Self {
        FrameBuffer {
            buffer: [0u8; DDRAM_SIZE],
        }
    }

    pub fn width(&self) -> u8 {
        WIDTH
    }

    pub fn height(&self) -> u8 {
        HEIGHT
    }

    /// the frame in DDRAM order, ready to be sent
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Set or clear every pixel.
    pub fn fill(&mut self, on: bool) {
        let byte = if on { 0xff } else { 0x00 };
        self.buffer = [byte; DDRAM_SIZE];
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, mask)) = Self::locate(x, y) {
            if on {
                self.buffer[index] |= mask;
            } else {
                self.buffer[index] &= !mask;
            }
        }
    }

    /// Pixels outside of the screen read as cleared.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::locate(x, y).map_or(false, |(index, mask)| self.buffer[index] & mask != 0)
    }

    /// Fill the rectangle with its top left corner at (x, y).
    pub fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(width as i32).min(i32::from(WIDTH));
        let y1 = y.saturating_add(height as i32).min(i32::from(HEIGHT));
        for py in y0..y1 {
            for px in x0..x1 {
                self.set_pixel(px, py, on);
            }
        }
    }

    /// Copy a glyph with its top left corner at (x, y).
    ///
    /// Every pixel of the glyph is copied, cleared ones included, so a glyph overwrites whatever
    /// was underneath it.
    pub fn blit(&mut self, glyph: &Glyph, x: i32, y: i32) {
        for gy in 0..glyph.height {
            for gx in 0..glyph.width {
                let on = glyph.pixel(gx, gy);
                self.set_pixel(x + i32::from(gx), y + i32::from(gy), on);
            }
        }
    }

    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if (0..i32::from(WIDTH)).contains(&x) && (0..i32::from(HEIGHT)).contains(&y) {
            let index = (y as usize / 8) * WIDTH as usize + x as usize;
            Some((index, 1 << (y % 8)))
        } else {
            None
        }
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("set_bytes", &self.buffer.iter().filter(|b| **b != 0).count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{BITCOIN, ONE};

    #[test]
    fn pixel_layout_is_banked_columns() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(0, 0, true);
        fb.set_pixel(83, 47, true);
        fb.set_pixel(5, 9, true);
        assert_eq!(fb.as_bytes()[0], 0x01);
        assert_eq!(fb.as_bytes()[DDRAM_SIZE - 1], 0x80);
        assert_eq!(fb.as_bytes()[84 + 5], 0x02);
        assert!(fb.pixel(5, 9));
        fb.set_pixel(5, 9, false);
        assert!(!fb.pixel(5, 9));
    }

    #[test]
    fn out_of_bounds_is_ignored() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(-1, 0, true);
        fb.set_pixel(84, 0, true);
        fb.set_pixel(0, 48, true);
        assert_eq!(fb, FrameBuffer::new());
        assert!(!fb.pixel(-1, -1));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut fb = FrameBuffer::new();
        fb.fill_rect(80, 46, 10, 5, true);
        for x in 0..84 {
            for y in 0..48 {
                assert_eq!(fb.pixel(x, y), x >= 80 && y >= 46, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn fill_sets_everything() {
        let mut fb = FrameBuffer::new();
        fb.fill(true);
        assert!(fb.as_bytes().iter().all(|b| *b == 0xff));
        fb.fill(false);
        assert!(fb.as_bytes().iter().all(|b| *b == 0x00));
    }

    #[test]
    fn blit_copies_set_and_cleared_pixels() {
        let mut fb = FrameBuffer::new();
        fb.fill(true);
        fb.blit(&ONE, 10, 5);
        for gy in 0..ONE.height {
            for gx in 0..ONE.width {
                assert_eq!(
                    fb.pixel(10 + i32::from(gx), 5 + i32::from(gy)),
                    ONE.pixel(gx, gy)
                );
            }
        }
        // untouched outside of the glyph
        assert!(fb.pixel(9, 5));
        assert!(fb.pixel(17, 5));
        assert!(fb.pixel(10, 24));
    }

    #[test]
    fn blit_partly_off_screen() {
        let mut fb = FrameBuffer::new();
        fb.blit(&BITCOIN, -3, 40);
        for gy in 0..8u8 {
            for gx in 3..BITCOIN.width {
                assert_eq!(
                    fb.pixel(i32::from(gx) - 3, 40 + i32::from(gy)),
                    BITCOIN.pixel(gx, gy)
                );
            }
        }
    }
}
