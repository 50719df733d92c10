//! `embedded_graphics` support for the frame buffer
//!
//! With the "graphics" feature every primitive, font and image of embedded_graphics can be drawn
//! into a [`FrameBuffer`] which is then sent with [`crate::PCD8544::data`].

use core::convert::{Infallible, TryInto};

use embedded_graphics_core::{pixelcolor::BinaryColor, prelude::*};

use crate::{framebuffer::FrameBuffer, HEIGHT, WIDTH};

const MAX_X: u32 = WIDTH as u32 - 1;
const MAX_Y: u32 = HEIGHT as u32 - 1;

impl DrawTarget for FrameBuffer {
    type Error = Infallible;
    type Color = BinaryColor;

    fn clear(&mut self, color: BinaryColor) -> Result<(), Infallible> {
        self.fill(color.is_on());
        Ok(())
    }

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Ok((x @ 0..=MAX_X, y @ 0..=MAX_Y)) = coord.try_into() {
                self.set_pixel(x as i32, y as i32, color.is_on());
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH.into(), HEIGHT.into())
    }
}
