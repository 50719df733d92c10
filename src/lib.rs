//! # PCD8544 driver and price ticker
//!
//! Driver for the Philips PCD8544 LCD controller found in the Nokia 5110/3310 displays, built on
//! the `embedded_hal` traits, and a small bitcoin price ticker application on top of it.
//!
//! The driver ([`PCD8544`]) keeps a mirror of the controller configuration (power, addressing,
//! instruction set, display mode, temperature coefficient, bias and operating voltage) so that
//! commands which are only valid in one of the two instruction sets are refused before they reach
//! the wire. See the [`instructions`] module for the command encoding and [`state`] for the
//! legality rules.
//!
//! The ticker ([`ticker::Ticker`]) renders a price with the large bitmap digits from [`font`]
//! into a [`framebuffer::FrameBuffer`], hands it to the driver and advances a one pixel progress
//! bar every second until the next price is due.
//!
//! Features:
//!  - `graphics`: implements the `embedded_graphics` `DrawTarget` for the frame buffer
//!  - `std`: parsing of the CoinDesk price document and `std::error::Error` impls
//!  - `defmt`: `defmt::Format` for the plain enums
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(unsafe_code)]

extern crate embedded_hal as hal;

pub mod config;
pub mod display;
pub mod dummypins;
pub mod error;
pub mod feed;
pub mod font;
pub mod framebuffer;
pub mod instructions;
pub mod state;
pub mod ticker;

#[cfg(feature = "graphics")]
mod drawtarget;

pub use config::{BacklightPolarity, Config};
pub use display::PCD8544;
pub use error::{Argument, Error};
pub use instructions::prelude::*;
pub use state::ControllerState;

/// width of the display in pixels
pub const WIDTH: u8 = 84;

/// height of the display in pixels
pub const HEIGHT: u8 = 48;

/// number of 8 pixel high rows (banks) of the DDRAM
pub const ROWS: u8 = HEIGHT / 8;

/// size of the DDRAM in bytes, one bit per pixel
pub const DDRAM_SIZE: usize = WIDTH as usize * ROWS as usize;
