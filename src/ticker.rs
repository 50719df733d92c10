//! # Bitcoin price ticker
//!
//! Shows the price in large digits, centred, with the bitcoin symbol in front of it. The bottom
//! two pixel rows are a progress bar that grows by one pixel per second, when it reaches the right
//! edge the next price is fetched.
//!
//! ```text
//!   fetch, draw, wait 1s
//!   84 times: grow bar by 1px, send frame, wait 1s
//!   repeat until cancelled
//! ```
//!
//! The ticker talks to the display through [`FrameSink`], which the [`crate::PCD8544`] driver
//! implements.

use core::convert::Infallible;
use core::fmt::{self, Write};
use core::sync::atomic::{AtomicBool, Ordering};

use hal::blocking::delay::DelayMs;
use heapless::String;

use crate::{
    feed::PriceFeed,
    font::{self, BITCOIN},
    framebuffer::FrameBuffer,
    HEIGHT, WIDTH,
};

/// A display that takes whole frames.
pub trait FrameSink {
    type Error;

    fn width(&self) -> u8;

    fn height(&self) -> u8;

    /// Send a complete frame in DDRAM order.
    fn write_frame(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    fn set_backlight(&mut self, on: bool) -> Result<(), Self::Error>;
}

/// Asked by [`Ticker::run`] before every step whether it should stop.
pub trait CancelToken {
    fn is_cancelled(&self) -> bool;
}

/// Set the flag (from an interrupt or signal handler) to stop the ticker.
impl CancelToken for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Acquire)
    }
}

impl<T: CancelToken + ?Sized> CancelToken for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// A token that is never cancelled, the ticker runs until an error occurs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Forever;

impl CancelToken for Forever {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// What [`Ticker::run`] does when the price could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedErrorPolicy {
    /// stop and return the error
    Abort,
    /// keep showing the last price and try again after the next progress cycle
    SkipFrame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickerConfig {
    /// space between two glyphs in pixels
    pub gap: u8,
    /// top row of the digits, the symbol sits one row higher
    pub baseline: i32,
    /// top row of the progress bar
    pub bar_y: i32,
    /// height of the progress bar in pixels
    pub bar_height: u8,
    /// progress steps (seconds) between two prices
    pub steps: u8,
    /// length of one step in milliseconds
    pub tick_ms: u16,
    /// switch the backlight on when the ticker is created
    pub backlight: bool,
    pub on_feed_error: FeedErrorPolicy,
}

impl TickerConfig {
    pub fn with_feed_error_policy(mut self, policy: FeedErrorPolicy) -> Self {
        self.on_feed_error = policy;
        self
    }

    pub fn with_tick_ms(mut self, tick_ms: u16) -> Self {
        self.tick_ms = tick_ms;
        self
    }

    pub fn with_backlight(mut self, backlight: bool) -> Self {
        self.backlight = backlight;
        self
    }
}

impl Default for TickerConfig {
    fn default() -> Self {
        TickerConfig {
            gap: 2,
            // roughly (height - font height - bar height) / 2
            baseline: 13,
            bar_y: HEIGHT as i32 - 2,
            bar_height: 2,
            steps: WIDTH,
            tick_ms: 1000,
            backlight: true,
            on_feed_error: FeedErrorPolicy::Abort,
        }
    }
}

/// Horizontal placement of a rendered price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// symbol, digits and a gap after every glyph
    pub total_width: i32,
    /// left edge of the symbol, negative if the price is wider than the display
    pub start_x: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickerError<SinkE, FeedE = Infallible> {
    /// the text to draw contains something else than decimal digits
    InvalidDigit(char),
    /// sending a frame failed
    Sink(SinkE),
    /// the price feed is unavailable
    Feed(FeedE),
    /// the sink is not an 84x48 display
    Geometry { width: u8, height: u8 },
    /// the number does not fit the text buffer
    Format,
}

impl<SinkE> TickerError<SinkE, Infallible> {
    fn widen<FeedE>(self) -> TickerError<SinkE, FeedE> {
        match self {
            TickerError::InvalidDigit(c) => TickerError::InvalidDigit(c),
            TickerError::Sink(e) => TickerError::Sink(e),
            TickerError::Feed(never) => match never {},
            TickerError::Geometry { width, height } => TickerError::Geometry { width, height },
            TickerError::Format => TickerError::Format,
        }
    }
}

impl<SinkE: fmt::Debug, FeedE: fmt::Debug> fmt::Display for TickerError<SinkE, FeedE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickerError::InvalidDigit(c) => write!(f, "cannot draw {:?}, only digits", c),
            TickerError::Sink(e) => write!(f, "display failed: {:?}", e),
            TickerError::Feed(e) => write!(f, "price feed unavailable: {:?}", e),
            TickerError::Geometry { width, height } => write!(
                f,
                "display is {}x{}, expected {}x{}",
                width, height, WIDTH, HEIGHT
            ),
            TickerError::Format => f.write_str("number too long to draw"),
        }
    }
}

#[cfg(feature = "std")]
impl<SinkE: fmt::Debug, FeedE: fmt::Debug> std::error::Error for TickerError<SinkE, FeedE> {}

pub struct Ticker<S> {
    sink: S,
    frame: FrameBuffer,
    config: TickerConfig,
}

impl<S: FrameSink> Ticker<S> {
    /// Fails with [`TickerError::Geometry`] unless the sink is 84x48 pixels.
    pub fn new(mut sink: S, config: TickerConfig) -> Result<Self, TickerError<S::Error>> {
        let (width, height) = (sink.width(), sink.height());
        if (width, height) != (WIDTH, HEIGHT) {
            return Err(TickerError::Geometry { width, height });
        }
        if config.backlight {
            sink.set_backlight(true).map_err(TickerError::Sink)?;
        }
        Ok(Ticker {
            sink,
            frame: FrameBuffer::new(),
            config,
        })
    }

    /// the frame as it was last sent
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn release(self) -> S {
        self.sink
    }

    /// Measure `text` and centre it on the display.
    pub fn layout(&self, text: &str) -> Result<Layout, TickerError<S::Error>> {
        let gap = i32::from(self.config.gap);
        let mut total_width = i32::from(BITCOIN.width) + gap;
        for c in text.chars() {
            let glyph = font::digit(c).ok_or(TickerError::InvalidDigit(c))?;
            total_width += i32::from(glyph.width) + gap;
        }
        let start_x = (i32::from(self.frame.width()) - total_width).div_euclid(2);
        Ok(Layout {
            total_width,
            start_x,
        })
    }

    /// Render `text` (decimal digits only) behind the bitcoin symbol.
    ///
    /// The display is blanked first, then the finished frame is sent. The progress bar is gone
    /// afterwards.
    pub fn draw(&mut self, text: &str) -> Result<(), TickerError<S::Error>> {
        let layout = self.layout(text)?;

        self.frame.fill(false);
        self.flush()?;

        let gap = i32::from(self.config.gap);
        let baseline = self.config.baseline;
        let mut x = layout.start_x;

        self.frame.blit(&BITCOIN, x, baseline - 1);
        x += i32::from(BITCOIN.width) + gap;

        for glyph in text.chars().filter_map(font::digit) {
            self.frame.blit(glyph, x, baseline);
            x += i32::from(glyph.width) + gap;
        }

        self.flush()
    }

    /// Draw the whole part of `price`.
    pub fn draw_price(&mut self, price: f64) -> Result<(), TickerError<S::Error>> {
        // saturates: negative and NaN become 0
        let whole = price as u32;
        // u32::MAX has ten digits
        let digits = decimal::<S::Error, 10>(whole)?;
        self.draw(&digits)
    }

    /// Fetch a price and draw it.
    pub fn update<F: PriceFeed>(
        &mut self,
        feed: &mut F,
    ) -> Result<(), TickerError<S::Error, F::Error>> {
        let price = feed.fetch().map_err(TickerError::Feed)?;
        log::info!("new price {}", price);
        self.draw_price(price).map_err(TickerError::widen)
    }

    /// Grow the progress bar to `step` pixels and send the frame.
    pub fn advance_progress(&mut self, step: u8) -> Result<(), TickerError<S::Error>> {
        self.frame.fill_rect(
            0,
            self.config.bar_y,
            u32::from(step),
            u32::from(self.config.bar_height),
            true,
        );
        self.flush()
    }

    /// Fetch, draw and count down until `cancel` says stop.
    ///
    /// The token is checked before every fetch and every progress step, so the loop ends at
    /// most one tick after cancellation.
    pub fn run<F, D, C>(
        &mut self,
        feed: &mut F,
        delay: &mut D,
        cancel: &C,
    ) -> Result<(), TickerError<S::Error, F::Error>>
    where
        F: PriceFeed,
        D: DelayMs<u16>,
        C: CancelToken + ?Sized,
    {
        loop {
            if cancel.is_cancelled() {
                log::info!("ticker stopped");
                return Ok(());
            }

            let skip = self.config.on_feed_error == FeedErrorPolicy::SkipFrame;
            match self.update(feed) {
                Ok(()) => {}
                Err(TickerError::Feed(_)) if skip => {
                    log::warn!("price feed unavailable, keeping the last price");
                    self.reset_progress();
                }
                Err(e) => return Err(e),
            }
            delay.delay_ms(self.config.tick_ms);

            for step in 1..=self.config.steps {
                if cancel.is_cancelled() {
                    log::info!("ticker stopped");
                    return Ok(());
                }
                self.advance_progress(step).map_err(TickerError::widen)?;
                delay.delay_ms(self.config.tick_ms);
            }
        }
    }

    fn reset_progress(&mut self) {
        self.frame.fill_rect(
            0,
            self.config.bar_y,
            u32::from(WIDTH),
            u32::from(self.config.bar_height),
            false,
        );
    }

    fn flush(&mut self) -> Result<(), TickerError<S::Error>> {
        self.sink
            .write_frame(self.frame.as_bytes())
            .map_err(TickerError::Sink)
    }
}

fn decimal<SinkE, const N: usize>(value: u32) -> Result<String<N>, TickerError<SinkE>> {
    let mut digits = String::new();
    write!(digits, "{}", value).map_err(|_| TickerError::Format)?;
    Ok(digits)
}
