//! Runs the ticker against a display that only exists in the log.
//!
//! The price comes from a canned CoinDesk document whose rate drifts a little on every fetch, the
//! wire traffic is logged at trace level. After a few cycles the last frame is printed.
//!
//! ```text
//! RUST_LOG=trace cargo run --example ticker --features std -- EUR
//! ```

use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::blocking::spi::Write as SpiWrite;
use pcd8544_ticker::{
    dummypins::DummyOutputPin,
    feed::{coindesk_url, parse_coindesk, FnFeed},
    ticker::{Ticker, TickerConfig},
    Config, PCD8544, HEIGHT, WIDTH,
};

/// milliseconds per progress step, the real display uses a second
const TICK_MS: u16 = 5;

/// complete price cycles before the demo stops
const CYCLES: u64 = 3;

struct LoggingSpi;

impl SpiWrite<u8> for LoggingSpi {
    type Error = Infallible;

    fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
        if words.len() <= 8 {
            log::trace!("spi {:02x?}", words);
        } else {
            log::trace!("spi {} bytes", words.len());
        }
        Ok(())
    }
}

struct SleepDelay;

impl DelayUs<u16> for SleepDelay {
    fn delay_us(&mut self, us: u16) {
        thread::sleep(Duration::from_micros(us.into()));
    }
}

impl DelayMs<u16> for SleepDelay {
    fn delay_ms(&mut self, ms: u16) {
        thread::sleep(Duration::from_millis(ms.into()));
    }
}

fn document(currency: &str, rate: f64) -> String {
    format!(
        r#"{{"bpi": {{"{c}": {{"code": "{c}", "rate_float": {r}}}}}}}"#,
        c = currency,
        r = rate
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let currency = std::env::args().nth(1).unwrap_or_else(|| "AUD".to_owned());
    log::info!("pretending to poll {}", coindesk_url(&currency));

    let display = PCD8544::new(
        LoggingSpi,
        DummyOutputPin::<Infallible>::new(),
        DummyOutputPin::new(),
        DummyOutputPin::new(),
        DummyOutputPin::new(),
        SleepDelay,
        Config::default(),
    )?;

    let config = TickerConfig::default().with_tick_ms(TICK_MS);
    let cycle = Duration::from_millis(u64::from(TICK_MS) * (u64::from(config.steps) + 1));
    let mut ticker = Ticker::new(display, config)?;

    let mut rate = 1383.6013;
    let mut feed = FnFeed(|| {
        rate += 17.25;
        parse_coindesk(&document(&currency, rate), &currency)
    });

    let stop = Arc::new(AtomicBool::new(false));
    let timer = {
        let stop = Arc::clone(&stop);
        thread::spawn(move || {
            thread::sleep(cycle * CYCLES as u32 + cycle / 2);
            stop.store(true, Ordering::Release);
        })
    };

    ticker.run(&mut feed, &mut SleepDelay, &*stop)?;
    let _ = timer.join();

    let frame = ticker.frame();
    for y in 0..i32::from(HEIGHT) {
        let line: String = (0..i32::from(WIDTH))
            .map(|x| if frame.pixel(x, y) { '#' } else { '.' })
            .collect();
        println!("{}", line);
    }

    let mut display = ticker.release();
    display.power_off()?;
    Ok(())
}
