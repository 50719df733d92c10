//! Recording stand-ins for the HAL. All of them append to one shared log so the order of pin
//! changes and bus writes across different lines can be checked.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::blocking::spi::Write as SpiWrite;
use embedded_hal::digital::v2::OutputPin;
use pcd8544_ticker::{Config, PCD8544};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pin(&'static str, bool),
    Spi(Vec<u8>),
    DelayUs(u16),
    DelayMs(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusFault;

#[derive(Clone, Default)]
pub struct Log {
    events: Rc<RefCell<Vec<Event>>>,
    spi_fails: Rc<Cell<bool>>,
}

impl Log {
    pub fn take(&self) -> Vec<Event> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn fail_spi(&self, fail: bool) {
        self.spi_fails.set(fail);
    }

    pub fn pin(&self, name: &'static str) -> Pin {
        Pin {
            name,
            log: self.clone(),
        }
    }

    pub fn spi(&self) -> Spi {
        Spi { log: self.clone() }
    }

    pub fn delay(&self) -> Delay {
        Delay { log: self.clone() }
    }

    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

pub struct Pin {
    name: &'static str,
    log: Log,
}

impl OutputPin for Pin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.log.push(Event::Pin(self.name, false));
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.log.push(Event::Pin(self.name, true));
        Ok(())
    }
}

pub struct Spi {
    log: Log,
}

impl SpiWrite<u8> for Spi {
    type Error = BusFault;

    fn write(&mut self, words: &[u8]) -> Result<(), BusFault> {
        if self.log.spi_fails.get() {
            return Err(BusFault);
        }
        self.log.push(Event::Spi(words.to_vec()));
        Ok(())
    }
}

pub struct Delay {
    log: Log,
}

impl DelayUs<u16> for Delay {
    fn delay_us(&mut self, us: u16) {
        self.log.push(Event::DelayUs(us));
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        self.log.push(Event::DelayMs(ms));
    }
}

pub type Driver = PCD8544<Spi, Pin, Pin, Pin, Pin, Pin, Delay>;

/// A driver with an external power pin, the log is emptied after construction.
pub fn driver(config: Config) -> (Driver, Log) {
    let log = Log::default();
    let pcd = PCD8544::with_power(
        log.spi(),
        log.pin("dc"),
        log.pin("ce"),
        log.pin("rst"),
        log.pin("light"),
        log.pin("pwr"),
        log.delay(),
        config,
    )
    .unwrap();
    log.take();
    (pcd, log)
}

/// the events of one framed transfer
pub fn transfer(data: bool, bytes: &[u8]) -> Vec<Event> {
    vec![
        Event::Pin("dc", data),
        Event::Pin("ce", false),
        Event::Spi(bytes.to_vec()),
        Event::Pin("ce", true),
    ]
}

pub fn command(bytes: &[u8]) -> Vec<Event> {
    transfer(false, bytes)
}

pub fn data(bytes: &[u8]) -> Vec<Event> {
    transfer(true, bytes)
}
