//! Price sources for the ticker
//!
//! The crate does no networking itself. The application fetches the price however it likes and
//! hands it over through [`PriceFeed`]. With the "std" feature the CoinDesk current price document
//! can be parsed here.

/// Something that can be asked for the current price.
pub trait PriceFeed {
    type Error;

    /// Fetch the current price. Blocks until it is available or the fetch failed.
    fn fetch(&mut self) -> Result<f64, Self::Error>;
}

/// Adapter turning a closure into a [`PriceFeed`].
pub struct FnFeed<F>(pub F);

impl<F, E> PriceFeed for FnFeed<F>
where
    F: FnMut() -> Result<f64, E>,
{
    type Error = E;

    fn fetch(&mut self) -> Result<f64, E> {
        (self.0)()
    }
}

#[cfg(feature = "std")]
pub use coindesk::*;

#[cfg(feature = "std")]
mod coindesk {
    use std::collections::HashMap;
    use std::fmt;

    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct CurrentPrice {
        bpi: HashMap<String, Rate>,
    }

    #[derive(Debug, Deserialize)]
    struct Rate {
        rate_float: f64,
    }

    #[derive(Debug)]
    pub enum FeedError {
        /// the body is not the expected JSON document
        Json(serde_json::Error),
        /// the document has no rate for the requested currency
        MissingRate(String),
    }

    impl fmt::Display for FeedError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                FeedError::Json(e) => write!(f, "malformed price document: {}", e),
                FeedError::MissingRate(currency) => {
                    write!(f, "price document has no rate for {}", currency)
                }
            }
        }
    }

    impl std::error::Error for FeedError {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            match self {
                FeedError::Json(e) => Some(e),
                FeedError::MissingRate(_) => None,
            }
        }
    }

    impl From<serde_json::Error> for FeedError {
        fn from(e: serde_json::Error) -> Self {
            FeedError::Json(e)
        }
    }

    /// URL of the CoinDesk current price document for `currency` (e.g. "AUD").
    pub fn coindesk_url(currency: &str) -> String {
        format!(
            "http://api.coindesk.com/v1/bpi/currentprice/{}.json",
            currency
        )
    }

    /// Extract `bpi.<currency>.rate_float` from a CoinDesk current price document.
    pub fn parse_coindesk(body: &str, currency: &str) -> Result<f64, FeedError> {
        let document: CurrentPrice = serde_json::from_str(body)?;
        document
            .bpi
            .get(currency)
            .map(|rate| rate.rate_float)
            .ok_or_else(|| FeedError::MissingRate(currency.to_owned()))
    }
}
