//! Static instrument description
//!
//! Supplied at book construction; the previous close seeds the last,
//! close and post-auction prices for the new session.

use crate::numeric::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A listed instrument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    name: String,
    isin: String,
    currency: String,
    tick_size: Price,
    previous_close: Price,
}

impl Instrument {
    pub fn new(
        name: impl Into<String>,
        isin: impl Into<String>,
        currency: impl Into<String>,
        tick_size: Price,
        previous_close: Price,
    ) -> Self {
        Self {
            name: name.into(),
            isin: isin.into(),
            currency: currency.into(),
            tick_size,
            previous_close,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn isin(&self) -> &str {
        &self.isin
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn tick_size(&self) -> Price {
        self.tick_size
    }

    pub fn previous_close(&self) -> Price {
        self.previous_close
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instrument: name[{}] isin[{}] currency[{}] tick[{}] close[{}]",
            self.name, self.isin, self.currency, self.tick_size, self.previous_close
        )
    }
}
