//! Trading phase enumeration
//!
//! The phase decides the matching discipline: aggressive crossing during
//! continuous trading, accumulation plus uncrossing in the auction phases.

use crate::errors::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trading phase of one order book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum TradingPhase {
    Close = 0,
    OpeningAuction = 1,
    ContinuousTrading = 2,
    IntradayAuction = 3,
    ClosingAuction = 4,
}

impl TradingPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradingPhase::Close => "CLOSE",
            TradingPhase::OpeningAuction => "OPENING_AUCTION",
            TradingPhase::ContinuousTrading => "CONTINUOUS_TRADING",
            TradingPhase::IntradayAuction => "INTRADAY_AUCTION",
            TradingPhase::ClosingAuction => "CLOSING_AUCTION",
        }
    }

    pub fn is_auction(&self) -> bool {
        matches!(
            self,
            TradingPhase::OpeningAuction
                | TradingPhase::IntradayAuction
                | TradingPhase::ClosingAuction
        )
    }
}

impl TryFrom<i32> for TradingPhase {
    type Error = OrderError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(TradingPhase::Close),
            1 => Ok(TradingPhase::OpeningAuction),
            2 => Ok(TradingPhase::ContinuousTrading),
            3 => Ok(TradingPhase::IntradayAuction),
            4 => Ok(TradingPhase::ClosingAuction),
            other => Err(OrderError::InvalidPhase(other)),
        }
    }
}

impl fmt::Display for TradingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_codes_round_trip() {
        for phase in [
            TradingPhase::Close,
            TradingPhase::OpeningAuction,
            TradingPhase::ContinuousTrading,
            TradingPhase::IntradayAuction,
            TradingPhase::ClosingAuction,
        ] {
            assert_eq!(TradingPhase::try_from(phase as i32).unwrap(), phase);
        }
    }

    #[test]
    fn test_out_of_range_codes_rejected() {
        assert_eq!(
            TradingPhase::try_from(-7572),
            Err(OrderError::InvalidPhase(-7572))
        );
        assert_eq!(
            TradingPhase::try_from(6843),
            Err(OrderError::InvalidPhase(6843))
        );
    }

    #[test]
    fn test_is_auction() {
        assert!(TradingPhase::OpeningAuction.is_auction());
        assert!(TradingPhase::IntradayAuction.is_auction());
        assert!(TradingPhase::ClosingAuction.is_auction());
        assert!(!TradingPhase::ContinuousTrading.is_auction());
        assert!(!TradingPhase::Close.is_auction());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TradingPhase::ContinuousTrading.to_string(),
            "CONTINUOUS_TRADING"
        );
    }
}
