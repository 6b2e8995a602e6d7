use std::fmt;

/// A whole-share order produced by rebalancing. Positive shares buy, negative sell.
///
/// Share counts are whole numbers kept as `f64` so very large books cannot overflow.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    ticker: String,
    shares: f64,
}

impl Trade {
    pub(crate) fn new(ticker: &str, shares: f64) -> Self {
        debug_assert!(shares.abs() >= 1.0, "sub-share trade for {ticker}");
        Self {
            ticker: ticker.to_owned(),
            shares,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn shares(&self) -> f64 {
        self.shares
    }

    pub fn label(&self) -> &'static str {
        if self.shares > 0.0 {
            "BUY"
        } else {
            "SELL"
        }
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} shares of {}",
            self.label(),
            self.shares.abs(),
            self.ticker
        )
    }
}
