use crate::error::{ValidationError, ValidationResult};

/// Canonical ticker form used as the key everywhere: trimmed, upper case.
pub fn normalize_ticker(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Inputs for [`Holding::new`]. `last_price` defaults to 0 when unknown.
#[derive(Debug, Clone, Default)]
pub struct HoldingConfig {
    pub ticker: String,
    pub shares: f64,
    pub last_price: Option<f64>,
}

impl HoldingConfig {
    pub fn new(ticker: &str, shares: f64) -> Self {
        Self {
            ticker: ticker.to_owned(),
            shares,
            last_price: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.last_price = Some(price);
        self
    }
}

/// A position in a single stock.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    ticker: String,
    shares: f64,
    last_price: f64,
}

impl Holding {
    pub fn new(config: HoldingConfig) -> ValidationResult<Self> {
        let ticker = normalize_ticker(&config.ticker);
        if ticker.is_empty() {
            return Err(ValidationError::EmptyTicker);
        }
        // negated comparisons so NaN is rejected too
        if !(config.shares >= 0.0) {
            return Err(ValidationError::NegativeShares {
                ticker,
                shares: config.shares,
            });
        }
        let last_price = config.last_price.unwrap_or(0.0);
        if !(last_price >= 0.0) {
            return Err(ValidationError::NegativePrice {
                ticker,
                price: last_price,
            });
        }

        Ok(Self {
            ticker,
            shares: config.shares,
            last_price,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn shares(&self) -> f64 {
        self.shares
    }

    pub fn last_price(&self) -> f64 {
        self.last_price
    }

    /// Sets the last known price. The sign is not checked here.
    pub fn update_price(&mut self, price: f64) {
        self.last_price = price;
    }

    pub fn market_value(&self) -> f64 {
        self.shares * self.last_price
    }
}
