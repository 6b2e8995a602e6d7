//! Portfolio description loaded from TOML.
//!
//! ```toml
//! [[holding]]
//! ticker = "META"
//! shares = 50
//! target = 0.3
//! manual_price = 310.0   # used if no live price can be fetched
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ValidationError;
use crate::holding::{normalize_ticker, Holding, HoldingConfig};
use crate::portfolio::{Portfolio, PortfolioConfig};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HoldingEntry {
    pub ticker: String,
    pub shares: f64,
    pub target: f64,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub manual_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PortfolioFile {
    #[serde(rename = "holding", default)]
    pub holdings: Vec<HoldingEntry>,
}

impl PortfolioFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading portfolio file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("parsing portfolio file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// META/AAPL/GOOGL at 30/40/30.
    pub fn demo() -> Self {
        let entry = |ticker: &str, shares: f64, target: f64| HoldingEntry {
            ticker: ticker.to_owned(),
            shares,
            target,
            price: None,
            manual_price: None,
        };
        Self {
            holdings: vec![
                entry(META, 50.0, 0.3),
                entry(AAPL, 30.0, 0.4),
                entry(GOOGL, 20.0, 0.3),
            ],
        }
    }

    pub fn build_portfolio(&self) -> Result<Portfolio> {
        let mut config = PortfolioConfig::default();
        for entry in &self.holdings {
            let holding = Holding::new(HoldingConfig {
                ticker: entry.ticker.clone(),
                shares: entry.shares,
                last_price: entry.price,
            })?;
            if let Some(price) = entry.manual_price {
                if !(price >= 0.0) {
                    return Err(ValidationError::NegativePrice {
                        ticker: holding.ticker().to_owned(),
                        price,
                    }
                    .into());
                }
            }
            config = config.holding(holding).target(&entry.ticker, entry.target);
        }
        Ok(Portfolio::new(config)?)
    }

    pub fn manual_prices(&self) -> HashMap<String, f64> {
        self.holdings
            .iter()
            .filter_map(|e| e.manual_price.map(|p| (normalize_ticker(&e.ticker), p)))
            .collect()
    }
}

const META: &str = "META";
const AAPL: &str = "AAPL";
const GOOGL: &str = "GOOGL";
