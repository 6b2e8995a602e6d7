use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::error::{ValidationError, ValidationResult};
use crate::holding::{normalize_ticker, Holding};
use crate::trade::Trade;

/// Absolute tolerance on the sum of target weights.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Inputs for [`Portfolio::new`]. Target order decides trade order.
#[derive(Debug, Clone, Default)]
pub struct PortfolioConfig {
    pub holdings: Vec<Holding>,
    pub target_allocation: Vec<(String, f64)>,
}

impl PortfolioConfig {
    pub fn holding(mut self, holding: Holding) -> Self {
        self.holdings.push(holding);
        self
    }

    pub fn target(mut self, ticker: &str, weight: f64) -> Self {
        self.target_allocation.push((ticker.to_owned(), weight));
        self
    }
}

/// Stock holdings plus the weights they should be rebalanced towards.
///
/// The set of tickers is fixed once built; only holding prices change.
#[derive(Debug, Clone)]
pub struct Portfolio {
    holdings: HashMap<String, Holding>,
    // insertion order is kept, trades follow it
    target_allocation: Vec<(String, f64)>,
}

impl Portfolio {
    pub fn new(config: PortfolioConfig) -> ValidationResult<Self> {
        if config.holdings.is_empty() {
            return Err(ValidationError::NoHoldings);
        }

        let mut holdings = HashMap::with_capacity(config.holdings.len());
        for holding in config.holdings {
            let ticker = holding.ticker().to_owned();
            if holdings.insert(ticker.clone(), holding).is_some() {
                return Err(ValidationError::DuplicateHolding(ticker));
            }
        }

        let mut target_allocation: Vec<(String, f64)> =
            Vec::with_capacity(config.target_allocation.len());
        for (ticker, weight) in config.target_allocation {
            let ticker = normalize_ticker(&ticker);
            if target_allocation.iter().any(|(t, _)| *t == ticker) {
                return Err(ValidationError::DuplicateTarget(ticker));
            }
            if !(0.0..=1.0).contains(&weight) {
                return Err(ValidationError::WeightOutOfRange { ticker, weight });
            }
            target_allocation.push((ticker, weight));
        }

        let held: BTreeSet<&str> = holdings.keys().map(String::as_str).collect();
        let targeted: BTreeSet<&str> = target_allocation.iter().map(|(t, _)| t.as_str()).collect();
        if held != targeted {
            return Err(ValidationError::MismatchedTickers {
                without_target: held.difference(&targeted).map(|t| t.to_string()).collect(),
                without_holding: targeted.difference(&held).map(|t| t.to_string()).collect(),
            });
        }

        let sum: f64 = target_allocation.iter().map(|(_, w)| w).sum();
        if (sum - 1.0).abs() >= WEIGHT_SUM_TOLERANCE {
            return Err(ValidationError::WeightSum { sum });
        }

        Ok(Self {
            holdings,
            target_allocation,
        })
    }

    /// Tickers in target allocation order.
    pub fn tickers(&self) -> Vec<String> {
        self.target_allocation.iter().map(|(t, _)| t.clone()).collect()
    }

    pub fn holding(&self, ticker: &str) -> Option<&Holding> {
        self.holdings.get(ticker)
    }

    /// Holdings in target allocation order.
    pub fn holdings(&self) -> impl Iterator<Item = &Holding> + '_ {
        self.target_allocation
            .iter()
            .filter_map(|(ticker, _)| self.holdings.get(ticker))
    }

    pub fn target_allocation(&self) -> &[(String, f64)] {
        &self.target_allocation
    }

    pub fn target_weight(&self, ticker: &str) -> Option<f64> {
        self.target_allocation
            .iter()
            .find(|(t, _)| t == ticker)
            .map(|(_, w)| *w)
    }

    /// Returns false if the ticker is not held.
    pub fn update_price(&mut self, ticker: &str, price: f64) -> bool {
        match self.holdings.get_mut(ticker) {
            Some(holding) => {
                holding.update_price(price);
                true
            }
            None => false,
        }
    }

    /// Applies a ticker -> price map and returns the held tickers it had no price for.
    ///
    /// Holdings without a price keep whatever price they had before.
    pub fn apply_prices(&mut self, prices: &HashMap<String, f64>) -> Vec<String> {
        for (ticker, price) in prices {
            if self.update_price(ticker, *price) {
                debug!(%ticker, price = *price, "updated price");
            } else {
                debug!(%ticker, "ignoring price for ticker not in portfolio");
            }
        }
        self.target_allocation
            .iter()
            .filter(|(ticker, _)| !prices.contains_key(ticker))
            .map(|(ticker, _)| ticker.clone())
            .collect()
    }

    pub fn total_value(&self) -> f64 {
        self.holdings.values().fold(0.0, |acc, h| acc + h.market_value())
    }

    /// Fraction of total value per ticker. All zeros when the portfolio is worth nothing.
    pub fn current_allocations(&self) -> HashMap<String, f64> {
        let total = self.total_value();
        self.holdings
            .iter()
            .map(|(ticker, holding)| {
                let weight = if total == 0.0 {
                    0.0
                } else {
                    holding.market_value() / total
                };
                (ticker.clone(), weight)
            })
            .collect()
    }

    /// Whole-share trades that move each holding to its target value.
    ///
    /// Share deltas are rounded half-to-even; deltas that round to zero and
    /// holdings with no price produce no trade.
    pub fn rebalancing_trades(&self) -> Vec<Trade> {
        let total = self.total_value();
        let mut trades = Vec::new();

        for (ticker, target_weight) in &self.target_allocation {
            let Some(holding) = self.holdings.get(ticker) else {
                continue;
            };
            let price = holding.last_price();
            if price == 0.0 {
                debug!(%ticker, "skipping unpriced holding");
                continue;
            }

            let target_value = total * target_weight;
            let shares_diff = (target_value - holding.market_value()) / price;
            let shares = shares_diff.round_ties_even();
            if shares.abs() >= 1.0 {
                trades.push(Trade::new(ticker, shares));
            }
        }
        trades
    }
}
