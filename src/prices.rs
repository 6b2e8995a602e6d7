//! Price sources used to refresh holding prices before rebalancing.
//!
//! A source returns a ticker -> price map for the tickers it could price.
//! Tickers it could not price are left out rather than reported as zero.

use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use futures::{stream::FuturesUnordered, StreamExt};
use tracing::{info, warn};
use yahoo_finance_api::YahooConnector;

use crate::holding::normalize_ticker;
use crate::portfolio::Portfolio;

#[allow(async_fn_in_trait)]
pub trait PriceSource {
    async fn current_prices(&self, tickers: &[String]) -> HashMap<String, f64>;
}

/// Latest daily close from Yahoo Finance.
pub struct YahooPriceSource {
    client: YahooConnector,
}

impl Default for YahooPriceSource {
    fn default() -> Self {
        Self::new()
    }
}

impl YahooPriceSource {
    pub fn new() -> Self {
        Self {
            client: YahooConnector::new(),
        }
    }

    pub async fn fetch_price(&self, ticker: &str) -> Result<f64> {
        let res = self
            .client
            .get_latest_quotes(ticker, "1d")
            .await
            .with_context(|| format!("fetching quotes for {ticker}"))?;
        let last_price = res.last_quote()?.close;
        if !last_price.is_finite() || last_price <= 0.0 {
            return Err(anyhow!("unusable price {last_price} for {ticker}"));
        }
        Ok(last_price)
    }
}

impl PriceSource for YahooPriceSource {
    async fn current_prices(&self, tickers: &[String]) -> HashMap<String, f64> {
        let mut futures: FuturesUnordered<_> = tickers
            .iter()
            .map(|ticker| async move { (ticker, self.fetch_price(ticker).await) })
            .collect();

        let mut prices = HashMap::with_capacity(tickers.len());
        while let Some((ticker, result)) = futures.next().await {
            match result {
                Ok(price) => {
                    prices.insert(ticker.clone(), price);
                }
                Err(err) => warn!(%ticker, "Could not get price: {err:#}"),
            }
        }
        prices
    }
}

/// Fixed prices, e.g. manually entered ones.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    prices: HashMap<String, f64>,
}

impl StaticPriceSource {
    pub fn new(prices: HashMap<String, f64>) -> Self {
        let prices = prices
            .into_iter()
            .map(|(ticker, price)| (normalize_ticker(&ticker), price))
            .collect();
        Self { prices }
    }
}

impl PriceSource for StaticPriceSource {
    async fn current_prices(&self, tickers: &[String]) -> HashMap<String, f64> {
        tickers
            .iter()
            .filter_map(|ticker| self.prices.get(ticker).map(|p| (ticker.clone(), *p)))
            .collect()
    }
}

/// Asks `primary` first and `secondary` only for what `primary` left out.
pub struct FallbackPriceSource<P, S> {
    primary: P,
    secondary: S,
}

impl<P: PriceSource, S: PriceSource> FallbackPriceSource<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }
}

impl<P: PriceSource, S: PriceSource> PriceSource for FallbackPriceSource<P, S> {
    async fn current_prices(&self, tickers: &[String]) -> HashMap<String, f64> {
        let mut prices = self.primary.current_prices(tickers).await;
        let missing: Vec<String> = tickers
            .iter()
            .filter(|t| !prices.contains_key(*t))
            .cloned()
            .collect();
        if missing.is_empty() {
            return prices;
        }

        let fallback = self.secondary.current_prices(&missing).await;
        for (ticker, price) in fallback {
            info!(%ticker, price, "using fallback price");
            prices.insert(ticker, price);
        }
        prices
    }
}

/// Pulls prices for every holding and applies them. Returns the tickers left unpriced.
pub async fn refresh_prices<P: PriceSource>(portfolio: &mut Portfolio, source: &P) -> Vec<String> {
    let tickers = portfolio.tickers();
    let prices = source.current_prices(&tickers).await;
    let missing = portfolio.apply_prices(&prices);
    for ticker in &missing {
        warn!(%ticker, "no price available, keeping last known price");
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holding::{Holding, HoldingConfig};
    use crate::portfolio::PortfolioConfig;

    fn tickers(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn static_source(prices: &[(&str, f64)]) -> StaticPriceSource {
        StaticPriceSource::new(prices.iter().map(|(t, p)| (t.to_string(), *p)).collect())
    }

    #[tokio::test]
    async fn test_static_source_omits_unknown() {
        let source = static_source(&[(" meta ", 300.0), ("AAPL", 150.0)]);
        let prices = source.current_prices(&tickers(&["META", "GOOGL"])).await;
        assert_eq!(prices.len(), 1);
        assert_eq!(prices["META"], 300.0);
        assert!(!prices.contains_key("GOOGL"));
    }

    #[tokio::test]
    async fn test_fallback_fills_gaps_only() {
        let source = FallbackPriceSource::new(
            static_source(&[("META", 300.0)]),
            static_source(&[("META", 1.0), ("AAPL", 150.0)]),
        );
        let prices = source
            .current_prices(&tickers(&["META", "AAPL", "GOOGL"]))
            .await;
        assert_eq!(prices.len(), 2);
        assert_eq!(prices["META"], 300.0);
        assert_eq!(prices["AAPL"], 150.0);
    }

    #[tokio::test]
    async fn test_refresh_prices() {
        let mut portfolio = Portfolio::new(
            PortfolioConfig::default()
                .holding(Holding::new(HoldingConfig::new("META", 50.0)).unwrap())
                .holding(Holding::new(HoldingConfig::new("AAPL", 30.0)).unwrap())
                .target("META", 0.5)
                .target("AAPL", 0.5),
        )
        .unwrap();
        let missing = refresh_prices(&mut portfolio, &static_source(&[("META", 300.0)])).await;
        assert_eq!(missing, vec!["AAPL"]);
        assert_eq!(portfolio.total_value(), 15000.0);
        // AAPL is unpriced so only META trades
        let trades = portfolio.rebalancing_trades();
        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].ticker(), "META");
    }
}
