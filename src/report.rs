use anyhow::Result;
use polars::prelude::*;

use crate::portfolio::Portfolio;
use crate::trade::Trade;

/// One row per holding in target order: price, value, current and target weight.
pub fn allocations_to_dataframe(portfolio: &Portfolio) -> Result<DataFrame> {
    let allocations = portfolio.current_allocations();

    let mut tickers = Vec::new();
    let mut shares = Vec::new();
    let mut prices = Vec::new();
    let mut values = Vec::new();
    let mut weights = Vec::new();
    let mut targets = Vec::new();
    for (ticker, target) in portfolio.target_allocation() {
        let Some(holding) = portfolio.holding(ticker) else {
            continue;
        };
        tickers.push(ticker.clone());
        shares.push(holding.shares());
        prices.push(holding.last_price());
        values.push(holding.market_value());
        weights.push(allocations.get(ticker).copied().unwrap_or(0.0));
        targets.push(*target);
    }

    Ok(df!(
        "ticker" => tickers,
        "shares" => shares,
        "last_price" => prices,
        "market_value" => values,
        "weight" => weights,
        "target_weight" => targets
    )?)
}

pub fn trades_to_dataframe(trades: &[Trade]) -> Result<DataFrame> {
    let tickers: Vec<_> = trades.iter().map(|t| t.ticker().to_owned()).collect();
    let actions: Vec<_> = trades.iter().map(|t| t.label()).collect();
    let shares: Vec<_> = trades.iter().map(|t| t.shares()).collect();
    Ok(df!(
        "ticker" => tickers,
        "action" => actions,
        "shares" => shares
    )?)
}
