use std::path::PathBuf;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use share_rebalancer::config::PortfolioFile;
use share_rebalancer::prices::refresh_prices;
use share_rebalancer::report;
use share_rebalancer::{FallbackPriceSource, StaticPriceSource, YahooPriceSource};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let file = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => PortfolioFile::load(&path)?,
        None => {
            info!("No portfolio file given, using demo portfolio");
            PortfolioFile::demo()
        }
    };
    let mut portfolio = file.build_portfolio()?;

    info!("Fetching current market prices...");
    let start_time = std::time::Instant::now();
    let source = FallbackPriceSource::new(
        YahooPriceSource::new(),
        StaticPriceSource::new(file.manual_prices()),
    );
    let missing = refresh_prices(&mut portfolio, &source).await;
    info!("Time taken to update prices: {:?}", start_time.elapsed());
    if !missing.is_empty() {
        warn!(?missing, "Some holdings have no current price and will not be traded");
    }

    info!("Current Portfolio State:");
    let allocations = portfolio.current_allocations();
    for holding in portfolio.holdings() {
        let weight = allocations.get(holding.ticker()).copied().unwrap_or(0.0);
        info!(
            "{}: {} shares @ ${:.2} = ${:.2} ({:.1}%)",
            holding.ticker(),
            holding.shares(),
            holding.last_price(),
            holding.market_value(),
            weight * 100.0
        );
    }
    info!("Total Portfolio Value: ${:.2}", portfolio.total_value());
    println!("{}", report::allocations_to_dataframe(&portfolio)?);

    info!("Required Rebalancing Trades:");
    let trades = portfolio.rebalancing_trades();
    if trades.is_empty() {
        info!("No rebalancing needed!");
    } else {
        for trade in &trades {
            info!("{trade}");
        }
        println!("{}", report::trades_to_dataframe(&trades)?);
    }
    Ok(())
}
