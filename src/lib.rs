//! Stock portfolio valuation and share-level rebalancing.
//!
//! Build [`Holding`]s, assemble them into a [`Portfolio`] with target weights,
//! refresh prices from a [`PriceSource`], then ask for
//! [`Portfolio::rebalancing_trades`].

pub mod config;
pub mod error;
pub mod holding;
pub mod portfolio;
pub mod prices;
pub mod report;
pub mod trade;

pub use error::{ValidationError, ValidationResult};
pub use holding::{Holding, HoldingConfig};
pub use portfolio::{Portfolio, PortfolioConfig};
pub use prices::{FallbackPriceSource, PriceSource, StaticPriceSource, YahooPriceSource};
pub use trade::Trade;
