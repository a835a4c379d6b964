//! Agora Strategy
//!
//! An inventory-based market maker:
//! - Quotes bid/ask around the mid price
//! - Shifts both quotes against the current inventory (skew)
//! - Stops quoting a side once the position limit on that side is reached
//! - Optional risk controls: kill switch and size throttling

mod error;
mod market_maker;
mod quote;
mod risk;

pub use error::{Result, StrategyError};
pub use market_maker::{MarketMaker, MarketMakerConfig};
pub use quote::Quote;
pub use risk::{RiskConfig, RiskManager};
