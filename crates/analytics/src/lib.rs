//! Agora Analytics
//!
//! PnL decomposition for a single market-making run. Every fill is
//! attributed to three components:
//!
//! - **Spread capture**: executing at a price better than the prevailing mid
//! - **Inventory risk**: mark-to-market of the position held between marks
//! - **Adverse selection**: the mid moving against the fill immediately after
//!
//! The three components sum exactly to the cash-flow PnL (cash received
//! from sells minus cash paid for buys, plus inventory marked at the
//! latest mid). That reconciliation identity is what the tests pin down.

mod error;
mod pnl;

pub use error::{AnalyticsError, Result};
pub use pnl::{PnlBreakdown, PnlTracker};
