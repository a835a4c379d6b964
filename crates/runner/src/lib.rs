//! Agora Runner - Market-Making Simulation Driver
//!
//! Advances a seeded price process, decides which side (if any) trades
//! against the maker's quotes each step, and calls into the order book,
//! market maker, and PnL tracker in sequence:
//!
//! ```text
//!   PriceProcess ──mid──► OrderBook (ladder around mid)
//!        │
//!        └──arrival──► MarketMaker quotes ──fill──► PnLTracker
//! ```
//!
//! All randomness in the system lives here; the component crates are
//! pure functions of the event sequence they are fed, which is what
//! makes a seeded run fully reproducible.

mod error;
mod price_process;
mod simulation;

pub use error::{Result, RunnerError};
pub use price_process::PriceProcess;
pub use simulation::{Simulation, SimulationConfig, SimulationSummary, StepRecord};
