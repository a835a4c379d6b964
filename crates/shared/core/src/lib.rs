//! Agora Core Domain
//!
//! Pure domain types for the Agora market-making simulator.
//! This crate contains no randomness, no I/O, and is 100% unit testable.

pub mod entities;

// Re-export commonly used types at crate root
pub use entities::{Position, PriceLevel, Side, Trade};
