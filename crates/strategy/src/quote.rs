//! Two-sided market maker quotes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Two-sided market maker quote
///
/// Ephemeral: recomputed from maker state every step, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Bid price
    pub bid_price: Decimal,
    /// Ask price
    pub ask_price: Decimal,
    /// Bid size (zero when the buy side is suppressed)
    pub bid_size: Decimal,
    /// Ask size (zero when the sell side is suppressed)
    pub ask_size: Decimal,
}

impl Quote {
    pub fn new(bid_price: Decimal, ask_price: Decimal, bid_size: Decimal, ask_size: Decimal) -> Self {
        Self {
            bid_price,
            ask_price,
            bid_size,
            ask_size,
        }
    }

    /// Create a symmetric quote around a mid price
    pub fn symmetric(mid: Decimal, half_spread: Decimal, size: Decimal) -> Self {
        Self {
            bid_price: mid - half_spread,
            ask_price: mid + half_spread,
            bid_size: size,
            ask_size: size,
        }
    }

    /// Midpoint of the quoted prices
    pub fn mid_price(&self) -> Decimal {
        (self.bid_price + self.ask_price) / Decimal::TWO
    }

    /// Quoted spread (ask - bid)
    pub fn spread(&self) -> Decimal {
        self.ask_price - self.bid_price
    }

    /// Check if the quote is crossed (invalid)
    pub fn is_crossed(&self) -> bool {
        self.bid_price >= self.ask_price
    }

    /// Check if either side is suppressed
    pub fn is_one_sided(&self) -> bool {
        self.bid_size.is_zero() || self.ask_size.is_zero()
    }
}
