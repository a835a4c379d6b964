use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single price level in the synthetic book
///
/// Quantity is drawn down in place as market orders consume the level;
/// it never goes negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

impl PriceLevel {
    pub fn new(price: Decimal, quantity: Decimal) -> Self {
        Self { price, quantity }
    }

    /// True once the level has been fully consumed
    pub fn is_empty(&self) -> bool {
        self.quantity <= Decimal::ZERO
    }
}
