use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Side;

/// Fill record from the market maker's perspective
///
/// Carries the prevailing mid before the fill and the mid after the
/// following price move, so PnL attribution never needs to look at
/// neighbouring trades. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Side of the fill from the maker's perspective
    pub side: Side,
    /// Execution price
    pub price: Decimal,
    /// Executed quantity (always positive)
    pub size: Decimal,
    /// Mid price at the moment of the fill
    pub mid_before: Decimal,
    /// Mid price after the next price move
    pub mid_after: Decimal,
    /// Simulation step the fill occurred on
    pub step: u64,
}

impl Trade {
    pub fn new(
        side: Side,
        price: Decimal,
        size: Decimal,
        mid_before: Decimal,
        mid_after: Decimal,
        step: u64,
    ) -> Self {
        Self {
            side,
            price,
            size,
            mid_before,
            mid_after,
            step,
        }
    }

    /// Signed size: positive for buys, negative for sells
    pub fn signed_size(&self) -> Decimal {
        self.side.sign() * self.size
    }
}
