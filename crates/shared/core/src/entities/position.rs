//! Signed trading position with entry averages and cash-flow totals.

use rust_decimal::Decimal;
use rust_decimal::prelude::Signed;
use serde::{Deserialize, Serialize};

use super::Side;

/// Running (quantity, notional) aggregate for one entry direction
///
/// The average entry price is recomputed on read; reducing fills draw the
/// aggregate down at its existing average, so the average itself only
/// moves when exposure in that direction increases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
struct EntryAggregate {
    quantity: Decimal,
    notional: Decimal,
}

impl EntryAggregate {
    fn add(&mut self, size: Decimal, price: Decimal) {
        self.quantity += size;
        self.notional += price * size;
    }

    fn reduce(&mut self, size: Decimal) {
        if size >= self.quantity {
            *self = Self::default();
            return;
        }
        let avg = self.notional / self.quantity;
        self.quantity -= size;
        self.notional -= avg * size;
    }

    fn average(&self) -> Option<Decimal> {
        if self.quantity.is_zero() {
            None
        } else {
            Some(self.notional / self.quantity)
        }
    }
}

/// Signed trading position
///
/// Tracks the running size-weighted entry price per direction (updated
/// only by fills that increase exposure in that direction) together with
/// lifetime cash-flow totals. Fills that reduce or flip the position
/// realize PnL against the prior average instead of updating it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    quantity: Decimal,
    long_entry: EntryAggregate,
    short_entry: EntryAggregate,
    total_bought: Decimal,
    buy_value: Decimal,
    total_sold: Decimal,
    sell_value: Decimal,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current signed quantity (positive = long, negative = short)
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn is_flat(&self) -> bool {
        self.quantity.is_zero()
    }

    pub fn is_long(&self) -> bool {
        self.quantity > Decimal::ZERO
    }

    pub fn is_short(&self) -> bool {
        self.quantity < Decimal::ZERO
    }

    /// Average entry price of the long side, `None` if no long exposure
    pub fn avg_buy_price(&self) -> Option<Decimal> {
        self.long_entry.average()
    }

    /// Average entry price of the short side, `None` if no short exposure
    pub fn avg_sell_price(&self) -> Option<Decimal> {
        self.short_entry.average()
    }

    /// Average entry price of the current direction
    pub fn avg_entry_price(&self) -> Option<Decimal> {
        if self.is_long() {
            self.avg_buy_price()
        } else if self.is_short() {
            self.avg_sell_price()
        } else {
            None
        }
    }

    /// Total quantity ever bought
    pub fn total_bought(&self) -> Decimal {
        self.total_bought
    }

    /// Total quantity ever sold
    pub fn total_sold(&self) -> Decimal {
        self.total_sold
    }

    /// Apply a fill to the position
    ///
    /// Returns the PnL realized against the prior entry average by the
    /// reducing portion of the fill (zero for opening/adding fills).
    pub fn apply_fill(&mut self, side: Side, price: Decimal, size: Decimal) -> Decimal {
        match side {
            Side::Buy => {
                self.total_bought += size;
                self.buy_value += price * size;
            }
            Side::Sell => {
                self.total_sold += size;
                self.sell_value += price * size;
            }
        }

        let signed = side.sign() * size;
        let old = self.quantity;
        self.quantity += signed;

        if old.is_zero() || old.signum() == signed.signum() {
            // Opening or adding: fold into the direction's running average
            self.entry_mut(side).add(size, price);
            return Decimal::ZERO;
        }

        // Reducing, possibly flipping
        let closing = size.min(old.abs());
        let closed_side = if old > Decimal::ZERO {
            &mut self.long_entry
        } else {
            &mut self.short_entry
        };
        let realized = match closed_side.average() {
            Some(avg) if old > Decimal::ZERO => (price - avg) * closing,
            Some(avg) => (avg - price) * closing,
            None => Decimal::ZERO,
        };
        closed_side.reduce(closing);

        // Flip remainder opens the opposite direction at the fill price
        let remainder = size - closing;
        if remainder > Decimal::ZERO {
            self.entry_mut(side).add(remainder, price);
        }

        realized
    }

    /// Mark-to-market PnL of the open position versus its entry average
    pub fn unrealized_pnl(&self, mark: Decimal) -> Decimal {
        match self.avg_entry_price() {
            Some(entry) => self.quantity * (mark - entry),
            None => Decimal::ZERO,
        }
    }

    /// Net cash from completed flow: sell proceeds minus buy cost
    pub fn cash_pnl(&self) -> Decimal {
        self.sell_value - self.buy_value
    }

    /// Cash PnL plus the open position marked at `mark`
    ///
    /// The independent reconciliation quantity for the PnL decomposition.
    pub fn cash_flow_pnl(&self, mark: Decimal) -> Decimal {
        self.cash_pnl() + self.quantity * mark
    }

    fn entry_mut(&mut self, side: Side) -> &mut EntryAggregate {
        match side {
            Side::Buy => &mut self.long_entry,
            Side::Sell => &mut self.short_entry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_position_is_flat() {
        let pos = Position::new();
        assert!(pos.is_flat());
        assert_eq!(pos.avg_buy_price(), None);
        assert_eq!(pos.avg_sell_price(), None);
        assert_eq!(pos.cash_pnl(), Decimal::ZERO);
    }

    #[test]
    fn test_open_long() {
        let mut pos = Position::new();
        let realized = pos.apply_fill(Side::Buy, dec!(100), dec!(10));

        assert_eq!(realized, Decimal::ZERO);
        assert_eq!(pos.quantity(), dec!(10));
        assert_eq!(pos.avg_buy_price(), Some(dec!(100)));
        assert_eq!(pos.avg_entry_price(), Some(dec!(100)));
    }

    #[test]
    fn test_add_to_long_updates_average() {
        let mut pos = Position::new();
        pos.apply_fill(Side::Buy, dec!(100), dec!(10));
        pos.apply_fill(Side::Buy, dec!(102), dec!(10));

        assert_eq!(pos.quantity(), dec!(20));
        // (100*10 + 102*10) / 20 = 101
        assert_eq!(pos.avg_buy_price(), Some(dec!(101)));
    }

    #[test]
    fn test_partial_close_keeps_average() {
        let mut pos = Position::new();
        pos.apply_fill(Side::Buy, dec!(100), dec!(10));
        let realized = pos.apply_fill(Side::Sell, dec!(102), dec!(4));

        // Realized (102 - 100) * 4 = 8; remaining entry average unchanged
        assert_eq!(realized, dec!(8));
        assert_eq!(pos.quantity(), dec!(6));
        assert_eq!(pos.avg_buy_price(), Some(dec!(100)));
    }

    #[test]
    fn test_flip_long_to_short() {
        let mut pos = Position::new();
        pos.apply_fill(Side::Buy, dec!(100), dec!(10));
        let realized = pos.apply_fill(Side::Sell, dec!(101), dec!(15));

        // Closed 10 at +1 each, then short 5 opened at 101
        assert_eq!(realized, dec!(10));
        assert_eq!(pos.quantity(), dec!(-5));
        assert_eq!(pos.avg_sell_price(), Some(dec!(101)));
        assert_eq!(pos.avg_buy_price(), None);
    }

    #[test]
    fn test_short_round_trip() {
        let mut pos = Position::new();
        pos.apply_fill(Side::Sell, dec!(100), dec!(10));
        assert_eq!(pos.quantity(), dec!(-10));
        assert_eq!(pos.avg_sell_price(), Some(dec!(100)));

        // Cover at a lower price: profit for the short
        let realized = pos.apply_fill(Side::Buy, dec!(99), dec!(10));
        assert_eq!(realized, dec!(10));
        assert!(pos.is_flat());
        assert_eq!(pos.avg_sell_price(), None);
    }

    #[test]
    fn test_unrealized_pnl_long_and_short() {
        let mut pos = Position::new();
        pos.apply_fill(Side::Buy, dec!(100), dec!(10));
        assert_eq!(pos.unrealized_pnl(dec!(101)), dec!(10));
        assert_eq!(pos.unrealized_pnl(dec!(99)), dec!(-10));

        let mut short = Position::new();
        short.apply_fill(Side::Sell, dec!(100), dec!(10));
        assert_eq!(short.unrealized_pnl(dec!(99)), dec!(10));
        assert_eq!(short.unrealized_pnl(dec!(101)), dec!(-10));
    }

    #[test]
    fn test_cash_flow_pnl() {
        let mut pos = Position::new();
        pos.apply_fill(Side::Buy, dec!(100), dec!(10));
        pos.apply_fill(Side::Sell, dec!(101), dec!(4));

        // Cash: 404 received - 1000 paid = -596; inventory 6 marked at 102
        assert_eq!(pos.cash_pnl(), dec!(-596));
        assert_eq!(pos.cash_flow_pnl(dec!(102)), dec!(16));
    }

    #[test]
    fn test_lifetime_totals() {
        let mut pos = Position::new();
        pos.apply_fill(Side::Buy, dec!(100), dec!(10));
        pos.apply_fill(Side::Sell, dec!(101), dec!(15));
        pos.apply_fill(Side::Buy, dec!(99), dec!(2));

        assert_eq!(pos.total_bought(), dec!(12));
        assert_eq!(pos.total_sold(), dec!(15));
    }
}
