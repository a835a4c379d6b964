//! PnL decomposition engine
//!
//! One state machine with two transitions: `mark` on every mid-price
//! update and `record_trade` on every fill, in strict temporal order.
//! The interleaving matters: inventory PnL accrues on the position held
//! *before* a fill up to the fill's `mid_before`, the `mid_before` to
//! `mid_after` move on the traded size is attributed to adverse
//! selection, and the traded size joins the inventory accrual only from
//! `mid_after` onward. That split is what makes the three components sum
//! exactly to the cash-flow PnL.

use agora_core::{Position, Side, Trade};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// Snapshot of the decomposition totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlBreakdown {
    pub spread_capture: Decimal,
    pub inventory_pnl: Decimal,
    pub adverse_selection: Decimal,
    pub total_pnl: Decimal,
}

/// Decomposes market-making PnL trade by trade
///
/// Pure deterministic arithmetic over the event sequence it is fed;
/// identical sequences produce identical totals.
#[derive(Debug, Clone, Default)]
pub struct PnlTracker {
    spread_capture: Decimal,
    inventory_pnl: Decimal,
    adverse_selection: Decimal,
    last_mark: Option<Decimal>,
    position: Position,
    trades: Vec<Trade>,
    buys: u64,
    sells: u64,
}

impl PnlTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the portfolio to a new mid price
    ///
    /// Accrues inventory PnL on the position held since the previous
    /// mark; the first call only sets the baseline. Called every step
    /// regardless of whether a trade occurred.
    pub fn mark(&mut self, mid: Decimal) {
        if let Some(prev) = self.last_mark {
            self.inventory_pnl += self.position.quantity() * (mid - prev);
        }
        self.last_mark = Some(mid);
    }

    /// Record a fill
    ///
    /// Trades must arrive in the order they occurred; reordering two
    /// trades, or a trade and a mark, changes the decomposition.
    pub fn record_trade(&mut self, trade: Trade) -> Result<()> {
        if trade.size <= Decimal::ZERO {
            return Err(AnalyticsError::InvalidTrade(format!(
                "non-positive size {}",
                trade.size
            )));
        }
        if trade.price <= Decimal::ZERO {
            return Err(AnalyticsError::InvalidTrade(format!(
                "non-positive price {}",
                trade.price
            )));
        }
        if trade.mid_before <= Decimal::ZERO || trade.mid_after <= Decimal::ZERO {
            return Err(AnalyticsError::InvalidTrade(format!(
                "non-positive mid ({} / {})",
                trade.mid_before, trade.mid_after
            )));
        }

        // Inventory accrues on the prior position up to the trade's mid
        self.mark(trade.mid_before);
        let prior_position = self.position.quantity();

        match trade.side {
            Side::Buy => {
                // Paying below mid is profit; the mid dropping afterwards
                // is the cost of having bought from better-informed flow
                self.spread_capture += (trade.mid_before - trade.price) * trade.size;
                self.adverse_selection += (trade.mid_after - trade.mid_before) * trade.size;
                self.buys += 1;
            }
            Side::Sell => {
                self.spread_capture += (trade.price - trade.mid_before) * trade.size;
                self.adverse_selection += (trade.mid_before - trade.mid_after) * trade.size;
                self.sells += 1;
            }
        }

        self.position.apply_fill(trade.side, trade.price, trade.size);

        // The prior position's exposure over mid_before -> mid_after is
        // inventory PnL; the traded size over the same move is already
        // counted as adverse selection, so it starts accruing only from
        // mid_after.
        self.inventory_pnl += prior_position * (trade.mid_after - trade.mid_before);
        self.last_mark = Some(trade.mid_after);

        self.trades.push(trade);
        Ok(())
    }

    /// Cumulative spread capture
    pub fn spread_capture(&self) -> Decimal {
        self.spread_capture
    }

    /// Cumulative inventory (mark-to-market) PnL
    pub fn inventory_pnl(&self) -> Decimal {
        self.inventory_pnl
    }

    /// Cumulative adverse selection (usually negative)
    pub fn adverse_selection(&self) -> Decimal {
        self.adverse_selection
    }

    /// Sum of the three components
    ///
    /// Reconciles exactly with `cash_flow_pnl` at the latest mark.
    pub fn total_pnl(&self) -> Decimal {
        self.spread_capture + self.inventory_pnl + self.adverse_selection
    }

    pub fn breakdown(&self) -> PnlBreakdown {
        PnlBreakdown {
            spread_capture: self.spread_capture,
            inventory_pnl: self.inventory_pnl,
            adverse_selection: self.adverse_selection,
            total_pnl: self.total_pnl(),
        }
    }

    /// Independently computed cash-flow PnL at `mark`
    pub fn cash_flow_pnl(&self, mark: Decimal) -> Decimal {
        self.position.cash_flow_pnl(mark)
    }

    /// Open-position PnL versus the entry average of the current side
    pub fn unrealized_pnl(&self) -> Decimal {
        match self.last_mark {
            Some(mark) => self.position.unrealized_pnl(mark),
            None => Decimal::ZERO,
        }
    }

    pub fn last_mark(&self) -> Option<Decimal> {
        self.last_mark
    }

    /// Current signed position implied by the recorded trades
    pub fn position(&self) -> Decimal {
        self.position.quantity()
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    pub fn buys(&self) -> u64 {
        self.buys
    }

    pub fn sells(&self) -> u64 {
        self.sells
    }
}
