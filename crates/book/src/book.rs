//! Synthetic order book
//!
//! The ladder is rebuilt from the configuration on every mid-price update:
//! partial depletion does not survive a mid move. The book is a snapshot
//! of available liquidity around the current mid, not a persistent order
//! queue with its own history.

use agora_core::{PriceLevel, Side};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{BookError, Result};

/// Order book configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BookConfig {
    /// Initial mid price
    pub initial_mid: Decimal,
    /// Distance from mid to the nearest level; also the spacing between levels
    pub half_spread: Decimal,
    /// Quantity available at each level
    pub depth_per_level: Decimal,
    /// Number of levels per side
    pub num_levels: usize,
}

impl BookConfig {
    pub fn validate(&self) -> Result<()> {
        if self.initial_mid <= Decimal::ZERO {
            return Err(BookError::InvalidConfig(format!(
                "initial_mid must be positive, got {}",
                self.initial_mid
            )));
        }
        if self.half_spread <= Decimal::ZERO {
            return Err(BookError::InvalidConfig(format!(
                "half_spread must be positive, got {}",
                self.half_spread
            )));
        }
        if self.depth_per_level <= Decimal::ZERO {
            return Err(BookError::InvalidConfig(format!(
                "depth_per_level must be positive, got {}",
                self.depth_per_level
            )));
        }
        if self.num_levels < 1 {
            return Err(BookError::InvalidConfig(
                "num_levels must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self {
            initial_mid: dec!(100),
            half_spread: dec!(0.10),
            depth_per_level: dec!(100),
            num_levels: 5,
        }
    }
}

/// Result of executing a market order against the book
///
/// A request larger than the remaining depth is a partial fill, not an
/// error: `liquidity_exhausted` is set and the average covers only the
/// filled portion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Quantity actually filled; never exceeds the request or the depth
    pub filled_size: Decimal,
    /// Size-weighted average price of the filled portion; zero if nothing filled
    pub avg_fill_price: Decimal,
    /// Number of price levels consumed from
    pub levels_touched: usize,
    /// True when the request exceeded the remaining depth on that side
    pub liquidity_exhausted: bool,
}

/// Synthetic order book
#[derive(Debug, Clone)]
pub struct OrderBook {
    config: BookConfig,
    mid_price: Decimal,
    /// Best bid first (descending prices)
    bids: Vec<PriceLevel>,
    /// Best ask first (ascending prices)
    asks: Vec<PriceLevel>,
}

impl OrderBook {
    pub fn new(config: BookConfig) -> Result<Self> {
        config.validate()?;
        let mut book = Self {
            config,
            mid_price: config.initial_mid,
            bids: Vec::with_capacity(config.num_levels),
            asks: Vec::with_capacity(config.num_levels),
        };
        book.rebuild_levels();
        Ok(book)
    }

    /// Update the mid price, regenerating both ladders
    ///
    /// Any partial depletion from earlier executions is discarded.
    pub fn set_mid(&mut self, new_mid: Decimal) {
        self.mid_price = new_mid;
        self.rebuild_levels();
    }

    fn rebuild_levels(&mut self) {
        self.bids.clear();
        self.asks.clear();
        for i in 0..self.config.num_levels {
            let offset = self.config.half_spread * Decimal::from(i as u64 + 1);
            self.bids.push(PriceLevel::new(
                self.mid_price - offset,
                self.config.depth_per_level,
            ));
            self.asks.push(PriceLevel::new(
                self.mid_price + offset,
                self.config.depth_per_level,
            ));
        }
    }

    /// Execute a market order, walking the opposite side best-to-worst
    ///
    /// A market buy consumes ask levels, a market sell consumes bid
    /// levels. Bigger orders walk further into the ladder and receive a
    /// worse size-weighted average price.
    pub fn execute_market_order(&mut self, side: Side, requested_size: Decimal) -> ExecutionReport {
        let levels = match side {
            Side::Buy => &mut self.asks,
            Side::Sell => &mut self.bids,
        };

        let mut remaining = requested_size.max(Decimal::ZERO);
        let mut filled = Decimal::ZERO;
        let mut notional = Decimal::ZERO;
        let mut levels_touched = 0;

        for level in levels.iter_mut() {
            if remaining.is_zero() {
                break;
            }
            if level.is_empty() {
                continue;
            }
            let take = remaining.min(level.quantity);
            level.quantity -= take;
            remaining -= take;
            filled += take;
            notional += level.price * take;
            levels_touched += 1;
        }

        let avg_fill_price = if filled.is_zero() {
            Decimal::ZERO
        } else {
            notional / filled
        };
        let liquidity_exhausted = remaining > Decimal::ZERO;
        if liquidity_exhausted {
            debug!(
                "insufficient liquidity for {:?} {}: filled {} across {} levels",
                side, requested_size, filled, levels_touched
            );
        }

        ExecutionReport {
            filled_size: filled,
            avg_fill_price,
            levels_touched,
            liquidity_exhausted,
        }
    }

    pub fn mid_price(&self) -> Decimal {
        self.mid_price
    }

    /// Best remaining bid price, skipping depleted levels
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.iter().find(|l| !l.is_empty()).map(|l| l.price)
    }

    /// Best remaining ask price, skipping depleted levels
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.iter().find(|l| !l.is_empty()).map(|l| l.price)
    }

    /// Spread between best remaining ask and bid
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    pub fn total_bid_depth(&self) -> Decimal {
        self.bids.iter().map(|l| l.quantity).sum()
    }

    pub fn total_ask_depth(&self) -> Decimal {
        self.asks.iter().map(|l| l.quantity).sum()
    }

    pub fn bids(&self) -> &[PriceLevel] {
        &self.bids
    }

    pub fn asks(&self) -> &[PriceLevel] {
        &self.asks
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }
}
