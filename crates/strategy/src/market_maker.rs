//! Basic Inventory-Based Market Maker
//!
//! Quotes bid/ask around the mid price and shifts both quotes against the
//! current inventory: a long position pushes the quotes down, biasing
//! incoming flow toward lifting the ask and reducing the position. At the
//! position limit the growing side stops quoting entirely while the
//! reducing side continues.

use agora_core::{Position, Side};
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StrategyError};
use crate::quote::Quote;
use crate::risk::RiskManager;

/// Configuration for the market maker
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MarketMakerConfig {
    /// Half-spread for quotes (distance from mid on each side)
    pub quote_spread: Decimal,
    /// Size quoted on each side
    pub quote_size: Decimal,
    /// Maximum absolute position
    pub max_inventory: Decimal,
    /// Fraction of the quoted half-spread to shift at full inventory
    /// saturation; the effective skew is clamped to [-1, 1]
    pub inventory_skew_factor: Decimal,
}

impl Default for MarketMakerConfig {
    fn default() -> Self {
        Self {
            quote_spread: dec!(0.05),
            quote_size: dec!(10),
            max_inventory: dec!(100),
            inventory_skew_factor: dec!(0.5),
        }
    }
}

/// Inventory-based market maker
pub struct MarketMaker {
    config: MarketMakerConfig,
    position: Position,
    risk: Option<RiskManager>,
}

impl MarketMaker {
    pub fn new(config: MarketMakerConfig) -> Self {
        Self {
            config,
            position: Position::new(),
            risk: None,
        }
    }

    /// Attach quote-level risk controls
    pub fn with_risk_manager(mut self, risk: RiskManager) -> Self {
        self.risk = Some(risk);
        self
    }

    /// Current signed position
    pub fn position(&self) -> Decimal {
        self.position.quantity()
    }

    /// Average entry price of the long side
    pub fn avg_buy_price(&self) -> Option<Decimal> {
        self.position.avg_buy_price()
    }

    /// Average entry price of the short side
    pub fn avg_sell_price(&self) -> Option<Decimal> {
        self.position.avg_sell_price()
    }

    /// Net cash from completed flow
    pub fn cash_pnl(&self) -> Decimal {
        self.position.cash_pnl()
    }

    /// Full position state
    pub fn inventory(&self) -> &Position {
        &self.position
    }

    pub fn config(&self) -> &MarketMakerConfig {
        &self.config
    }

    /// Inventory skew as a signed fraction of the quoted half-spread
    ///
    /// Proportional to how saturated the position is, clamped to [-1, 1].
    fn skew(&self) -> Decimal {
        if self.config.max_inventory <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        let saturation = self.position.quantity() / self.config.max_inventory;
        (self.config.inventory_skew_factor * saturation)
            .clamp(Decimal::NEGATIVE_ONE, Decimal::ONE)
    }

    /// Generate a two-sided quote around `mid`
    ///
    /// Never mutates inventory. Each side's size is capped by the capacity
    /// remaining before the position limit, so a side with no capacity
    /// left quotes size zero while the reducing side keeps quoting.
    pub fn generate_quote(&self, mid: Decimal) -> Quote {
        let shift = -self.skew() * self.config.quote_spread;
        let bid_price = mid - self.config.quote_spread + shift;
        let ask_price = mid + self.config.quote_spread + shift;

        let bid_capacity =
            (self.config.max_inventory - self.position.quantity()).max(Decimal::ZERO);
        let ask_capacity =
            (self.config.max_inventory + self.position.quantity()).max(Decimal::ZERO);
        let bid_size = self.config.quote_size.min(bid_capacity);
        let ask_size = self.config.quote_size.min(ask_capacity);

        let quote = Quote::new(bid_price, ask_price, bid_size, ask_size);
        match &self.risk {
            Some(risk) => {
                let (quote, _active) = risk.apply(
                    quote,
                    self.position.quantity(),
                    self.config.max_inventory,
                    self.position.cash_pnl(),
                );
                quote
            }
            None => quote,
        }
    }

    /// Apply a fill to the maker's inventory
    ///
    /// Rejects (no-op) a fill that would push the position beyond the
    /// limit. Quoted sizes already respect the limit, so a rejection
    /// means the caller sized an order against something other than the
    /// current quote.
    pub fn accept_fill(&mut self, side: Side, price: Decimal, size: Decimal) -> Result<()> {
        let attempted = self.position.quantity() + side.sign() * size;
        if attempted.abs() > self.config.max_inventory {
            debug!(
                "rejecting {:?} fill of {} @ {}: position would reach {}",
                side, size, price, attempted
            );
            return Err(StrategyError::PositionLimitExceeded {
                attempted,
                limit: self.config.max_inventory,
            });
        }

        self.position.apply_fill(side, price, size);
        debug!(
            "filled {:?} {} @ {}: position {}",
            side,
            size,
            price,
            self.position.quantity()
        );
        Ok(())
    }
}
