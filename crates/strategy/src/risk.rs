//! Quote-level risk controls
//!
//! Kill switch on realized cash drawdown and size throttling as the
//! inventory approaches its limit. Applied to a quote after pricing and
//! sizing, before it is handed to the driver.

use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::quote::Quote;

/// Risk control configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Stop quoting entirely once the drawdown limit is breached
    pub enable_kill_switch: bool,
    /// Cash drawdown that trips the kill switch (absolute value)
    pub drawdown_limit: Option<Decimal>,
    /// Scale quote sizes down as inventory approaches the limit
    pub enable_size_throttle: bool,
    /// Floor for the throttle scale factor
    pub min_throttle: Decimal,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            enable_kill_switch: false,
            drawdown_limit: None,
            enable_size_throttle: true,
            min_throttle: dec!(0.2),
        }
    }
}

/// Applies risk controls to outgoing quotes
#[derive(Debug, Clone, Copy)]
pub struct RiskManager {
    config: RiskConfig,
}

impl RiskManager {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    /// Adjust a quote for the current risk state
    ///
    /// Returns the adjusted quote and whether quoting remains active
    /// (false once the kill switch has tripped).
    pub fn apply(
        &self,
        quote: Quote,
        position: Decimal,
        max_inventory: Decimal,
        cash_pnl: Decimal,
    ) -> (Quote, bool) {
        let mut quote = quote;

        if self.config.enable_kill_switch {
            if let Some(limit) = self.config.drawdown_limit {
                if cash_pnl <= -limit.abs() {
                    warn!("kill switch tripped: cash pnl {} breaches -{}", cash_pnl, limit.abs());
                    quote.bid_size = Decimal::ZERO;
                    quote.ask_size = Decimal::ZERO;
                    return (quote, false);
                }
            }
        }

        if self.config.enable_size_throttle && max_inventory > Decimal::ZERO {
            let saturation = (position.abs() / max_inventory).min(Decimal::ONE);
            let scale = (Decimal::ONE - saturation).max(self.config.min_throttle);
            quote.bid_size *= scale;
            quote.ask_size *= scale;
        }

        (quote, true)
    }
}

impl Default for RiskManager {
    fn default() -> Self {
        Self::new(RiskConfig::default())
    }
}
