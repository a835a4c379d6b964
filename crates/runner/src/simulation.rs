//! Simulation event loop
//!
//! One step: quote, maybe trade, move the mid, settle, mark. The maker's
//! fill executes at the maker's own quoted price and size; the same taker
//! order is also routed through the synthetic ladder to measure the
//! impact-adjusted price it would pay in the background book.

use agora_analytics::PnlTracker;
use agora_book::{BookConfig, ExecutionReport, OrderBook};
use agora_core::{Side, Trade};
use agora_strategy::{MarketMaker, MarketMakerConfig};
use log::{info, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::price_process::PriceProcess;

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Starting mid price
    pub initial_mid: Decimal,
    /// Book half-spread (level spacing)
    pub half_spread: Decimal,
    /// Liquidity at each book level
    pub depth_per_level: Decimal,
    /// Book levels per side
    pub num_levels: usize,
    /// Maker half-spread
    pub quote_spread: Decimal,
    /// Maker size per side
    pub quote_size: Decimal,
    /// Maker position limit
    pub max_inventory: Decimal,
    /// Maker inventory skew factor
    pub inventory_skew_factor: Decimal,
    /// Number of steps to simulate
    pub num_steps: u64,
    /// Per-step volatility of the price process
    pub volatility: f64,
    /// Probability of a taker arrival per step
    pub arrival_rate: f64,
    /// Time increment per step
    pub dt: f64,
    /// Seed for the price process and arrivals
    pub seed: u64,
    /// Log progress every 10 steps
    pub verbose: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_mid: dec!(100),
            half_spread: dec!(0.10),
            depth_per_level: dec!(100),
            num_levels: 5,
            quote_spread: dec!(0.05),
            quote_size: dec!(10),
            max_inventory: dec!(100),
            inventory_skew_factor: dec!(0.5),
            num_steps: 100,
            volatility: 0.02,
            arrival_rate: 0.5,
            dt: 1.0,
            seed: 42,
            verbose: false,
        }
    }
}

impl SimulationConfig {
    fn book_config(&self) -> BookConfig {
        BookConfig {
            initial_mid: self.initial_mid,
            half_spread: self.half_spread,
            depth_per_level: self.depth_per_level,
            num_levels: self.num_levels,
        }
    }

    fn maker_config(&self) -> MarketMakerConfig {
        MarketMakerConfig {
            quote_spread: self.quote_spread,
            quote_size: self.quote_size,
            max_inventory: self.max_inventory,
            inventory_skew_factor: self.inventory_skew_factor,
        }
    }
}

/// Per-step record kept in the run history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub step: u64,
    /// Mid price after this step's move
    pub mid: Decimal,
    /// Maker's quoted prices this step
    pub bid_price: Decimal,
    pub ask_price: Decimal,
    /// Maker inventory after settlement
    pub inventory: Decimal,
    /// Maker side of the fill, if one occurred
    pub trade_side: Option<Side>,
    pub trade_price: Option<Decimal>,
    pub trade_size: Option<Decimal>,
    /// Impact-adjusted execution the taker would have received sweeping
    /// the background ladder
    pub taker_impact: Option<ExecutionReport>,
    pub cash_pnl: Decimal,
    pub total_pnl: Decimal,
}

/// Read-only summary snapshot of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub total_steps: u64,
    pub initial_mid: Decimal,
    pub final_mid: Decimal,
    pub price_change: Decimal,
    pub total_trades: u64,
    pub buys: u64,
    pub sells: u64,
    pub final_inventory: Decimal,
    pub cash_pnl: Decimal,
    pub unrealized_pnl: Decimal,
    pub spread_capture: Decimal,
    pub inventory_pnl: Decimal,
    pub adverse_selection: Decimal,
    pub total_pnl: Decimal,
}

/// The simulation driver
///
/// Owns the book, maker, tracker, and price process; advances them one
/// step at a time in a fixed order so the run is a deterministic
/// function of the configuration.
pub struct Simulation {
    config: SimulationConfig,
    book: OrderBook,
    maker: MarketMaker,
    tracker: PnlTracker,
    process: PriceProcess,
    mid: Decimal,
    current_step: u64,
    history: Vec<StepRecord>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let book = OrderBook::new(config.book_config())?;
        let maker = MarketMaker::new(config.maker_config());
        let mut tracker = PnlTracker::new();
        tracker.mark(config.initial_mid);
        let process = PriceProcess::new(config.volatility, config.dt, config.seed);

        Ok(Self {
            mid: config.initial_mid,
            current_step: 0,
            history: Vec::with_capacity(config.num_steps as usize),
            book,
            maker,
            tracker,
            process,
            config,
        })
    }

    /// Execute one simulation step
    pub fn step(&mut self) -> Result<StepRecord> {
        let mid_before = self.mid;
        let quote = self.maker.generate_quote(mid_before);

        // Arrival: a taker buy lifts the maker's ask (maker sells), a
        // taker sell hits the maker's bid (maker buys). A suppressed side
        // produces no fill.
        let mut pending: Option<(Side, Decimal, Decimal)> = None;
        let mut taker_impact = None;
        if let Some(taker_side) = self.process.next_arrival(self.config.arrival_rate) {
            let (maker_side, price, size) = match taker_side {
                Side::Buy => (Side::Sell, quote.ask_price, quote.ask_size),
                Side::Sell => (Side::Buy, quote.bid_price, quote.bid_size),
            };
            if size > Decimal::ZERO {
                taker_impact = Some(self.book.execute_market_order(taker_side, size));
                pending = Some((maker_side, price, size));
            }
        }

        // Advance the mid and regenerate the ladder around it
        let mid_after = self.process.next_mid(mid_before);
        self.mid = mid_after;
        self.book.set_mid(mid_after);

        // Settle the fill with the maker, then the tracker
        let mut trade_side = None;
        let mut trade_price = None;
        let mut trade_size = None;
        if let Some((side, price, size)) = pending {
            match self.maker.accept_fill(side, price, size) {
                Ok(()) => {
                    let trade =
                        Trade::new(side, price, size, mid_before, mid_after, self.current_step);
                    self.tracker.record_trade(trade)?;
                    trade_side = Some(side);
                    trade_price = Some(price);
                    trade_size = Some(size);
                }
                Err(err) => {
                    // Quote sizes are capped by remaining capacity, so
                    // this only fires if the driver mis-sizes an order
                    warn!("step {}: fill rejected: {err}", self.current_step);
                }
            }
        }

        // Mark every step regardless of trades
        self.tracker.mark(mid_after);

        let record = StepRecord {
            step: self.current_step,
            mid: mid_after,
            bid_price: quote.bid_price,
            ask_price: quote.ask_price,
            inventory: self.maker.position(),
            trade_side,
            trade_price,
            trade_size,
            taker_impact,
            cash_pnl: self.maker.cash_pnl(),
            total_pnl: self.tracker.total_pnl(),
        };
        self.history.push(record.clone());
        self.current_step += 1;

        if self.config.verbose && self.current_step % 10 == 0 {
            info!(
                "step {}/{}: mid={} inventory={} pnl={}",
                self.current_step,
                self.config.num_steps,
                record.mid.round_dp(4),
                record.inventory,
                record.total_pnl.round_dp(4)
            );
        }

        Ok(record)
    }

    /// Run the configured number of steps and summarize
    pub fn run(&mut self) -> Result<SimulationSummary> {
        for _ in 0..self.config.num_steps {
            self.step()?;
        }
        Ok(self.summary())
    }

    /// Summary snapshot of the run so far
    pub fn summary(&self) -> SimulationSummary {
        SimulationSummary {
            total_steps: self.current_step,
            initial_mid: self.config.initial_mid,
            final_mid: self.mid,
            price_change: self.mid - self.config.initial_mid,
            total_trades: self.tracker.trade_count() as u64,
            buys: self.tracker.buys(),
            sells: self.tracker.sells(),
            final_inventory: self.maker.position(),
            cash_pnl: self.maker.cash_pnl(),
            unrealized_pnl: self.tracker.unrealized_pnl(),
            spread_capture: self.tracker.spread_capture(),
            inventory_pnl: self.tracker.inventory_pnl(),
            adverse_selection: self.tracker.adverse_selection(),
            total_pnl: self.tracker.total_pnl(),
        }
    }

    pub fn history(&self) -> &[StepRecord] {
        &self.history
    }

    pub fn tracker(&self) -> &PnlTracker {
        &self.tracker
    }

    pub fn maker(&self) -> &MarketMaker {
        &self.maker
    }

    pub fn book(&self) -> &OrderBook {
        &self.book
    }

    pub fn mid(&self) -> Decimal {
        self.mid
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_runs() {
        let config = SimulationConfig {
            num_steps: 200,
            ..Default::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        let summary = sim.run().unwrap();

        assert_eq!(summary.total_steps, 200);
        assert_eq!(sim.history().len(), 200);
        assert!(summary.total_trades > 0);
        assert_eq!(summary.buys + summary.sells, summary.total_trades);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SimulationConfig {
            num_levels: 0,
            ..Default::default()
        };
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn test_step_by_step_matches_run() {
        let config = SimulationConfig {
            num_steps: 50,
            ..Default::default()
        };

        let mut stepped = Simulation::new(config.clone()).unwrap();
        for i in 0..50 {
            let record = stepped.step().unwrap();
            assert_eq!(record.step, i);
        }

        let mut ran = Simulation::new(config).unwrap();
        let summary = ran.run().unwrap();

        assert_eq!(stepped.summary(), summary);
    }

    #[test]
    fn test_trades_occur_at_quoted_prices() {
        let config = SimulationConfig {
            num_steps: 300,
            ..Default::default()
        };
        let mut sim = Simulation::new(config).unwrap();
        sim.run().unwrap();

        for record in sim.history() {
            if let (Some(side), Some(price)) = (record.trade_side, record.trade_price) {
                match side {
                    Side::Buy => assert_eq!(price, record.bid_price),
                    Side::Sell => assert_eq!(price, record.ask_price),
                }
            }
        }
    }
}
