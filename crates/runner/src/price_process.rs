//! Stochastic drivers: price path and order arrivals
//!
//! Geometric-Brownian-style mid-price increments and Bernoulli order
//! arrivals, all drawn from a single seeded generator so that runs are
//! reproducible from the seed alone.

use agora_core::Side;
use rand::prelude::*;
use rand_distr::StandardNormal;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Seeded source of price moves and taker arrivals
pub struct PriceProcess {
    rng: StdRng,
    volatility: f64,
    dt: f64,
}

impl PriceProcess {
    pub fn new(volatility: f64, dt: f64, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            volatility,
            dt,
        }
    }

    /// Advance the mid price by one step
    ///
    /// `mid += mid * volatility * sqrt(dt) * N(0,1)`, floored so the mid
    /// stays strictly positive even under extreme draws.
    pub fn next_mid(&mut self, mid: Decimal) -> Decimal {
        let mid_f64 = mid.to_f64().unwrap_or(0.0);
        let z: f64 = self.rng.sample(StandardNormal);
        let change = mid_f64 * self.volatility * self.dt.sqrt() * z;
        let next = (mid_f64 + change).max(mid_f64 * 0.01);
        Decimal::from_f64_retain(next).unwrap_or(mid)
    }

    /// Draw a taker arrival for this step
    ///
    /// With probability `arrival_rate` a market order arrives, buy or
    /// sell with equal probability; `None` otherwise. The side is the
    /// *taker's* side: a taker buy lifts the maker's ask.
    pub fn next_arrival(&mut self, arrival_rate: f64) -> Option<Side> {
        if self.rng.gen_range(0.0..1.0) >= arrival_rate {
            return None;
        }
        if self.rng.gen_range(0.0..1.0) < 0.5 {
            Some(Side::Buy)
        } else {
            Some(Side::Sell)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deterministic_with_seed() {
        let mut p1 = PriceProcess::new(0.02, 1.0, 42);
        let mut p2 = PriceProcess::new(0.02, 1.0, 42);

        let mut mid1 = dec!(100);
        let mut mid2 = dec!(100);
        for _ in 0..50 {
            mid1 = p1.next_mid(mid1);
            mid2 = p2.next_mid(mid2);
            assert_eq!(mid1, mid2);
            assert_eq!(p1.next_arrival(0.5), p2.next_arrival(0.5));
        }
    }

    #[test]
    fn test_mid_stays_positive() {
        let mut process = PriceProcess::new(0.5, 1.0, 7);
        let mut mid = dec!(100);
        for _ in 0..500 {
            mid = process.next_mid(mid);
            assert!(mid > Decimal::ZERO, "mid collapsed to {mid}");
        }
    }

    #[test]
    fn test_zero_volatility_holds_price() {
        let mut process = PriceProcess::new(0.0, 1.0, 1);
        let mid = process.next_mid(dec!(100));
        assert_eq!(mid, dec!(100));
    }

    #[test]
    fn test_arrival_rate_extremes() {
        let mut process = PriceProcess::new(0.02, 1.0, 3);
        for _ in 0..100 {
            assert_eq!(process.next_arrival(0.0), None);
            assert!(process.next_arrival(1.0).is_some());
        }
    }
}
