//! Run a market-making simulation and print the PnL decomposition.
//!
//! Seed comes from `AGORA_SEED` when set; pass `--json` for a
//! machine-readable summary.

use agora_runner::{Simulation, SimulationConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut config = SimulationConfig {
        verbose: true,
        ..Default::default()
    };
    if let Ok(seed) = std::env::var("AGORA_SEED") {
        config.seed = seed.parse()?;
    }
    let json = std::env::args().any(|arg| arg == "--json");

    let mut sim = Simulation::new(config)?;
    let summary = sim.run()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("=== Market-Making Simulation ===");
    println!("Steps:             {}", summary.total_steps);
    println!("Initial mid:       {}", summary.initial_mid.round_dp(4));
    println!("Final mid:         {}", summary.final_mid.round_dp(4));
    println!("Price change:      {}", summary.price_change.round_dp(4));
    println!();
    println!("Trades:            {}", summary.total_trades);
    println!("  Buys:            {}", summary.buys);
    println!("  Sells:           {}", summary.sells);
    println!("Final inventory:   {}", summary.final_inventory);
    println!();
    println!("PnL decomposition:");
    println!("  Spread capture:    {}", summary.spread_capture.round_dp(4));
    println!("  Inventory risk:    {}", summary.inventory_pnl.round_dp(4));
    println!("  Adverse selection: {}", summary.adverse_selection.round_dp(4));
    println!("  Total:             {}", summary.total_pnl.round_dp(4));
    println!();
    println!("Cash PnL:          {}", summary.cash_pnl.round_dp(4));
    println!("Unrealized PnL:    {}", summary.unrealized_pnl.round_dp(4));

    Ok(())
}
