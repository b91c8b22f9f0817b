//! Cheese Chase Runtime
//!
//! Headless driver for a full game session: loads the boot configuration,
//! reaches the backend when it can, and plays through the levels with the
//! autopilot.
//!
//! Run with: cargo run --bin cheese-chase -- --seed 7 --offline

mod boot_config;
mod session;

use boot_config::BootConfig;
use session::Outcome;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match BootConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };
    config.print_summary();

    let summary = session::run(&config);
    log::info!(
        "Session ended: {:?} after {} ticks, {} points, {} restarts",
        summary.outcome,
        summary.ticks,
        summary.points,
        summary.restarts
    );

    if summary.outcome == Outcome::Aborted {
        std::process::exit(1);
    }
}
