//! Balance simulator.
//!
//! Drives [`CoreGame`](crate::core::CoreGame) for many seeded runs and
//! aggregates what the tick results report.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, RunStats};
