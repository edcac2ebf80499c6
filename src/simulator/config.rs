//! Simulation configuration.

use crate::core::constants::STARTING_AREA_ID;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Simulated seconds per run
    pub ticks_per_run: u64,

    /// Area the first party farms for the whole run
    pub area_id: u32,

    /// Summon rank to buy whenever the treasury can afford it (None = never summon)
    pub summon_rank: Option<u8>,

    /// Stop summoning once the first party has this many members
    pub max_members: usize,

    /// Minutes of absence reconciled after the live ticks (None = no offline phase)
    pub offline_minutes: Option<i64>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = detailed)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            seed: None,
            ticks_per_run: 3_600,
            area_id: STARTING_AREA_ID,
            summon_rank: Some(0),
            max_members: 6,
            offline_minutes: None,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for comparing the yield of one area
    pub fn area_balance_test(area_id: u32) -> Self {
        Self {
            num_runs: 20,
            area_id,
            ..Default::default()
        }
    }

    /// A full day of play with a long absence at the end
    pub fn long_session_test() -> Self {
        Self {
            num_runs: 10,
            ticks_per_run: 24 * 3_600,
            summon_rank: Some(1),
            offline_minutes: Some(120),
            ..Default::default()
        }
    }

    /// Solo starter, no summons, for checking the raw level curve
    pub fn solo_test(ticks_per_run: u64) -> Self {
        Self {
            num_runs: 10,
            ticks_per_run,
            summon_rank: None,
            ..Default::default()
        }
    }
}
