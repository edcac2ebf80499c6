//! Main simulation runner using CoreGame for real game mechanics.
//!
//! Statistics are tracked externally from TickResult values; the runner
//! never reimplements a formula.

use super::config::SimConfig;
use super::report::SimReport;
use crate::core::constants::SUMMON_RANK_COSTS;
use crate::core::core_game::CoreGame;
use crate::core::game_loop::GameLoop;
use crate::core::tick::TickResult;
use crate::world::StaticContent;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, warn};

/// Statistics of one completed run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub total_ticks: u64,
    /// Gold earned by ticks, before anything was spent
    pub gold_earned: u64,
    pub experience_earned: u64,
    pub final_gold: u64,
    pub highest_level: u64,
    pub final_members: usize,
    pub level_ups: u64,
    pub items_dropped: u64,
    pub summons: u64,
    /// Value of the chest paid for the offline phase
    pub offline_treasure: u64,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + run_idx as u64),
            None => ChaCha8Rng::from_entropy(),
        };

        let run = simulate_single_run(config, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Level {}, Members {}, Gold earned {}, Drops {}, Summons {}",
                run_idx + 1,
                config.num_runs,
                run.highest_level,
                run.final_members,
                run.gold_earned,
                run.items_dropped,
                run.summons
            );
        }
        all_runs.push(run);
    }

    SimReport::from_runs(all_runs, config.ticks_per_run)
}

/// Accumulates data from TickResult values.
#[derive(Default)]
struct SimStats {
    gold_earned: u64,
    experience_earned: u64,
    level_ups: u64,
    items_dropped: u64,
    summons: u64,
}

impl SimStats {
    fn process_tick(&mut self, result: &TickResult) {
        self.gold_earned += result.gold_gained();
        self.experience_earned += result.experience_gained();
        self.level_ups += result.level_ups() as u64;
        self.items_dropped += result.items_dropped() as u64;
    }
}

fn simulate_single_run(config: &SimConfig, rng: &mut ChaCha8Rng) -> RunStats {
    let mut game = CoreGame::new(0);
    let mut stats = SimStats::default();

    let state = game.state_mut();
    if state.parties[0].location.area_id != config.area_id {
        if let Err(e) = state
            .move_party(0, config.area_id)
            .and_then(|_| state.arrive_party(0))
        {
            warn!(area_id = config.area_id, error = %e, "could not place party");
        }
    }

    for _ in 0..config.ticks_per_run {
        let result = game.tick(rng);
        stats.process_tick(&result);

        if let Some(rank) = config.summon_rank {
            try_summon(&mut game, rank, config.max_members, rng, &mut stats);
        }
    }

    let mut offline_treasure = 0;
    if let Some(minutes) = config.offline_minutes {
        // The run starts at time 0 and each tick is one second
        let saved_at = config.ticks_per_run as i64;
        game.snapshot(saved_at);
        let state = game.into_state();
        game = CoreGame::resume(state, StaticContent::builtin(), saved_at + minutes * 60);
        offline_treasure = game
            .offline_report()
            .map(|r| r.treasure_value)
            .unwrap_or_default();
    }

    let state = game.state();
    RunStats {
        total_ticks: config.ticks_per_run,
        gold_earned: stats.gold_earned,
        experience_earned: stats.experience_earned,
        final_gold: state.gold,
        highest_level: state.history.highest_level,
        final_members: state.parties.iter().map(|p| p.len()).sum(),
        level_ups: stats.level_ups,
        items_dropped: stats.items_dropped,
        summons: stats.summons,
        offline_treasure,
    }
}

fn try_summon(
    game: &mut CoreGame,
    rank: u8,
    max_members: usize,
    rng: &mut ChaCha8Rng,
    stats: &mut SimStats,
) {
    let Some(&cost) = SUMMON_RANK_COSTS.get(rank as usize) else {
        return;
    };
    let state = game.state_mut();
    if state.gold < cost || state.parties[0].len() >= max_members {
        return;
    }
    match state.summon_member(0, rank, rng) {
        Ok(_) => stats.summons += 1,
        Err(e) => debug!(rank, error = %e, "simulated summon failed"),
    }
}
