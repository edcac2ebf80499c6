//! Core game state, the tick engine and offline reconciliation.

pub mod constants;
pub mod core_game;
pub mod error;
pub mod game_loop;
pub mod game_state;
pub mod offline;
pub mod resources;
pub mod tick;

pub use core_game::CoreGame;
pub use error::GameError;
pub use game_loop::GameLoop;
pub use game_state::{GameHistory, GameState};
pub use offline::{calculate_offline_progression, process_offline_progression, OfflineProgress, OfflineReport};
pub use resources::{
    calculate_resource_generation, distribute_experience, exp_generation, gold_generation,
    item_drops, strength_multiplier, ExperienceAllocation, TickOutcome,
};
pub use tick::{apply_tick_outcome, game_tick, PartyTick, TickEvent, TickResult};
