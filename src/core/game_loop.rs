//! Shared game loop trait for the live game and the simulator.

use crate::core::game_state::GameState;
use crate::core::tick::TickResult;
use rand::Rng;

/// Core game loop trait - implemented by the game engine.
///
/// This trait abstracts tick execution, allowing:
/// - A live driver to call `tick` once per second and render the events
/// - The simulator to run thousands of ticks for balance testing
pub trait GameLoop {
    /// Execute one simulated second. Returns what happened.
    fn tick(&mut self, rng: &mut impl Rng) -> TickResult;

    /// Get current game state (read-only).
    fn state(&self) -> &GameState;

    /// Get current game state (mutable).
    fn state_mut(&mut self) -> &mut GameState;

    /// Game age in seconds.
    fn elapsed_seconds(&self) -> u64 {
        self.state().counter
    }
}
