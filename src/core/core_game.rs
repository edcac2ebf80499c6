//! Core game engine implementing the GameLoop trait.
//!
//! A [`CoreGame`] owns the game state and the content tables it reads. It is
//! created either fresh or from a loaded save; in the second case offline
//! progression is reconciled inside the constructor, so it runs exactly once
//! and always before the first live tick.

use super::game_loop::GameLoop;
use super::game_state::GameState;
use super::offline::{process_offline_progression, OfflineReport};
use super::tick::{game_tick, TickResult};
use crate::world::{ContentLookup, StaticContent};
use rand::Rng;

pub struct CoreGame<C = StaticContent> {
    state: GameState,
    content: C,
    offline_report: Option<OfflineReport>,
}

impl CoreGame<StaticContent> {
    /// New game on the built-in content.
    pub fn new(current_time: i64) -> Self {
        Self::with_content(GameState::new(current_time), StaticContent::builtin())
    }
}

impl<C: ContentLookup> CoreGame<C> {
    /// Wraps a state without any offline reconciliation.
    pub fn with_content(state: GameState, content: C) -> Self {
        Self {
            state,
            content,
            offline_report: None,
        }
    }

    /// Resumes a loaded game: rehydrates every member, then reconciles the
    /// time since `state.last_save_time`.
    pub fn resume(mut state: GameState, content: C, current_time: i64) -> Self {
        state.rehydrate();
        let report = process_offline_progression(&mut state, &content, current_time);
        Self {
            state,
            content,
            offline_report: Some(report),
        }
    }

    /// What offline reconciliation produced, if this game was resumed.
    pub fn offline_report(&self) -> Option<&OfflineReport> {
        self.offline_report.as_ref()
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    /// State ready to be written out, stamped with `current_time`.
    pub fn snapshot(&mut self, current_time: i64) -> &GameState {
        self.state.mark_saved(current_time);
        &self.state
    }

    /// Hands the state back.
    pub fn into_state(self) -> GameState {
        self.state
    }
}

impl<C: ContentLookup> GameLoop for CoreGame<C> {
    fn tick(&mut self, rng: &mut impl Rng) -> TickResult {
        game_tick(&mut self.state, &self.content, rng)
    }

    fn state(&self) -> &GameState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
