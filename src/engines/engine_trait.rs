//! Engine abstraction used by the game session and the CLI.
//!
//! An engine picks a move for a position under a set of search limits, so
//! different strategies can be selected at runtime behind one trait object.

use crate::game_state::game_state::GameState;
use crate::search::iterative_deepening::SearchResult;
use crate::search::time_management::SearchLimits;

#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub result: SearchResult,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Forget anything learned from a previous game.
    fn new_game(&mut self) {}

    /// Nodes visited by the most recent `choose_move`.
    fn nodes(&self) -> u64;

    /// Search `game_state` in place; it is restored before returning.
    fn choose_move(&mut self, game_state: &mut GameState, limits: &SearchLimits) -> EngineOutput;
}
