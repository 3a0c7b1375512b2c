//! A game in progress: one position, its history, and an engine to search it.
//!
//! This is the surface external drivers use. Moves come in and go out as
//! coordinate text (`e2e4`, `e7e8q`) and are always matched against the
//! legal moves of the current position before they are applied.

use crate::engines::engine_iterative::IterativeEngine;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::ChessError;
use crate::game_state::chess_types::GameStatus;
use crate::game_state::game_state::GameState;
use crate::game_state::game_status::game_status;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::move_generation::legal_move_shared::MoveList;
use crate::moves::chess_move::ChessMove;
use crate::search::iterative_deepening::SearchResult;
use crate::search::time_management::SearchLimits;
use crate::utils::long_algebraic::resolve_long_algebraic;
use crate::utils::render_game_state::render_game_state;
use crate::utils::san::move_to_san;

pub struct GameSession {
    game_state: GameState,
    engine: Box<dyn Engine>,
}

impl GameSession {
    pub fn new() -> Self {
        Self::with_engine(GameState::new_game(), Box::new(IterativeEngine::default()))
    }

    /// Fails before any other work if `fen` is malformed.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let game_state = GameState::from_fen(fen)?;
        Ok(Self::with_engine(game_state, Box::new(IterativeEngine::default())))
    }

    pub fn with_engine(game_state: GameState, engine: Box<dyn Engine>) -> Self {
        Self { game_state, engine }
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }

    pub fn fen(&self) -> String {
        self.game_state.get_fen()
    }

    pub fn render(&self) -> String {
        render_game_state(&self.game_state)
    }

    pub fn legal_moves(&mut self) -> MoveList {
        generate_legal_moves(&mut self.game_state)
    }

    /// Legal moves in coordinate notation, in generator order.
    pub fn legal_move_texts(&mut self) -> Vec<String> {
        self.legal_moves().iter().map(ChessMove::to_long_algebraic).collect()
    }

    /// Standard algebraic notation for a legal move of the current position.
    pub fn san(&mut self, mv: ChessMove) -> String {
        move_to_san(&mut self.game_state, mv)
    }

    pub fn legal_move_sans(&mut self) -> Vec<String> {
        self.legal_moves().into_iter().map(|mv| self.san(mv)).collect()
    }

    pub fn apply_move(&mut self, text: &str) -> Result<ChessMove, ChessError> {
        let legal = self.legal_moves();
        let mv = resolve_long_algebraic(text, &legal)?;
        make_move(&mut self.game_state, mv);
        log::debug!("applied {mv}, now {}", self.fen());
        Ok(mv)
    }

    pub fn undo_move(&mut self) -> Result<ChessMove, ChessError> {
        if self.game_state.undo_stack.is_empty() {
            return Err(ChessError::NothingToUndo);
        }
        Ok(unmake_move(&mut self.game_state))
    }

    pub fn status(&mut self) -> GameStatus {
        let legal = self.legal_moves();
        game_status(&self.game_state, &legal)
    }

    pub fn search(&mut self, limits: &SearchLimits) -> EngineOutput {
        self.engine.choose_move(&mut self.game_state, limits)
    }

    /// Search and play the best move. Returns `None` when the game is over.
    pub fn play_best_move(&mut self, limits: &SearchLimits) -> Option<SearchResult> {
        if self.status() != GameStatus::InProgress {
            return None;
        }
        let result = self.search(limits).result;
        let mv = result.best_move?;
        make_move(&mut self.game_state, mv);
        Some(result)
    }

    pub fn new_game(&mut self) {
        self.game_state = GameState::new_game();
        self.engine.new_game();
    }

    pub fn nodes(&self) -> u64 {
        self.engine.nodes()
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
