//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! One `GameState` is searched in place: every child is entered through a
//! `MoveGuard`, so leaving a frame for any reason (cutoff, terminal, node
//! ceiling) restores the parent position. At the horizon the search continues
//! into a quiescence phase over captures and promotions, and never stops
//! while the side to move is in check.
//!
//! Scores are relative to the side to move. A forced win scores
//! `MATE_SCORE - ply` so that shorter mates rank higher.

use std::time::{Duration, Instant};

use crate::game_state::chess_rules::MAX_PLY;
use crate::game_state::chess_types::{Color, GameStatus};
use crate::game_state::game_state::GameState;
use crate::game_state::game_status::game_status;
use crate::move_generation::legal_move_apply::MoveGuard;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, retain_unquiet_moves};
use crate::move_generation::legal_move_shared::MoveList;
use crate::moves::chess_move::ChessMove;
use crate::search::board_scoring::{absolute_score, BoardScorer};
use crate::search::move_ordering::{order_by_mvv_lva, MoveOrderingCache};
use crate::search::time_management::{DeepeningPolicy, SearchLimits};

pub const MATE_SCORE: i32 = 30_000;
pub const INFINITY: i32 = 32_000;

/// Scores at least this large in magnitude are forced mates.
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    /// Relative to `side_to_move`.
    pub score: i32,
    /// Deepest fully completed iteration.
    pub depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
    pub side_to_move: Color,
}

impl SearchResult {
    /// Light-positive score for display.
    #[inline]
    pub fn absolute_score(&self) -> i32 {
        absolute_score(self.score, self.side_to_move)
    }

    #[inline]
    pub fn is_mate_score(&self) -> bool {
        self.score.abs() >= MATE_THRESHOLD
    }

    /// Plies to the end of a forced mate, if the score is one.
    #[inline]
    pub fn mate_distance(&self) -> Option<u8> {
        self.is_mate_score()
            .then(|| u8::try_from(MATE_SCORE - self.score.abs()).unwrap_or(u8::MAX))
    }

    /// A mate no longer than the completed depth was found without
    /// quiescence, so no deeper iteration can shorten it. Mates found
    /// through quiescence checks can still shrink.
    #[inline]
    fn mate_within_horizon(&self) -> bool {
        self.mate_distance().is_some_and(|plies| plies <= self.depth)
    }
}

pub struct Searcher<S: BoardScorer> {
    scorer: S,
    cache: MoveOrderingCache,
    pruning: bool,
    nodes: u64,
    max_nodes: u64,
    aborted: bool,
}

impl<S: BoardScorer> Searcher<S> {
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            cache: MoveOrderingCache::new(),
            pruning: true,
            nodes: 0,
            max_nodes: u64::MAX,
            aborted: false,
        }
    }

    /// With pruning disabled every node searches the full window; the result
    /// is the same, only more nodes are visited.
    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    /// Nodes visited by the most recent search.
    #[inline]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn search(&mut self, game_state: &mut GameState, limits: &SearchLimits) -> SearchResult {
        self.search_with_policy(game_state, limits)
    }

    pub fn search_with_policy<P: DeepeningPolicy + ?Sized>(
        &mut self,
        game_state: &mut GameState,
        policy: &P,
    ) -> SearchResult {
        let started = Instant::now();
        self.nodes = 0;
        self.max_nodes = policy.node_limit();
        self.aborted = false;
        self.cache.clear();

        let root_moves = generate_legal_moves(game_state);
        let mut result = SearchResult {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            elapsed: Duration::ZERO,
            side_to_move: game_state.side_to_move,
        };

        if let Some(score) = self.terminal_score(game_state, &root_moves, 0) {
            result.score = score;
            log::info!("search root is terminal, score {score}");
            return result;
        }

        result.best_move = root_moves.first().copied();
        result.score = self.scorer.score(game_state, root_moves.len());

        let mut depth = 1u8;
        while policy.should_start_iteration(depth, started.elapsed()) {
            self.cache.start_iteration();
            let (score, best_move) = self.negamax(game_state, depth, -INFINITY, INFINITY, 0);

            if self.aborted {
                // A partial iteration is only better than nothing.
                if result.depth == 0 {
                    if let Some(mv) = best_move {
                        result.best_move = Some(mv);
                        result.score = score;
                    }
                }
                log::warn!(
                    "node ceiling {} reached during depth {depth}; keeping depth {} result",
                    self.max_nodes,
                    result.depth
                );
                break;
            }

            result.best_move = best_move.or(result.best_move);
            result.score = score;
            result.depth = depth;

            log::debug!(
                "depth {depth} score {score} nodes {} elapsed {}ms best {}",
                self.nodes,
                started.elapsed().as_millis(),
                result.best_move.map_or_else(|| "-".to_owned(), |mv| mv.to_long_algebraic()),
            );

            if result.mate_within_horizon() || depth >= MAX_PLY {
                break;
            }
            depth += 1;
        }

        result.nodes = self.nodes;
        result.elapsed = started.elapsed();
        log::info!(
            "search finished: depth {} score {} (absolute {}) nodes {} in {}ms",
            result.depth,
            result.score,
            result.absolute_score(),
            result.nodes,
            result.elapsed.as_millis()
        );
        result
    }

    /// Fail-soft negamax. Returns the best score and the move that earned it.
    fn negamax(
        &mut self,
        game_state: &mut GameState,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        ply: u8,
    ) -> (i32, Option<ChessMove>) {
        if self.aborted {
            return (0, None);
        }
        self.nodes += 1;
        if self.nodes > self.max_nodes {
            self.aborted = true;
            return (0, None);
        }

        let mut moves = generate_legal_moves(game_state);
        if let Some(score) = self.terminal_score(game_state, &moves, ply) {
            return (score, None);
        }
        if ply >= MAX_PLY {
            return (self.scorer.score(game_state, moves.len()), None);
        }
        if depth == 0 {
            return (self.quiescence(game_state, moves, alpha, beta, ply), None);
        }

        let key = game_state.zobrist_key;
        self.cache.order_moves(key, &mut moves);

        let mut best_score = -INFINITY;
        let mut best_move = None;

        for mv in moves {
            let (child_alpha, child_beta) = self.child_window(alpha, beta);
            let score = {
                let mut child = MoveGuard::new(game_state, mv);
                -self.negamax(&mut child, depth - 1, child_alpha, child_beta, ply + 1).0
            };
            if self.aborted {
                break;
            }

            self.cache.record(key, mv, score);

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_score);
            if alpha >= beta {
                break;
            }
        }

        if best_move.is_none() {
            return (0, None);
        }
        (best_score, best_move)
    }

    /// Horizon search over unquiet moves with a stand-pat lower bound, or
    /// over every move while in check.
    fn quiescence(&mut self, game_state: &mut GameState, mut moves: MoveList, mut alpha: i32, beta: i32, ply: u8) -> i32 {
        let stand_pat = self.scorer.score(game_state, moves.len());
        let in_check = is_king_in_check(game_state, game_state.side_to_move);

        let mut best_score = if in_check {
            -INFINITY
        } else {
            retain_unquiet_moves(&mut moves);
            if moves.is_empty() || stand_pat >= beta {
                return stand_pat;
            }
            alpha = alpha.max(stand_pat);
            stand_pat
        };

        order_by_mvv_lva(&mut moves);

        for mv in moves {
            let (child_alpha, child_beta) = self.child_window(alpha, beta);
            let score = {
                let mut child = MoveGuard::new(game_state, mv);
                -self.negamax(&mut child, 0, child_alpha, child_beta, ply + 1).0
            };
            if self.aborted {
                break;
            }

            best_score = best_score.max(score);
            alpha = alpha.max(best_score);
            if alpha >= beta {
                break;
            }
        }

        best_score
    }

    #[inline]
    fn child_window(&self, alpha: i32, beta: i32) -> (i32, i32) {
        if self.pruning {
            (-beta, -alpha)
        } else {
            (-INFINITY, INFINITY)
        }
    }

    /// Score of a finished game, or `None` while play continues. Draws by
    /// rule are ignored at the root so a move is still chosen there.
    fn terminal_score(&self, game_state: &GameState, moves: &[ChessMove], ply: u8) -> Option<i32> {
        match game_status(game_state, moves) {
            GameStatus::InProgress => None,
            GameStatus::Draw if ply == 0 && !moves.is_empty() => None,
            GameStatus::Draw => Some(0),
            decided => {
                let mate = MATE_SCORE - i32::from(ply);
                Some(if decided.winner() == Some(game_state.side_to_move) {
                    mate
                } else {
                    -mate
                })
            }
        }
    }
}
