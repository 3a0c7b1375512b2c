use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::game_state::GameState;
use crate::search::board_scoring::{BoardScorer, MaterialMobilityScorer, MaterialScorer};
use crate::search::iterative_deepening::Searcher;
use crate::search::time_management::SearchLimits;

pub struct IterativeEngine {
    searcher: Searcher<Box<dyn BoardScorer>>,
    name: String,
}

impl IterativeEngine {
    pub fn new(scorer: Box<dyn BoardScorer>, name: impl Into<String>) -> Self {
        Self {
            searcher: Searcher::new(scorer),
            name: name.into(),
        }
    }

    pub fn material() -> Self {
        Self::new(Box::new(MaterialScorer), "ply_chess material")
    }

    pub fn material_mobility(per_move: i32) -> Self {
        Self::new(Box::new(MaterialMobilityScorer { per_move }), "ply_chess material+mobility")
    }
}

impl Default for IterativeEngine {
    fn default() -> Self {
        Self::material_mobility(MaterialMobilityScorer::default().per_move)
    }
}

impl Engine for IterativeEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn nodes(&self) -> u64 {
        self.searcher.nodes()
    }

    fn choose_move(&mut self, game_state: &mut GameState, limits: &SearchLimits) -> EngineOutput {
        let result = self.searcher.search(game_state, limits);

        let mut info_lines = vec![format!(
            "info depth {} score cp {} nodes {} time {}",
            result.depth,
            result.score,
            result.nodes,
            result.elapsed.as_millis()
        )];
        if result.is_mate_score() {
            info_lines.push(format!("info string forced mate, absolute score {}", result.absolute_score()));
        }
        info_lines.push(match result.best_move {
            Some(mv) => format!("bestmove {mv}"),
            None => "bestmove (none)".to_owned(),
        });

        EngineOutput { result, info_lines }
    }
}

#[cfg(test)]
mod tests {
    use super::IterativeEngine;
    use crate::engines::engine_trait::Engine;
    use crate::game_state::game_state::GameState;
    use crate::search::time_management::SearchLimits;

    #[test]
    fn engine_reports_best_move_and_node_count() {
        let mut engine = IterativeEngine::material();
        let mut game = GameState::from_fen("4k3/8/8/8/8/8/4q3/4KQ2 w - - 0 1").expect("FEN should parse");

        let output = engine.choose_move(&mut game, &SearchLimits::depth(2));
        assert!(output.result.best_move.is_some());
        assert_eq!(engine.nodes(), output.result.nodes);
        assert!(output.info_lines[0].starts_with("info depth 2 "));
        assert!(output.info_lines.last().is_some_and(|line| line.starts_with("bestmove ")));
    }

    #[test]
    fn engine_without_moves_says_so() {
        let mut engine = IterativeEngine::default();
        let mut game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("FEN should parse");

        let output = engine.choose_move(&mut game, &SearchLimits::depth(2));
        assert_eq!(output.result.best_move, None);
        assert_eq!(output.info_lines.last().map(String::as_str), Some("bestmove (none)"));
    }
}
