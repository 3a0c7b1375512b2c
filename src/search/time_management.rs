//! Search limits and the iterative-deepening termination policy.
//!
//! The search itself never looks at a clock. Before each new depth it asks a
//! `DeepeningPolicy` whether that iteration may start, so depth limits, wall
//! clock budgets and host cancellation all act at iteration boundaries only.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::game_state::chess_rules::MAX_PLY;

/// Runaway guard on visited nodes for a single search call.
pub const DEFAULT_MAX_NODES: u64 = 50_000_000;

pub const DEFAULT_MAX_DEPTH: u8 = 4;

pub trait DeepeningPolicy {
    /// Whether the iteration at `depth` may start, `elapsed` after the search
    /// began. Depth 1 is asked like any other depth.
    fn should_start_iteration(&self, depth: u8, elapsed: Duration) -> bool;

    /// Hard ceiling on nodes; reaching it abandons the running iteration.
    fn node_limit(&self) -> u64 {
        DEFAULT_MAX_NODES
    }
}

#[derive(Debug, Clone)]
pub struct SearchLimits {
    pub max_depth: u8,
    pub movetime: Option<Duration>,
    pub max_nodes: u64,
    pub stop_signal: Option<Arc<AtomicBool>>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            movetime: None,
            max_nodes: DEFAULT_MAX_NODES,
            stop_signal: None,
        }
    }
}

impl SearchLimits {
    pub fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    /// Deepen until `movetime` has elapsed at an iteration boundary.
    pub fn movetime(movetime: Duration) -> Self {
        Self {
            max_depth: MAX_PLY,
            movetime: Some(movetime),
            ..Self::default()
        }
    }

    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_stop_signal(mut self, stop_signal: Arc<AtomicBool>) -> Self {
        self.stop_signal = Some(stop_signal);
        self
    }

    #[inline]
    fn stop_requested(&self) -> bool {
        self.stop_signal
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

impl DeepeningPolicy for SearchLimits {
    /// The first iteration always runs so a move is always available; later
    /// ones stop on depth, elapsed time, or the stop signal.
    fn should_start_iteration(&self, depth: u8, elapsed: Duration) -> bool {
        if depth > self.max_depth.min(MAX_PLY) {
            return false;
        }
        if depth <= 1 {
            return true;
        }
        if self.stop_requested() {
            return false;
        }
        self.movetime.map_or(true, |budget| elapsed < budget)
    }

    fn node_limit(&self) -> u64 {
        self.max_nodes
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::{DeepeningPolicy, SearchLimits, DEFAULT_MAX_NODES};

    #[test]
    fn depth_limit_stops_after_max_depth() {
        let limits = SearchLimits::depth(3);
        assert!(limits.should_start_iteration(3, Duration::ZERO));
        assert!(!limits.should_start_iteration(4, Duration::ZERO));
        assert_eq!(limits.node_limit(), DEFAULT_MAX_NODES);
    }

    #[test]
    fn depth_zero_runs_no_iterations() {
        assert!(!SearchLimits::depth(0).should_start_iteration(1, Duration::ZERO));
    }

    #[test]
    fn movetime_is_checked_between_iterations() {
        let limits = SearchLimits::movetime(Duration::from_millis(50));
        assert!(limits.should_start_iteration(1, Duration::from_secs(5)));
        assert!(limits.should_start_iteration(6, Duration::from_millis(10)));
        assert!(!limits.should_start_iteration(6, Duration::from_millis(50)));
    }

    #[test]
    fn stop_signal_lets_only_the_first_iteration_run() {
        let flag = Arc::new(AtomicBool::new(false));
        let limits = SearchLimits::depth(10).with_stop_signal(Arc::clone(&flag));
        assert!(limits.should_start_iteration(2, Duration::ZERO));
        flag.store(true, Ordering::Relaxed);
        assert!(limits.should_start_iteration(1, Duration::ZERO));
        assert!(!limits.should_start_iteration(2, Duration::ZERO));
    }
}
