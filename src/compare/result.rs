use crate::graph::{ColoringResult, Graph};
use serde::{Deserialize, Serialize};

/// How the bounded exhaustive search ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExactStatus {
    Completed,
    TimedOut,
    Failed(String),
}

/// One greedy coloring per configured vertex order and, when it finished in
/// time, the exact coloring of the same graph.
///
/// Built once per comparison and then only read. Consumers must handle
/// `exact` being `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub graph: Graph,
    pub greedy: Vec<ColoringResult>,
    pub exact: Option<ColoringResult>,
    pub exact_status: ExactStatus,
}

impl ComparisonResult {
    pub fn exact_timed_out(&self) -> bool {
        self.exact_status == ExactStatus::TimedOut
    }

    /// Every coloring present, greedy passes first.
    pub fn results(&self) -> impl Iterator<Item = &ColoringResult> {
        self.greedy.iter().chain(self.exact.iter())
    }

    /// Greedy coloring with the fewest colors; the first one on ties.
    pub fn best_greedy(&self) -> Option<&ColoringResult> {
        self.greedy
            .iter()
            .reduce(|best, next| if next.color_count() < best.color_count() { next } else { best })
    }

    /// Extra colors the best heuristic used over the exact minimum.
    pub fn color_gap(&self) -> Option<usize> {
        let exact = self.exact.as_ref()?;
        let greedy = self.best_greedy()?;
        Some(greedy.color_count().saturating_sub(exact.color_count()))
    }
}
