use crate::graph::coloring::is_proper_assignment;
use crate::graph::{Algorithm, Coloring, ColoringResult, Graph};
use std::time::Instant;

/// Every assignment of `k` colors to `n` vertices, k^n in total, in Cartesian
/// product order: the last vertex varies fastest.
///
/// Candidates are produced one at a time; nothing is materialised up front.
#[derive(Debug, Clone)]
pub struct CandidateColorings {
    current: Vec<usize>,
    colors: usize,
    exhausted: bool,
}

impl CandidateColorings {
    pub fn new(vertex_count: usize, colors: usize) -> Self {
        CandidateColorings {
            current: vec![0; vertex_count],
            colors,
            exhausted: colors == 0 && vertex_count > 0,
        }
    }

    /// Advances `current` to the next candidate, returning false past the end.
    fn advance(&mut self) -> bool {
        for slot in self.current.iter_mut().rev() {
            *slot += 1;
            if *slot < self.colors {
                return true;
            }
            *slot = 0;
        }
        false
    }
}

impl Iterator for CandidateColorings {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let candidate = self.current.clone();
        self.exhausted = !self.advance();
        Some(candidate)
    }
}

/// First candidate, in enumeration order, that properly colors `graph` with
/// at most `colors` colors.
pub fn first_proper_candidate(graph: &Graph, colors: usize) -> Option<Coloring> {
    let mut candidates = CandidateColorings::new(graph.vertex_count(), colors);
    loop {
        if candidates.exhausted {
            return None;
        }
        if is_proper_assignment(graph, &candidates.current) {
            return Some(Coloring::new(candidates.current.clone()));
        }
        candidates.exhausted = !candidates.advance();
    }
}

/// Exhaustive minimum coloring. Budgets k = 1, 2, … are tried in order and
/// the candidate space is regenerated for each one, so the first success uses
/// exactly the chromatic number of colors.
///
/// Among several minimum colorings the one returned is simply the first in
/// enumeration order. Running time is Θ(k^V) per budget level.
pub fn exact_coloring(graph: &Graph) -> ColoringResult {
    let start = Instant::now();
    let mut colors = 1;
    loop {
        tracing::trace!(colors, "enumerating candidate colorings");
        if let Some(coloring) = first_proper_candidate(graph, colors) {
            return ColoringResult {
                algorithm: Algorithm::BruteForce,
                coloring,
                duration: start.elapsed(),
            };
        }
        // k = n always succeeds, so this cannot run past the vertex count
        colors += 1;
    }
}

pub fn chromatic_number(graph: &Graph) -> usize {
    exact_coloring(graph).color_count()
}
