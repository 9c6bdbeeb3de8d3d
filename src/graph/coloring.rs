use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::time::Duration;

/// Total assignment of a color id to every vertex, indexed by vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coloring(Vec<usize>);

impl Coloring {
    pub fn new(colors: Vec<usize>) -> Self {
        Coloring(colors)
    }

    pub fn color_of(&self, vertex: usize) -> usize {
        self.0[vertex]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Number of distinct color ids in use.
    pub fn color_count(&self) -> usize {
        self.0.iter().collect::<HashSet<_>>().len()
    }

    pub fn max_color(&self) -> Option<usize> {
        self.0.iter().copied().max()
    }

    /// Vertex-keyed map with string keys, the shape the run log stores.
    pub fn to_map(&self) -> BTreeMap<String, usize> {
        self.0
            .iter()
            .enumerate()
            .map(|(vertex, &color)| (vertex.to_string(), color))
            .collect()
    }
}

/// True when the coloring covers every vertex and no edge joins two vertices
/// of the same color. Each call rescans the whole graph.
pub fn is_proper_coloring(graph: &Graph, coloring: &Coloring) -> bool {
    is_proper_assignment(graph, coloring.as_slice())
}

pub(crate) fn is_proper_assignment(graph: &Graph, colors: &[usize]) -> bool {
    if colors.len() != graph.vertex_count() {
        return false;
    }
    for (vertex, neighbors) in graph.adjacency().iter().enumerate() {
        for &adjacent in neighbors {
            if colors[vertex] == colors[adjacent] {
                return false;
            }
        }
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    Greedy,
    LargestDegreeFirst,
    BruteForce,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Greedy => "Greedy",
            Algorithm::LargestDegreeFirst => "Welsh-Powell",
            Algorithm::BruteForce => "Brute Force",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [
            Algorithm::Greedy,
            Algorithm::LargestDegreeFirst,
            Algorithm::BruteForce,
        ]
        .into_iter()
        .find(|algorithm| algorithm.name() == name)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One colorer invocation: what ran, what it produced and how long it took.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColoringResult {
    pub algorithm: Algorithm,
    pub coloring: Coloring,
    pub duration: Duration,
}

impl ColoringResult {
    pub fn color_count(&self) -> usize {
        self.coloring.color_count()
    }

    pub fn runtime_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path3() -> Graph {
        Graph::from_edges(3, [(0, 1), (1, 2)]).unwrap()
    }

    #[test]
    fn detects_conflicting_neighbors() {
        let graph = path3();
        assert!(is_proper_coloring(&graph, &Coloring::new(vec![0, 1, 0])));
        assert!(!is_proper_coloring(&graph, &Coloring::new(vec![0, 0, 1])));
    }

    #[test]
    fn partial_coloring_is_not_proper() {
        let graph = path3();
        assert!(!is_proper_coloring(&graph, &Coloring::new(vec![0, 1])));
    }

    #[test]
    fn counts_distinct_colors() {
        let coloring = Coloring::new(vec![0, 3, 0, 3]);
        assert_eq!(coloring.color_count(), 2);
        assert_eq!(coloring.max_color(), Some(3));
        assert_eq!(coloring.to_map().get("1"), Some(&3));
    }

    #[test]
    fn algorithm_names_round_trip() {
        assert_eq!(Algorithm::from_name("Welsh-Powell"), Some(Algorithm::LargestDegreeFirst));
        assert_eq!(Algorithm::from_name("DSATUR"), None);
    }
}
