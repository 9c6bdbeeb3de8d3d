use crate::graph::{Algorithm, Coloring, ColoringResult, Graph, GraphError, GraphResult};
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::time::Instant;

/// Order in which the greedy pass visits vertices.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VertexOrder {
    #[default]
    Natural,
    /// Descending degree, ties broken by ascending vertex index.
    LargestDegreeFirst,
    Custom(Vec<usize>),
}

impl VertexOrder {
    pub fn resolve(&self, graph: &Graph) -> GraphResult<Vec<usize>> {
        let n = graph.vertex_count();
        match self {
            VertexOrder::Natural => Ok((0..n).collect()),
            VertexOrder::LargestDegreeFirst => {
                let mut order: Vec<usize> = (0..n).collect();
                order.sort_by_key(|&vertex| (Reverse(graph.degree(vertex)), vertex));
                Ok(order)
            }
            VertexOrder::Custom(order) => {
                let mut seen = bitvec![0; n];
                if order.len() != n {
                    return Err(GraphError::InvalidOrder { vertex_count: n });
                }
                for &vertex in order {
                    if vertex >= n || seen[vertex] {
                        return Err(GraphError::InvalidOrder { vertex_count: n });
                    }
                    seen.set(vertex, true);
                }
                Ok(order.clone())
            }
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self {
            VertexOrder::LargestDegreeFirst => Algorithm::LargestDegreeFirst,
            VertexOrder::Natural | VertexOrder::Custom(_) => Algorithm::Greedy,
        }
    }
}

impl std::str::FromStr for VertexOrder {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "natural" | "index" => Ok(VertexOrder::Natural),
            "largest-degree-first" | "welsh-powell" | "degree" => {
                Ok(VertexOrder::LargestDegreeFirst)
            }
            other => Err(format!("unknown vertex order '{other}'")),
        }
    }
}

/// Single forward greedy pass: each visited vertex takes the smallest color
/// not used by its already colored neighbours.
pub fn greedy_coloring(graph: &Graph, order: &VertexOrder) -> GraphResult<ColoringResult> {
    let start = Instant::now();
    let visit = order.resolve(graph)?;
    let n = graph.vertex_count();

    let mut colors: Vec<Option<usize>> = vec![None; n];
    // a vertex never needs more than n colors
    let mut unavailable = bitvec![0; n];
    let mut max_color = 0;

    colors[visit[0]] = Some(0);
    for &vertex in &visit[1..] {
        for &adjacent in graph.neighbors(vertex) {
            if let Some(color) = colors[adjacent] {
                unavailable.set(color, true);
            }
        }

        let lowest = unavailable.first_zero().unwrap_or(n);
        colors[vertex] = Some(lowest);
        max_color = max_color.max(lowest);

        // reset only what this vertex set, keeping the pass O(V + E)
        for &adjacent in graph.neighbors(vertex) {
            if let Some(color) = colors[adjacent] {
                unavailable.set(color, false);
            }
        }
    }

    let colors = colors.into_iter().map(|c| c.unwrap_or(0)).collect();
    let duration = start.elapsed();
    tracing::debug!(
        algorithm = %order.algorithm(),
        colors = max_color + 1,
        ?duration,
        "greedy pass finished"
    );

    Ok(ColoringResult {
        algorithm: order.algorithm(),
        coloring: Coloring::new(colors),
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::is_proper_coloring;

    fn complete(n: usize) -> Graph {
        let edges = (0..n).flat_map(|a| ((a + 1)..n).map(move |b| (a, b)));
        Graph::from_edges(n, edges).unwrap()
    }

    #[test]
    fn single_vertex_uses_one_color() {
        let graph = Graph::new(1).unwrap();
        let result = greedy_coloring(&graph, &VertexOrder::Natural).unwrap();
        assert_eq!(result.coloring.as_slice(), &[0]);
        assert_eq!(result.color_count(), 1);
    }

    #[test]
    fn complete_graph_needs_every_color() {
        let graph = complete(4);
        let result = greedy_coloring(&graph, &VertexOrder::Natural).unwrap();
        assert_eq!(result.coloring.as_slice(), &[0, 1, 2, 3]);
        assert!(is_proper_coloring(&graph, &result.coloring));
    }

    #[test]
    fn unvisited_neighbours_do_not_block_colors() {
        // star centred on 3, visited last
        let graph = Graph::from_edges(4, [(3, 0), (3, 1), (3, 2)]).unwrap();
        let result = greedy_coloring(&graph, &VertexOrder::Natural).unwrap();
        assert_eq!(result.coloring.as_slice(), &[0, 0, 0, 1]);
    }

    #[test]
    fn blocked_colors_do_not_leak_into_later_vertices() {
        // vertex 2 sees colors 0 and 1; 3 and 4 each see a single colored neighbour
        let graph = Graph::from_edges(5, [(0, 1), (1, 2), (2, 0), (3, 0), (4, 1)]).unwrap();
        let result = greedy_coloring(&graph, &VertexOrder::Natural).unwrap();
        assert_eq!(result.coloring.as_slice(), &[0, 1, 2, 1, 0]);
        assert!(is_proper_coloring(&graph, &result.coloring));
    }

    #[test]
    fn natural_order_can_be_suboptimal() {
        // path 0-3-2-1 is bipartite, but index order forces a third color
        let graph = Graph::from_edges(4, [(0, 3), (1, 2), (2, 3)]).unwrap();
        let result = greedy_coloring(&graph, &VertexOrder::Natural).unwrap();
        assert_eq!(result.coloring.as_slice(), &[0, 0, 1, 2]);
        assert!(is_proper_coloring(&graph, &result.coloring));
    }

    #[test]
    fn largest_degree_first_breaks_ties_by_index() {
        let graph = Graph::from_edges(5, [(4, 0), (4, 1), (2, 3), (2, 1)]).unwrap();
        let order = VertexOrder::LargestDegreeFirst.resolve(&graph).unwrap();
        assert_eq!(order, vec![1, 2, 4, 0, 3]);

        let result = greedy_coloring(&graph, &VertexOrder::LargestDegreeFirst).unwrap();
        assert_eq!(result.algorithm, Algorithm::LargestDegreeFirst);
        assert!(is_proper_coloring(&graph, &result.coloring));
    }

    #[test]
    fn custom_order_must_be_a_permutation() {
        let graph = complete(3);
        for bad in [vec![0, 1], vec![0, 1, 1], vec![0, 1, 3]] {
            assert_eq!(
                greedy_coloring(&graph, &VertexOrder::Custom(bad)).unwrap_err(),
                GraphError::InvalidOrder { vertex_count: 3 }
            );
        }
        let result = greedy_coloring(&graph, &VertexOrder::Custom(vec![2, 0, 1])).unwrap();
        assert_eq!(result.coloring.as_slice(), &[1, 2, 0]);
    }

    #[test]
    fn repeated_runs_are_identical() {
        let graph = Graph::from_edges(6, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0), (0, 3)])
            .unwrap();
        let first = greedy_coloring(&graph, &VertexOrder::LargestDegreeFirst).unwrap();
        let second = greedy_coloring(&graph, &VertexOrder::LargestDegreeFirst).unwrap();
        assert_eq!(first.coloring, second.coloring);
    }

    #[test]
    fn parses_order_names() {
        assert_eq!("natural".parse::<VertexOrder>(), Ok(VertexOrder::Natural));
        assert_eq!(
            "Welsh-Powell".parse::<VertexOrder>(),
            Ok(VertexOrder::LargestDegreeFirst)
        );
        assert!("random".parse::<VertexOrder>().is_err());
    }
}
