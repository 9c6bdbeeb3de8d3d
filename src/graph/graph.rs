use crate::graph::error::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};

/// Simple undirected graph over the dense vertex range `0..n`.
///
/// Every edge is stored in both endpoint lists; lists never contain the
/// owning vertex or a repeated neighbour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGraph")]
pub struct Graph {
    n: usize,
    adjacency: Vec<Vec<usize>>,
}

/// Wire shape of a `Graph`; only becomes one after `validate` passes.
#[derive(Deserialize)]
struct RawGraph {
    n: usize,
    adjacency: Vec<Vec<usize>>,
}

impl TryFrom<RawGraph> for Graph {
    type Error = GraphError;

    fn try_from(raw: RawGraph) -> GraphResult<Self> {
        let graph = Graph {
            n: raw.n,
            adjacency: raw.adjacency,
        };
        graph.validate()?;
        Ok(graph)
    }
}

impl Graph {
    pub fn new(n: usize) -> GraphResult<Self> {
        if n == 0 {
            return Err(GraphError::EmptyGraph);
        }
        Ok(Graph {
            n,
            adjacency: vec![Vec::new(); n],
        })
    }

    pub fn from_edges<I>(n: usize, edges: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Graph::new(n)?;
        for (from, to) in edges {
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }

    /// Builds a graph from literal adjacency lists, checking every structural
    /// invariant before accepting them.
    pub fn from_adjacency(adjacency: Vec<Vec<usize>>) -> GraphResult<Self> {
        let n = adjacency.len();
        let graph = Graph { n, adjacency };
        graph.validate()?;
        Ok(graph)
    }

    pub fn add_edge(&mut self, from: usize, to: usize) -> GraphResult<()> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if from == to {
            return Err(GraphError::SelfLoop { vertex: from });
        }
        if self.has_edge(from, to) {
            return Err(GraphError::DuplicateEdge { from, to });
        }
        self.adjacency[from].push(to);
        self.adjacency[to].push(from);
        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        self.n
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.adjacency[vertex].len()
    }

    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.adjacency[vertex]
    }

    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        from < self.n && to < self.n && self.adjacency[from].contains(&to)
    }

    /// Each undirected edge once, as `(low, high)`, in adjacency order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (from, neighbors) in self.adjacency.iter().enumerate() {
            for &to in neighbors {
                if from < to {
                    edges.push((from, to));
                }
            }
        }
        edges
    }

    pub fn validate(&self) -> GraphResult<()> {
        if self.n == 0 {
            return Err(GraphError::EmptyGraph);
        }
        if self.adjacency.len() != self.n {
            return Err(GraphError::VertexCountMismatch {
                vertex_count: self.n,
                lists: self.adjacency.len(),
            });
        }
        for (from, neighbors) in self.adjacency.iter().enumerate() {
            for (idx, &to) in neighbors.iter().enumerate() {
                self.check_vertex(to)?;
                if to == from {
                    return Err(GraphError::SelfLoop { vertex: from });
                }
                if neighbors[..idx].contains(&to) {
                    return Err(GraphError::DuplicateEdge { from, to });
                }
                if !self.adjacency[to].contains(&from) {
                    return Err(GraphError::AsymmetricAdjacency { from, to });
                }
            }
        }
        Ok(())
    }

    fn check_vertex(&self, vertex: usize) -> GraphResult<()> {
        if vertex >= self.n {
            return Err(GraphError::InvalidVertex {
                vertex,
                vertex_count: self.n,
            });
        }
        Ok(())
    }
}

/// Largest number of edges a simple graph on `n` vertices can hold.
pub fn max_edges(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_edge_is_symmetric() {
        let mut graph = Graph::new(3).unwrap();
        graph.add_edge(0, 2).unwrap();
        assert_eq!(graph.neighbors(0), &[2]);
        assert_eq!(graph.neighbors(2), &[0]);
        assert_eq!(graph.degree(1), 0);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn out_of_range_vertex_is_rejected() {
        let mut graph = Graph::new(2).unwrap();
        assert_eq!(
            graph.add_edge(0, 2),
            Err(GraphError::InvalidVertex {
                vertex: 2,
                vertex_count: 2
            })
        );
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn loops_and_parallel_edges_are_rejected() {
        let mut graph = Graph::new(3).unwrap();
        assert_eq!(graph.add_edge(1, 1), Err(GraphError::SelfLoop { vertex: 1 }));
        graph.add_edge(0, 1).unwrap();
        assert_eq!(
            graph.add_edge(1, 0),
            Err(GraphError::DuplicateEdge { from: 1, to: 0 })
        );
    }

    #[test]
    fn from_adjacency_checks_symmetry() {
        let err = Graph::from_adjacency(vec![vec![1], vec![]]).unwrap_err();
        assert_eq!(err, GraphError::AsymmetricAdjacency { from: 0, to: 1 });

        let graph = Graph::from_adjacency(vec![vec![1, 2], vec![0], vec![0]]).unwrap();
        assert_eq!(graph.edges(), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn empty_graph_is_rejected() {
        assert_eq!(Graph::new(0), Err(GraphError::EmptyGraph));
        assert_eq!(Graph::from_adjacency(Vec::new()), Err(GraphError::EmptyGraph));
    }

    #[test]
    fn deserialization_rejects_mismatched_vertex_count() {
        let err = serde_json::from_str::<Graph>(r#"{"n":3,"adjacency":[[1],[0]]}"#).unwrap_err();
        assert!(err.to_string().contains("3 vertices"), "{err}");

        let mismatched = Graph {
            n: 3,
            adjacency: vec![vec![1], vec![0]],
        };
        assert_eq!(
            mismatched.validate(),
            Err(GraphError::VertexCountMismatch {
                vertex_count: 3,
                lists: 2
            })
        );
        let bytes = bincode::serialize(&mismatched).unwrap();
        assert!(bincode::deserialize::<Graph>(&bytes).is_err());
    }

    #[test]
    fn deserialization_accepts_valid_graph() {
        let graph: Graph = serde_json::from_str(r#"{"n":3,"adjacency":[[1],[0],[]]}"#).unwrap();
        assert_eq!(graph.edges(), vec![(0, 1)]);
    }

    #[test]
    fn max_edges_matches_complete_graph() {
        assert_eq!(max_edges(1), 0);
        assert_eq!(max_edges(3), 3);
        assert_eq!(max_edges(4), 6);
    }
}
