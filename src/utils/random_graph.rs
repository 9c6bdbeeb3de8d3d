use crate::graph::{max_edges, Graph, GraphError, GraphResult};
use rand::{rng, Rng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceParameters {
    pub vertices: usize,
    pub edges: usize,
}

impl InstanceParameters {
    pub fn new(vertices: usize, edges: usize) -> GraphResult<Self> {
        if vertices == 0 {
            return Err(GraphError::EmptyGraph);
        }
        let max = max_edges(vertices);
        if edges > max {
            return Err(GraphError::InfeasibleEdgeCount {
                requested: edges,
                vertex_count: vertices,
                max,
            });
        }
        Ok(InstanceParameters { vertices, edges })
    }
}

/// Random simple graph with exactly `edges` edges, found by rejection
/// sampling vertex pairs until enough distinct non-loop pairs are drawn.
///
/// There is no bound on the number of draws, so edge counts close to the
/// maximum can take a while on larger graphs.
pub fn generate_random_graph<R: Rng + ?Sized>(
    vertices: usize,
    edges: usize,
    rng: &mut R,
) -> GraphResult<Graph> {
    let params = InstanceParameters::new(vertices, edges)?;
    let mut graph = Graph::new(params.vertices)?;
    let mut placed = 0;

    while placed < params.edges {
        let from = rng.random_range(0..params.vertices);
        let to = rng.random_range(0..params.vertices);
        if from != to && !graph.has_edge(from, to) {
            graph.add_edge(from, to)?;
            placed += 1;
        }
    }

    Ok(graph)
}

pub fn random_graph(vertices: usize, edges: usize) -> GraphResult<Graph> {
    generate_random_graph(vertices, edges, &mut rng())
}

/// The complete graph on `vertices` vertices.
pub fn complete_graph(vertices: usize) -> GraphResult<Graph> {
    let pairs = (0..vertices).flat_map(|a| ((a + 1)..vertices).map(move |b| (a, b)));
    Graph::from_edges(vertices, pairs)
}
