use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

/// Structural errors raised while building a graph or a vertex order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("a graph needs at least one vertex")]
    EmptyGraph,

    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    InvalidVertex { vertex: usize, vertex_count: usize },

    #[error("graph declares {vertex_count} vertices but has {lists} adjacency lists")]
    VertexCountMismatch { vertex_count: usize, lists: usize },

    #[error("self-loop on vertex {vertex} is not allowed")]
    SelfLoop { vertex: usize },

    #[error("edge ({from}, {to}) already exists")]
    DuplicateEdge { from: usize, to: usize },

    #[error("adjacency is not symmetric: {from} lists {to} but not the reverse")]
    AsymmetricAdjacency { from: usize, to: usize },

    #[error(
        "cannot form {requested} edges with only {vertex_count} vertices; maximum possible edges are {max}"
    )]
    InfeasibleEdgeCount {
        requested: usize,
        vertex_count: usize,
        max: usize,
    },

    #[error("vertex order is not a permutation of 0..{vertex_count}")]
    InvalidOrder { vertex_count: usize },
}
