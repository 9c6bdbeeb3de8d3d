pub mod compare;
pub mod graph;
pub mod solver;
pub mod ui;
pub mod utils;

pub use compare::{
    compare, CompareConfig, ComparisonResult, ExactOutcome, ExactRunner, ExactStatus,
    SubprocessRunner,
};
pub use graph::{is_proper_coloring, max_edges, Algorithm, Coloring, ColoringResult, Graph, GraphError};
pub use solver::{chromatic_number, exact_coloring, greedy_coloring, VertexOrder};
