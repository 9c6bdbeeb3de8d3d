pub mod coloring;
pub mod error;
pub mod graph;

pub use coloring::{is_proper_coloring, Algorithm, Coloring, ColoringResult};
pub use error::{GraphError, GraphResult};
pub use graph::{max_edges, Graph};
