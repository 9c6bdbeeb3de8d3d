//! Both ends of the pipe between the orchestrator and the exhaustive-search
//! subprocess: one bincode `Graph` goes in on stdin, one bincode
//! `ColoringResult` comes back on stdout.

use crate::graph::{ColoringResult, Graph, GraphError};
use crate::solver::exact_coloring;
use std::io::{self, Read, Write};
use thiserror::Error;

/// Hidden CLI subcommand that runs the worker side.
pub const WORKER_SUBCOMMAND: &str = "exact-worker";

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("worker pipe: {0}")]
    Codec(#[from] bincode::Error),

    #[error("worker pipe: {0}")]
    Io(#[from] io::Error),

    #[error("worker received a malformed graph: {0}")]
    Graph(#[from] GraphError),
}

pub fn write_graph<W: Write>(mut output: W, graph: &Graph) -> Result<(), WorkerError> {
    bincode::serialize_into(&mut output, graph)?;
    output.flush()?;
    Ok(())
}

pub fn read_graph<R: Read>(input: R) -> Result<Graph, WorkerError> {
    let graph: Graph = bincode::deserialize_from(input)?;
    graph.validate()?;
    Ok(graph)
}

pub fn write_result<W: Write>(mut output: W, result: &ColoringResult) -> Result<(), WorkerError> {
    bincode::serialize_into(&mut output, result)?;
    output.flush()?;
    Ok(())
}

pub fn read_result<R: Read>(input: R) -> Result<ColoringResult, WorkerError> {
    Ok(bincode::deserialize_from(input)?)
}

/// Reads a graph, runs the exhaustive search to completion and writes the
/// result. Has no cancellation points; the parent kills the process instead.
pub fn run_worker<R: Read, W: Write>(input: R, output: W) -> Result<(), WorkerError> {
    let graph = read_graph(input)?;
    tracing::debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "exact worker started"
    );
    let result = exact_coloring(&graph);
    write_result(output, &result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Algorithm;

    #[test]
    fn worker_round_trips_through_byte_buffers() {
        let graph = Graph::from_edges(3, [(0, 1), (1, 2), (2, 0)]).unwrap();
        let mut request = Vec::new();
        write_graph(&mut request, &graph).unwrap();

        let mut response = Vec::new();
        run_worker(request.as_slice(), &mut response).unwrap();

        let result = read_result(response.as_slice()).unwrap();
        assert_eq!(result.algorithm, Algorithm::BruteForce);
        assert_eq!(result.color_count(), 3);
    }

    #[test]
    fn truncated_input_is_an_error() {
        let err = run_worker(&[1u8, 2][..], Vec::new()).unwrap_err();
        assert!(matches!(err, WorkerError::Codec(_)));
    }
}
