use crate::compare::{ComparisonResult, ExactStatus};
use crate::graph::{Algorithm, Coloring, ColoringResult, Graph, GraphError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunLogError {
    #[error("run log {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("run log {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored graph is invalid: {0}")]
    Graph(#[from] GraphError),

    #[error("stored coloring has no color for vertex {vertex}")]
    MissingVertex { vertex: usize },

    #[error("stored runtime {runtime} is not a valid duration in seconds")]
    InvalidRuntime { runtime: f64 },

    #[error("unknown algorithm name '{name}'")]
    UnknownAlgorithm { name: String },
}

/// One coloring as stored on disk: vertex ids are string keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedColoring {
    pub name: String,
    pub colors: BTreeMap<String, usize>,
    pub runtime: f64,
}

impl RecordedColoring {
    fn from_result(result: &ColoringResult) -> Self {
        RecordedColoring {
            name: result.algorithm.name().to_string(),
            colors: result.coloring.to_map(),
            runtime: result.runtime_secs(),
        }
    }

    fn to_result(&self, vertices: usize) -> Result<ColoringResult, RunLogError> {
        let algorithm =
            Algorithm::from_name(&self.name).ok_or_else(|| RunLogError::UnknownAlgorithm {
                name: self.name.clone(),
            })?;
        let duration = Duration::try_from_secs_f64(self.runtime)
            .map_err(|_| RunLogError::InvalidRuntime { runtime: self.runtime })?;
        let colors = (0..vertices)
            .map(|vertex| {
                self.colors
                    .get(&vertex.to_string())
                    .copied()
                    .ok_or(RunLogError::MissingVertex { vertex })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ColoringResult {
            algorithm,
            coloring: Coloring::new(colors),
            duration,
        })
    }
}

/// One comparison run in the append-only JSON log: every greedy pass by name
/// and `brute_force`, which is `null` when the exhaustive search did not finish.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub edge_list: Vec<Vec<usize>>,
    pub greedy: Vec<RecordedColoring>,
    pub brute_force: Option<RecordedColoring>,
    #[serde(default)]
    pub timed_out: bool,
}

impl RunRecord {
    pub fn from_comparison(result: &ComparisonResult) -> Self {
        RunRecord {
            edge_list: result.graph.adjacency().to_vec(),
            greedy: result.greedy.iter().map(RecordedColoring::from_result).collect(),
            brute_force: result.exact.as_ref().map(RecordedColoring::from_result),
            timed_out: result.exact_timed_out(),
        }
    }

    pub fn to_comparison(&self) -> Result<ComparisonResult, RunLogError> {
        let graph = Graph::from_adjacency(self.edge_list.clone())?;
        let n = graph.vertex_count();
        let greedy = self
            .greedy
            .iter()
            .map(|recorded| recorded.to_result(n))
            .collect::<Result<Vec<_>, _>>()?;
        let exact = self
            .brute_force
            .as_ref()
            .map(|recorded| recorded.to_result(n))
            .transpose()?;
        let exact_status = match (&exact, self.timed_out) {
            (Some(_), _) => ExactStatus::Completed,
            (None, true) => ExactStatus::TimedOut,
            (None, false) => ExactStatus::Failed("not recorded".to_string()),
        };
        Ok(ComparisonResult {
            graph,
            greedy,
            exact,
            exact_status,
        })
    }
}

pub fn load_runs<P: AsRef<Path>>(path: P) -> Result<Vec<RunRecord>, RunLogError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| RunLogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| RunLogError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Appends `record` to the JSON array at `path`, creating the file if needed.
pub fn append_run<P: AsRef<Path>>(path: P, record: &RunRecord) -> Result<usize, RunLogError> {
    let path = path.as_ref();
    let mut runs = match load_runs(path) {
        Ok(runs) => runs,
        Err(RunLogError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            Vec::new()
        }
        Err(err) => return Err(err),
    };
    runs.push(record.clone());

    let text = serde_json::to_string_pretty(&runs).map_err(|source| RunLogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| RunLogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(runs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{exact_coloring, greedy_coloring, VertexOrder};

    fn sample(with_exact: bool) -> ComparisonResult {
        let graph = Graph::from_edges(3, [(0, 1), (1, 2)]).unwrap();
        let greedy = vec![
            greedy_coloring(&graph, &VertexOrder::Natural).unwrap(),
            greedy_coloring(&graph, &VertexOrder::LargestDegreeFirst).unwrap(),
        ];
        let exact = with_exact.then(|| exact_coloring(&graph));
        let exact_status = if with_exact {
            ExactStatus::Completed
        } else {
            ExactStatus::TimedOut
        };
        ComparisonResult {
            graph,
            greedy,
            exact,
            exact_status,
        }
    }

    #[test]
    fn appends_to_missing_then_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph_data.json");

        assert_eq!(append_run(&path, &RunRecord::from_comparison(&sample(true))).unwrap(), 1);
        assert_eq!(append_run(&path, &RunRecord::from_comparison(&sample(false))).unwrap(), 2);

        let runs = load_runs(&path).unwrap();
        assert_eq!(runs.len(), 2);
        assert!(runs[0].brute_force.is_some());
        assert!(runs[1].brute_force.is_none());
        assert!(runs[1].timed_out);
    }

    #[test]
    fn stored_run_restores_the_comparison() {
        let original = sample(true);
        let restored = RunRecord::from_comparison(&original).to_comparison().unwrap();
        assert_eq!(restored.graph, original.graph);
        let passes = |result: &ComparisonResult| {
            result
                .greedy
                .iter()
                .map(|r| (r.algorithm, r.coloring.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(passes(&restored), passes(&original));
        assert_eq!(
            restored.exact.map(|r| r.coloring),
            original.exact.map(|r| r.coloring)
        );
    }

    #[test]
    fn timed_out_run_is_stored_as_null() {
        let record = RunRecord::from_comparison(&sample(false));
        let json = serde_json::to_value(&record).unwrap();
        assert!(json["brute_force"].is_null());
        assert_eq!(json["greedy"][0]["name"], "Greedy");
        assert_eq!(json["greedy"][0]["colors"]["1"], 1);
        assert_eq!(json["greedy"][1]["name"], "Welsh-Powell");
    }

    #[test]
    fn negative_or_unknown_entries_are_reported() {
        let mut record = RunRecord::from_comparison(&sample(true));
        record.greedy[1].runtime = -0.5;
        assert!(matches!(
            record.to_comparison(),
            Err(RunLogError::InvalidRuntime { runtime }) if runtime == -0.5
        ));

        let mut record = RunRecord::from_comparison(&sample(true));
        record.greedy[0].name = "Random".to_string();
        assert!(matches!(
            record.to_comparison(),
            Err(RunLogError::UnknownAlgorithm { .. })
        ));
    }

    #[test]
    fn corrupt_log_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph_data.json");
        fs::write(&path, "not json").unwrap();
        let record = RunRecord::from_comparison(&sample(true));
        assert!(matches!(
            append_run(&path, &record),
            Err(RunLogError::Json { .. })
        ));
    }
}
