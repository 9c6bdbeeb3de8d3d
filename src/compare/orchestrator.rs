use crate::compare::config::CompareConfig;
use crate::compare::result::{ComparisonResult, ExactStatus};
use crate::compare::worker::{self, WorkerError, WORKER_SUBCOMMAND};
use crate::graph::{is_proper_coloring, ColoringResult, Graph, GraphResult};
use crate::solver::greedy_coloring;
use crossbeam::channel::{self, RecvTimeoutError};
use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum IsolationError {
    #[error("failed to spawn exact-search process {program}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("exact-search process pipe was not captured")]
    MissingPipe,

    #[error(transparent)]
    Worker(#[from] WorkerError),

    #[error("failed to terminate exact-search process {pid}: {source}")]
    Termination {
        pid: u32,
        #[source]
        source: io::Error,
    },

    #[error("exact-search process exited without producing a result")]
    NoResult,
}

/// What came back from the bounded exhaustive search.
#[derive(Debug)]
pub enum ExactOutcome {
    Completed(ColoringResult),
    /// `reaped` is false when the killed process could not be waited on.
    TimedOut { pid: u32, reaped: bool },
    Failed(IsolationError),
}

/// Runs the exhaustive search somewhere it can be killed, giving up after
/// `timeout`.
pub trait ExactRunner {
    fn run(&self, graph: &Graph, timeout: Duration) -> ExactOutcome;
}

/// Runs the exhaustive search in a child process executing the worker
/// subcommand, killing and reaping it once the timeout passes.
#[derive(Debug, Clone)]
pub struct SubprocessRunner {
    program: PathBuf,
    args: Vec<String>,
}

impl SubprocessRunner {
    pub fn new<P: Into<PathBuf>>(program: P) -> Self {
        SubprocessRunner {
            program: program.into(),
            args: vec![WORKER_SUBCOMMAND.to_string()],
        }
    }

    /// Re-invokes the running executable as the worker.
    pub fn current_exe() -> io::Result<Self> {
        Ok(Self::new(std::env::current_exe()?))
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    fn spawn(&self) -> Result<Child, IsolationError> {
        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| IsolationError::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

impl ExactRunner for SubprocessRunner {
    fn run(&self, graph: &Graph, timeout: Duration) -> ExactOutcome {
        let started = Instant::now();
        let mut child = match self.spawn() {
            Ok(child) => child,
            Err(err) => return ExactOutcome::Failed(err),
        };

        let (stdin, stdout) = match (child.stdin.take(), child.stdout.take()) {
            (Some(stdin), Some(stdout)) => (stdin, stdout),
            _ => {
                terminate(&mut child);
                return ExactOutcome::Failed(IsolationError::MissingPipe);
            }
        };

        let pid = child.id();
        debug!(pid, program = %self.program.display(), "exact-search process spawned");

        // the write can block on a full pipe, so it runs under the same
        // timeout as the read; dropping stdin afterwards signals EOF
        let owned = graph.clone();
        let writer = thread::spawn(move || worker::write_graph(stdin, &owned));

        let (tx, rx) = channel::bounded(1);
        let reader = thread::spawn(move || {
            let _ = tx.send(worker::read_result(stdout));
        });

        let remaining = timeout.saturating_sub(started.elapsed());
        match rx.recv_timeout(remaining) {
            Ok(Ok(result)) => {
                let _ = child.wait();
                let _ = writer.join();
                let _ = reader.join();
                ExactOutcome::Completed(result)
            }
            Ok(Err(err)) => {
                if terminate(&mut child) {
                    let _ = writer.join();
                }
                let _ = reader.join();
                ExactOutcome::Failed(err.into())
            }
            Err(RecvTimeoutError::Timeout) => {
                // both pipe threads only unblock once the child is gone, so
                // they are joined only after a successful kill
                let reaped = terminate(&mut child);
                if reaped {
                    let _ = writer.join();
                    let _ = reader.join();
                }
                debug!(pid, reaped, "exact-search process stopped after timeout");
                ExactOutcome::TimedOut { pid, reaped }
            }
            Err(RecvTimeoutError::Disconnected) => {
                if terminate(&mut child) {
                    let _ = writer.join();
                }
                ExactOutcome::Failed(IsolationError::NoResult)
            }
        }
    }
}

/// Kills and reaps the child. A failure is reported but never aborts the
/// comparison.
fn terminate(child: &mut Child) -> bool {
    let pid = child.id();
    let killed = match child.try_wait() {
        Ok(Some(_)) => return true,
        _ => child.kill(),
    };
    match killed.and_then(|_| child.wait().map(|_| ())) {
        Ok(()) => true,
        Err(source) => {
            let err = IsolationError::Termination { pid, source };
            warn!(error = %err, "exact-search process may still be running");
            false
        }
    }
}

/// Bounded exhaustive search followed by one unconditional greedy pass per
/// configured vertex order, all over the same graph.
pub fn compare<R>(graph: &Graph, config: &CompareConfig, runner: &R) -> GraphResult<ComparisonResult>
where
    R: ExactRunner + ?Sized,
{
    let timeout = config.timeout();
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        timeout_secs = config.timeout_secs,
        "beginning brute force algorithm"
    );

    let (exact, exact_status) = match runner.run(graph, timeout) {
        ExactOutcome::Completed(result) if is_valid_exact(graph, &result) => {
            info!(
                runtime = result.runtime_secs(),
                colors = result.color_count(),
                "finished brute force algorithm"
            );
            (Some(result), ExactStatus::Completed)
        }
        ExactOutcome::Completed(_) => {
            warn!("exact-search process returned an improper coloring, discarding it");
            (
                None,
                ExactStatus::Failed("improper coloring returned".to_string()),
            )
        }
        ExactOutcome::TimedOut { pid, reaped } => {
            warn!(
                timeout_secs = config.timeout_secs,
                pid,
                reaped,
                "brute force runtime exceeds the limit, proceeding with only the greedy algorithm"
            );
            (None, ExactStatus::TimedOut)
        }
        ExactOutcome::Failed(err) => {
            warn!(error = %err, "brute force search failed, proceeding with only the greedy algorithm");
            (None, ExactStatus::Failed(err.to_string()))
        }
    };

    let mut greedy = Vec::with_capacity(config.orders.len());
    for order in &config.orders {
        info!(?order, "beginning greedy algorithm");
        let result = greedy_coloring(graph, order)?;
        info!(
            algorithm = %result.algorithm,
            runtime = result.runtime_secs(),
            colors = result.color_count(),
            "finished greedy algorithm"
        );
        greedy.push(result);
    }

    Ok(ComparisonResult {
        graph: graph.clone(),
        greedy,
        exact,
        exact_status,
    })
}

fn is_valid_exact(graph: &Graph, result: &ColoringResult) -> bool {
    is_proper_coloring(graph, &result.coloring)
}
