use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use greedy_vs_bruteforce::compare::worker::run_worker;
use greedy_vs_bruteforce::compare::{compare, CompareConfig, ComparisonResult, SubprocessRunner};
use greedy_vs_bruteforce::solver::VertexOrder;
use greedy_vs_bruteforce::ui::Visualizer;
use greedy_vs_bruteforce::utils::random_graph::generate_random_graph;
use greedy_vs_bruteforce::utils::serialization::{append_run, load_runs, RunRecord};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(author, version, about = "Greedy vs. brute-force graph coloring", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Color a random graph both ways and append the run to the log
    Compare {
        #[arg(long, default_value_t = 8)]
        vertices: usize,
        #[arg(long, default_value_t = 12)]
        edges: usize,
        /// Seed for the random graph (fresh entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Brute force time limit in seconds (overrides the config file)
        #[arg(long)]
        timeout: Option<u64>,
        /// Greedy vertex orders, comma separated: natural, largest-degree-first
        #[arg(long, value_delimiter = ',')]
        order: Option<Vec<VertexOrder>>,
        /// TOML file with timeout_secs, orders and log_path
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        log: Option<PathBuf>,
        /// Do not append the run to the log
        #[arg(long)]
        no_log: bool,
        /// Draw both colorings in the terminal
        #[arg(long)]
        visualize: bool,
    },
    /// Show every run stored in the log
    History {
        /// TOML file whose log_path is read when --log is not given
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        log: Option<PathBuf>,
        /// Print a summary line per run instead of drawing
        #[arg(long)]
        text: bool,
    },
    /// Internal: exhaustive search over a graph read from stdin
    #[command(hide = true)]
    ExactWorker,
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    // stdout carries the worker protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Compare {
            vertices,
            edges,
            seed,
            timeout,
            order,
            config,
            log,
            no_log,
            visualize,
        } => {
            let mut settings = CompareConfig::load_or_default(config.as_deref())?;
            if let Some(timeout) = timeout {
                settings.timeout_secs = timeout;
            }
            if let Some(orders) = order {
                settings.orders = orders;
            }
            if let Some(log) = log {
                settings.log_path = log;
            }
            settings.validate()?;
            run_compare(vertices, edges, seed, &settings, !no_log, visualize)?
        }
        Commands::History { config, log, text } => {
            let settings = CompareConfig::load_or_default(config.as_deref())?;
            run_history(log.unwrap_or(settings.log_path), text)?
        }
        Commands::ExactWorker => run_worker(io::stdin().lock(), io::stdout().lock())?,
    }
    Ok(())
}

fn run_compare(
    vertices: usize,
    edges: usize,
    seed: Option<u64>,
    config: &CompareConfig,
    record: bool,
    visualize: bool,
) -> CliResult<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let graph = generate_random_graph(vertices, edges, &mut rng)?;
    println!(
        "Random graph: {} vertices, {} edges",
        graph.vertex_count(),
        graph.edge_count()
    );

    let runner = SubprocessRunner::current_exe()?;
    let result = compare(&graph, config, &runner)?;
    print_summary(&result);

    if record {
        let total = append_run(&config.log_path, &RunRecord::from_comparison(&result))?;
        println!(
            "Run saved to {} ({} runs stored)",
            config.log_path.display(),
            total
        );
    }

    if visualize {
        let mut viz = Visualizer::for_comparison(&result)?;
        viz.wait_for_key()?;
        viz.finish()?;
    }
    Ok(())
}

fn run_history(log: PathBuf, text: bool) -> CliResult<()> {
    let runs = load_runs(&log)?;
    if runs.is_empty() {
        println!("No runs stored in {}", log.display());
        return Ok(());
    }

    let comparisons = runs
        .iter()
        .map(RunRecord::to_comparison)
        .collect::<Result<Vec<_>, _>>()?;

    if text {
        for (idx, result) in comparisons.iter().enumerate() {
            print!("#{idx}: ");
            print_summary(result);
        }
        return Ok(());
    }

    let mut viz = Visualizer::for_comparison(&comparisons[0])?;
    for (idx, result) in comparisons.iter().enumerate() {
        viz.show(result, &format!("run {} of {}", idx + 1, comparisons.len()))?;
        if !viz.wait_for_key()? {
            break;
        }
    }
    viz.finish()?;
    Ok(())
}

fn print_summary(result: &ComparisonResult) {
    println!(
        "{} vertices, {} edges",
        result.graph.vertex_count(),
        result.graph.edge_count()
    );
    for coloring in result.results() {
        println!(
            "  {:<13} {:>3} colors  {:.6}s",
            coloring.algorithm.name(),
            coloring.color_count(),
            coloring.runtime_secs()
        );
    }
    if result.exact.is_none() {
        println!("  Brute Force   unavailable ({:?})", result.exact_status);
    }
}
