use clap::Parser;
use greedy_vs_bruteforce::graph::{max_edges, GraphError};
use greedy_vs_bruteforce::solver::{exact_coloring, greedy_coloring, VertexOrder};
use greedy_vs_bruteforce::utils::random_graph::generate_random_graph;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Duration;

/// Above this the exhaustive search stops being a benchmark and becomes a wait.
const MAX_EXACT_VERTICES: usize = 10;

struct SampleResult {
    greedy_colors: usize,
    degree_colors: usize,
    exact_colors: usize,
    greedy_time: Duration,
    degree_time: Duration,
    exact_time: Duration,
}

struct BenchmarkResult {
    vertices: usize,
    edges: usize,
    samples: usize,
    greedy_optimal: usize,
    degree_optimal: usize,
    mean_greedy_excess: f64,
    mean_degree_excess: f64,
    mean_greedy_ms: f64,
    mean_degree_ms: f64,
    mean_exact_ms: f64,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Greedy colorings against the exact chromatic number on small random graphs"
)]
struct BenchmarkCli {
    /// Comma-separated list of vertex counts (e.g. 4,6,8)
    #[arg(long, value_delimiter = ',', value_parser = clap::value_parser!(usize))]
    vertices: Option<Vec<usize>>,
    /// Edge density as a fraction of the maximum edge count
    #[arg(long, default_value_t = 0.5)]
    density: f64,
    /// Random graphs per vertex count
    #[arg(long, default_value_t = 16)]
    samples: usize,
    #[arg(long, default_value_t = 0x5eed)]
    seed: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = BenchmarkCli::parse();
    println!("=== Greedy vs. Brute Force Benchmark ===\n");

    let vertex_counts = cli.vertices.unwrap_or_else(|| vec![4, 5, 6, 7, 8]);
    let density = cli.density.clamp(0.0, 1.0);
    let mut all_results = Vec::new();

    for &vertices in &vertex_counts {
        if vertices == 0 || vertices > MAX_EXACT_VERTICES {
            eprintln!("  ✗ Skipping n={vertices}: supported range is 1..={MAX_EXACT_VERTICES}");
            continue;
        }
        let edges = (max_edges(vertices) as f64 * density).round() as usize;
        println!(
            "Benchmarking n={} vertices, m={} edges, {} samples",
            vertices, edges, cli.samples
        );
        match run_benchmark(vertices, edges, cli.samples, cli.seed) {
            Ok(result) => {
                print_result(&result);
                all_results.push(result);
            }
            Err(e) => eprintln!("  ✗ Benchmark failed: {}", e),
        }
        println!();
    }

    println!("\n=== Summary Report ===\n");
    print_summary_table(&all_results);
}

fn run_benchmark(
    vertices: usize,
    edges: usize,
    samples: usize,
    seed: u64,
) -> Result<BenchmarkResult, Box<dyn std::error::Error + Send + Sync>> {
    let sample_results = (0..samples)
        .into_par_iter()
        .map(|sample| -> Result<SampleResult, GraphError> {
            let mut rng = StdRng::seed_from_u64(seed ^ ((vertices as u64) << 32) ^ sample as u64);
            let graph = generate_random_graph(vertices, edges, &mut rng)?;
            let greedy = greedy_coloring(&graph, &VertexOrder::Natural)?;
            let degree = greedy_coloring(&graph, &VertexOrder::LargestDegreeFirst)?;
            let exact = exact_coloring(&graph);
            Ok(SampleResult {
                greedy_colors: greedy.color_count(),
                degree_colors: degree.color_count(),
                exact_colors: exact.color_count(),
                greedy_time: greedy.duration,
                degree_time: degree.duration,
                exact_time: exact.duration,
            })
        })
        .collect::<Result<Vec<_>, GraphError>>()?;

    let count = sample_results.len().max(1) as f64;
    let mean = |f: &dyn Fn(&SampleResult) -> f64| sample_results.iter().map(f).sum::<f64>() / count;

    Ok(BenchmarkResult {
        vertices,
        edges,
        samples: sample_results.len(),
        greedy_optimal: sample_results
            .iter()
            .filter(|s| s.greedy_colors == s.exact_colors)
            .count(),
        degree_optimal: sample_results
            .iter()
            .filter(|s| s.degree_colors == s.exact_colors)
            .count(),
        mean_greedy_excess: mean(&|s| (s.greedy_colors - s.exact_colors) as f64),
        mean_degree_excess: mean(&|s| (s.degree_colors - s.exact_colors) as f64),
        mean_greedy_ms: mean(&|s| s.greedy_time.as_secs_f64() * 1000.0),
        mean_degree_ms: mean(&|s| s.degree_time.as_secs_f64() * 1000.0),
        mean_exact_ms: mean(&|s| s.exact_time.as_secs_f64() * 1000.0),
    })
}

fn print_result(result: &BenchmarkResult) {
    println!(
        "  Greedy optimal:        {}/{} (mean excess {:.2} colors)",
        result.greedy_optimal, result.samples, result.mean_greedy_excess
    );
    println!(
        "  Welsh-Powell optimal:  {}/{} (mean excess {:.2} colors)",
        result.degree_optimal, result.samples, result.mean_degree_excess
    );
    println!(
        "  Mean time: greedy {:.4} ms, welsh-powell {:.4} ms, brute force {:.4} ms",
        result.mean_greedy_ms, result.mean_degree_ms, result.mean_exact_ms
    );
}

fn print_summary_table(results: &[BenchmarkResult]) {
    println!(
        "{:>4} {:>5} {:>8} {:>12} {:>12} {:>14}",
        "n", "m", "samples", "greedy opt", "wp opt", "brute ms"
    );
    for result in results {
        println!(
            "{:>4} {:>5} {:>8} {:>12} {:>12} {:>14.4}",
            result.vertices,
            result.edges,
            result.samples,
            result.greedy_optimal,
            result.degree_optimal,
            result.mean_exact_ms
        );
    }
}
