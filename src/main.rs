//! Embedding Bench CLI
//!
//! Benchmarks text-embedding models and writes a Markdown report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use embedding_bench::{
    benchmark::{BenchmarkResults, BenchmarkRunner, ModelResult},
    config::{Config, DEFAULT_CONFIG_FILE, ModelKind, ModelSpec},
    dataset::generate_synthetic,
    embed::GeminiEmbedder,
    persistence::{DEFAULT_RESULTS_FILENAME, load_results, save_results},
    report::write_report,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Embedding Bench - compare embedding models on retrieval quality, latency and cost
#[derive(Parser)]
#[command(name = "embedding-bench")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Defaults to `run` with the default config file
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark described by a config file
    Run {
        /// Path to the benchmark config (YAML)
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        config: PathBuf,

        /// Override the output directory from the config
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
    },

    /// Write a config with a synthetic dataset and the default models
    Generate {
        /// Number of document/query pairs
        #[arg(short = 'n', long, default_value_t = 100)]
        samples: usize,

        /// Seed for reproducible topic selection
        #[arg(long)]
        seed: Option<u64>,

        /// Output path for the config file
        #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Re-render the report from saved results
    Report {
        /// Path to a results file written by `run`
        #[arg(short, long, default_value = "results/results.json")]
        results: PathBuf,

        /// Directory for the report (defaults to the results file's directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Skip chart rendering
        #[arg(long)]
        no_charts: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => cmd_run(PathBuf::from(DEFAULT_CONFIG_FILE), None, false).await,
        Some(Commands::Run {
            config,
            output_dir,
            no_charts,
        }) => cmd_run(config, output_dir, no_charts).await,
        Some(Commands::Generate {
            samples,
            seed,
            output,
            force,
        }) => cmd_generate(samples, seed, output, force),
        Some(Commands::Report {
            results,
            output_dir,
            no_charts,
        }) => cmd_report(results, output_dir, no_charts),
    }
}

async fn cmd_run(config_path: PathBuf, output_dir: Option<PathBuf>, no_charts: bool) -> Result<()> {
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if no_charts {
        config.charts = false;
    }

    config.validate().context("Invalid configuration")?;
    let dataset = config.dataset.build().context("Invalid dataset")?;

    info!(
        dataset = %dataset.name,
        documents = dataset.len(),
        queries = dataset.queries.len(),
        models = config.models.len(),
        "Starting benchmark"
    );

    let start = Instant::now();
    let runner = BenchmarkRunner::new(&dataset, config.latency_runs);
    let mut results = BenchmarkResults::new(dataset.summary());

    for spec in &config.models {
        info!(model = %spec.name, kind = ?spec.kind, "Running benchmark");

        let result = match spec.kind {
            ModelKind::Local => run_local(&runner, spec).await,
            ModelKind::Api => run_api(&runner, spec, &config).await,
        }
        .with_context(|| format!("Benchmark failed for model '{}'", spec.name))?;

        results.models.push(result);
    }

    results.total_time_secs = start.elapsed().as_secs_f64();
    results.print_summary();

    let results_path = config.output_dir.join(DEFAULT_RESULTS_FILENAME);
    save_results(&results, &results_path).context("Failed to save results")?;

    let report_path =
        write_report(&results, &config.output_dir, config.charts).context("Failed to write report")?;

    println!("Benchmark completed. Results saved to {}", report_path.display());
    Ok(())
}

async fn run_api(
    runner: &BenchmarkRunner<'_>,
    spec: &ModelSpec,
    config: &Config,
) -> embedding_bench::Result<ModelResult> {
    let gemini = GeminiEmbedder::new(config.api.clone())?;
    runner.run_model(&spec.name, &gemini).await
}

#[cfg(feature = "local")]
async fn run_local(
    runner: &BenchmarkRunner<'_>,
    spec: &ModelSpec,
) -> embedding_bench::Result<ModelResult> {
    use embedding_bench::{BenchError, embed::LocalEmbedder};

    let model_id = spec.model_id.as_deref().ok_or_else(|| {
        BenchError::InvalidConfig(format!("local model '{}' needs a model_id", spec.name))
    })?;

    let model = LocalEmbedder::load(model_id)?;
    runner.run_model(&spec.name, &model).await
}

#[cfg(not(feature = "local"))]
async fn run_local(
    _runner: &BenchmarkRunner<'_>,
    spec: &ModelSpec,
) -> embedding_bench::Result<ModelResult> {
    Err(embedding_bench::BenchError::InvalidConfig(format!(
        "model '{}' is local, but this build has no local model support",
        spec.name
    )))
}

fn cmd_generate(samples: usize, seed: Option<u64>, output: PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "'{}' already exists. Pass --force to overwrite it.",
            output.display()
        );
    }

    let dataset = generate_synthetic(samples, seed);
    let config = Config::for_dataset(&dataset);

    let yaml = config.to_yaml().context("Failed to serialize config")?;
    std::fs::write(&output, yaml)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("Documents: {}", dataset.len());
    println!("Queries: {}", dataset.queries.len());
    if let (Some(doc), Some(query)) = (dataset.documents.first(), dataset.queries.first()) {
        println!("Sample document: {}", doc);
        println!("Sample query: {} -> {:?}", query.text, query.relevant_docs);
    }
    println!("\nConfig written to: {}", output.display());

    Ok(())
}

fn cmd_report(results_path: PathBuf, output_dir: Option<PathBuf>, no_charts: bool) -> Result<()> {
    let results = load_results(&results_path).context("Failed to load results")?;

    let output_dir = output_dir.unwrap_or_else(|| {
        results_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    });

    results.print_summary();

    let report_path = write_report(&results, &output_dir, !no_charts).context("Failed to write report")?;
    println!("Report written to {}", report_path.display());

    Ok(())
}
