//! Embedding Bench - compare text-embedding models on retrieval quality,
//! latency and cost.
//!
//! # Overview
//!
//! A benchmark run is a single sequential pass per model:
//! 1. Embed every document of the dataset with the model's provider
//! 2. Embed each query and rank all documents by cosine similarity
//! 3. Score the rankings with Recall@1/5/10 and NDCG@10
//! 4. Time repeated provider calls and look up the model's cost
//! 5. Render a Markdown report with charts
//!
//! # Quick Start
//!
//! ```no_run
//! use embedding_bench::{
//!     benchmark::{BenchmarkResults, BenchmarkRunner},
//!     config::Config,
//!     embed::GeminiEmbedder,
//!     report::write_report,
//! };
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(Path::new("benchmark_config.yaml"))?;
//!     config.validate()?;
//!
//!     let dataset = config.dataset.build()?;
//!     let runner = BenchmarkRunner::new(&dataset, config.latency_runs);
//!
//!     let gemini = GeminiEmbedder::new(config.api.clone())?;
//!     let mut results = BenchmarkResults::new(dataset.summary());
//!     results.models.push(runner.run_model("Gemini", &gemini).await?);
//!
//!     write_report(&results, &config.output_dir, config.charts)?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Dataset**: documents plus queries with ground-truth relevant documents
//! - **Embedder**: capability of turning a batch of texts into vectors
//! - **eval**: retrieval metrics, latency measurement, cost lookup
//! - **BenchmarkRunner**: drives one provider through the whole evaluation
//! - **report**: Markdown report, charts and the JSON results dump

pub mod benchmark;
pub mod config;
pub mod dataset;
pub mod embed;
pub mod error;
pub mod eval;
pub mod persistence;
pub mod report;

// Re-export commonly used types
pub use benchmark::{BenchmarkResults, BenchmarkRunner, ModelResult};
pub use config::Config;
pub use dataset::{Dataset, Query};
pub use embed::Embedder;
pub use error::{BenchError, Result};
pub use eval::{CostEstimate, LatencyStats, QualityMetrics};
pub use persistence::{load_results, save_results};
