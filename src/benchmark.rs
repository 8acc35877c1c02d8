//! Benchmark runner: embeds a dataset with one provider, then scores quality,
//! latency and cost.

use crate::dataset::{Dataset, DatasetSummary};
use crate::embed::Embedder;
use crate::error::{BenchError, Result};
use crate::eval::{
    CostEstimate, LatencyStats, QualityMetrics, QueryRecord, estimate_cost, evaluate,
    measure_latency,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

/// Results for a single model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResult {
    /// Model display name.
    pub model: String,
    pub quality: QualityMetrics,
    pub latency: LatencyStats,
    pub cost: CostEstimate,
    /// Embedding dimension produced by the provider.
    pub dimension: usize,
}

/// Aggregated benchmark results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResults {
    pub dataset: DatasetSummary,
    /// One record per model, in run order.
    pub models: Vec<ModelResult>,
    /// Total benchmark time (seconds).
    pub total_time_secs: f64,
}

impl BenchmarkResults {
    /// Create empty results.
    pub fn new(dataset: DatasetSummary) -> Self {
        Self {
            dataset,
            models: Vec::new(),
            total_time_secs: 0.0,
        }
    }

    /// Print summary to stdout.
    pub fn print_summary(&self) {
        println!("\n========== Benchmark Results ==========");
        println!(
            "Dataset: {} ({} documents, {} queries)",
            self.dataset.name, self.dataset.documents, self.dataset.queries
        );
        println!("----------------------------------------");
        println!(
            "{:<14} {:>6} {:>6} {:>6} {:>8} {:>10}",
            "Model", "R@1", "R@5", "R@10", "NDCG@10", "Mean ms"
        );
        for result in &self.models {
            let q = &result.quality;
            println!(
                "{:<14} {:>6.2} {:>6.2} {:>6.2} {:>8.2} {:>10.1}",
                result.model,
                q.recall_at_1,
                q.recall_at_5,
                q.recall_at_10,
                q.ndcg_at_10,
                result.latency.mean_ms
            );
        }
        println!("----------------------------------------");
        println!("Total time: {:.1}s", self.total_time_secs);
        println!("========================================\n");
    }
}

/// Runs one dataset through any number of providers, one at a time.
pub struct BenchmarkRunner<'a> {
    dataset: &'a Dataset,
    latency_runs: usize,
}

impl<'a> BenchmarkRunner<'a> {
    /// Create a new benchmark runner.
    pub fn new(dataset: &'a Dataset, latency_runs: usize) -> Self {
        Self {
            dataset,
            latency_runs,
        }
    }

    /// Benchmark a single provider.
    ///
    /// Documents are embedded as one batch; each query is embedded with its
    /// own call. Latency is measured on the document batch.
    pub async fn run_model<E: Embedder>(&self, name: &str, embedder: &E) -> Result<ModelResult> {
        let started = Instant::now();

        info!(model = name, documents = self.dataset.len(), "Embedding documents");
        let doc_embeddings = embedder.embed(&self.dataset.documents).await?;
        if doc_embeddings.len() != self.dataset.len() {
            return Err(BenchError::EmbeddingCountMismatch {
                expected: self.dataset.len(),
                found: doc_embeddings.len(),
            });
        }

        info!(model = name, queries = self.dataset.queries.len(), "Embedding queries");
        let mut queries = Vec::with_capacity(self.dataset.queries.len());
        for query in &self.dataset.queries {
            let embedding = embedder
                .embed(std::slice::from_ref(&query.text))
                .await?
                .into_iter()
                .next()
                .ok_or(BenchError::EmbeddingCountMismatch {
                    expected: 1,
                    found: 0,
                })?;

            queries.push(QueryRecord {
                embedding,
                relevant_docs: query.relevant_docs.clone(),
            });
        }

        let quality = evaluate(&doc_embeddings, &queries)?;
        info!(
            model = name,
            recall_at_1 = quality.recall_at_1,
            ndcg_at_10 = quality.ndcg_at_10,
            "Retrieval quality scored"
        );

        info!(model = name, runs = self.latency_runs, "Measuring latency");
        let latency = measure_latency(embedder, &self.dataset.documents, self.latency_runs).await?;

        let dimension = doc_embeddings
            .first()
            .or_else(|| queries.first().map(|q| &q.embedding))
            .map_or(0, Vec::len);

        info!(
            model = name,
            elapsed_secs = started.elapsed().as_secs_f64(),
            "Model benchmark finished"
        );

        Ok(ModelResult {
            model: name.to_string(),
            quality,
            latency,
            cost: estimate_cost(name),
            dimension,
        })
    }
}
