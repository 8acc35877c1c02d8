//! Evaluation of embedding models.
//!
//! This module provides:
//! - Retrieval quality (cosine ranking, Recall@K, NDCG@10)
//! - Latency measurement of embedding providers
//! - Static cost lookup

pub mod cost;
pub mod latency;
pub mod retrieval;

pub use cost::{CostEstimate, estimate_cost};
pub use latency::{LatencyStats, measure_latency, percentile};
pub use retrieval::{
    QualityMetrics, QueryRecord, cosine_similarity, evaluate, ndcg_at_10, rank_documents,
    recall_at_k,
};
