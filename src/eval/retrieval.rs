//! Retrieval quality: brute-force cosine ranking scored with Recall@K and NDCG@10.

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};

/// Cut-offs reported for recall.
pub const RECALL_CUTOFFS: [usize; 3] = [1, 5, 10];

/// Cut-off for NDCG.
pub const NDCG_CUTOFF: usize = 10;

/// A query ready for evaluation.
#[derive(Debug, Clone)]
pub struct QueryRecord {
    pub embedding: Vec<f32>,
    pub relevant_docs: Vec<usize>,
}

/// Retrieval metrics averaged over all queries of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    #[serde(rename = "Recall@1")]
    pub recall_at_1: f64,
    #[serde(rename = "Recall@5")]
    pub recall_at_5: f64,
    #[serde(rename = "Recall@10")]
    pub recall_at_10: f64,
    /// Unnormalized binary DCG over the top ten (see [`ndcg_at_10`]).
    #[serde(rename = "NDCG@10")]
    pub ndcg_at_10: f64,
}

impl QualityMetrics {
    /// Metric names and values, in report order.
    pub fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("Recall@1", self.recall_at_1),
            ("Recall@5", self.recall_at_5),
            ("Recall@10", self.recall_at_10),
            ("NDCG@10", self.ndcg_at_10),
        ]
    }
}

/// Compute cosine similarity between two equal-length vectors.
///
/// Products and norms are accumulated in f64, so large finite components do
/// not overflow. A zero vector has similarity 0 with everything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    similarity(a, b) as f32
}

fn similarity(a: &[f32], b: &[f32]) -> f64 {
    let (dot, norm_a, norm_b) = a.iter().zip(b.iter()).fold(
        (0.0f64, 0.0f64, 0.0f64),
        |(dot, na, nb), (&x, &y)| {
            let (x, y) = (f64::from(x), f64::from(y));
            (dot + x * y, na + x * x, nb + y * y)
        },
    );

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a.sqrt() * norm_b.sqrt())
    }
}

fn check_finite(embedding: &[f32], context: impl FnOnce() -> String) -> Result<()> {
    match embedding.iter().position(|x| !x.is_finite()) {
        Some(position) => Err(BenchError::NonFiniteEmbedding {
            context: context(),
            position,
        }),
        None => Ok(()),
    }
}

/// Rank every document position by descending similarity to `query`.
///
/// Equal similarities keep ascending document order, so rankings are
/// reproducible. The result is always a permutation of `0..documents.len()`.
/// NaN or infinite components are rejected.
pub fn rank_documents(query: &[f32], documents: &[Vec<f32>]) -> Result<Vec<usize>> {
    check_finite(query, || "query".to_string())?;

    let mut scored = Vec::with_capacity(documents.len());

    for (i, doc) in documents.iter().enumerate() {
        if doc.len() != query.len() {
            return Err(BenchError::DimensionMismatch {
                context: format!("document {}", i),
                expected: query.len(),
                found: doc.len(),
            });
        }
        check_finite(doc, || format!("document {}", i))?;
        scored.push((i, similarity(query, doc)));
    }

    // sort_by is stable
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(scored.into_iter().map(|(i, _)| i).collect())
}

/// 1.0 if any relevant document is among the first `k` ranked, else 0.0.
pub fn recall_at_k(ranking: &[usize], relevant: &[usize], k: usize) -> f64 {
    let top = &ranking[..k.min(ranking.len())];
    if top.iter().any(|doc| relevant.contains(doc)) {
        1.0
    } else {
        0.0
    }
}

/// Binary-relevance DCG over the first ten ranked positions.
///
/// Each relevant document at 0-based rank `i` adds `1 / log2(i + 2)`. The sum
/// is not divided by the ideal DCG, so a query with several relevant
/// documents can score above 1.0.
pub fn ndcg_at_10(ranking: &[usize], relevant: &[usize]) -> f64 {
    ranking
        .iter()
        .take(NDCG_CUTOFF)
        .enumerate()
        .filter(|(_, doc)| relevant.contains(doc))
        .map(|(i, _)| 1.0 / ((i + 2) as f64).log2())
        .sum()
}

/// Score every query against the documents and average the metrics.
///
/// Rejects the run on any dimension mismatch, non-finite component or
/// out-of-range relevant document rather than producing degraded numbers.
pub fn evaluate(document_embeddings: &[Vec<f32>], queries: &[QueryRecord]) -> Result<QualityMetrics> {
    if queries.is_empty() {
        return Err(BenchError::EmptyDataset("no queries to evaluate".to_string()));
    }

    let dimension = document_embeddings.first().map(Vec::len);

    if let Some(dim) = dimension {
        if let Some((i, doc)) = document_embeddings
            .iter()
            .enumerate()
            .find(|(_, d)| d.len() != dim)
        {
            return Err(BenchError::DimensionMismatch {
                context: format!("document {}", i),
                expected: dim,
                found: doc.len(),
            });
        }
    }

    let mut totals = QualityMetrics::default();

    for (qi, query) in queries.iter().enumerate() {
        if let Some(dim) = dimension.filter(|&d| d != query.embedding.len()) {
            return Err(BenchError::DimensionMismatch {
                context: format!("query {}", qi),
                expected: dim,
                found: query.embedding.len(),
            });
        }

        if let Some(&index) = query
            .relevant_docs
            .iter()
            .find(|&&i| i >= document_embeddings.len())
        {
            return Err(BenchError::RelevantDocOutOfRange {
                query: qi,
                index,
                doc_count: document_embeddings.len(),
            });
        }

        check_finite(&query.embedding, || format!("query {}", qi))?;
        let ranking = rank_documents(&query.embedding, document_embeddings)?;

        let [r1, r5, r10] =
            RECALL_CUTOFFS.map(|k| recall_at_k(&ranking, &query.relevant_docs, k));
        totals.recall_at_1 += r1;
        totals.recall_at_5 += r5;
        totals.recall_at_10 += r10;
        totals.ndcg_at_10 += ndcg_at_10(&ranking, &query.relevant_docs);
    }

    let n = queries.len() as f64;
    Ok(QualityMetrics {
        recall_at_1: totals.recall_at_1 / n,
        recall_at_5: totals.recall_at_5 / n,
        recall_at_10: totals.recall_at_10 / n,
        ndcg_at_10: totals.ndcg_at_10 / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(dim: usize, axis: usize) -> Vec<f32> {
        let mut v = vec![0.0; dim];
        v[axis] = 1.0;
        v
    }

    fn record(embedding: Vec<f32>, relevant_docs: Vec<usize>) -> QueryRecord {
        QueryRecord {
            embedding,
            relevant_docs,
        }
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-6);

        let c = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &c).abs() < 1e-6);

        let d = vec![-2.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        let zero = vec![0.0, 0.0];
        let a = vec![3.0, 4.0];
        assert_eq!(cosine_similarity(&zero, &a), 0.0);
        assert_eq!(cosine_similarity(&a, &zero), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
    }

    #[test]
    fn test_ranking_is_permutation() {
        let docs: Vec<Vec<f32>> = (0..17)
            .map(|i| vec![(i as f32 * 0.37).sin(), (i as f32 * 1.3).cos(), i as f32 % 3.0])
            .collect();
        let ranking = rank_documents(&[0.2, -0.5, 1.0], &docs).unwrap();

        let mut sorted = ranking.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..17).collect::<Vec<_>>());
    }

    #[test]
    fn test_ties_keep_document_order() {
        let docs = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![0.0, 2.0], vec![2.0, 0.0]];
        let ranking = rank_documents(&[1.0, 0.0], &docs).unwrap();
        assert_eq!(ranking, vec![1, 3, 0, 2]);

        let zero_query = rank_documents(&[0.0, 0.0], &docs).unwrap();
        assert_eq!(zero_query, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_identical_document_ranks_first() {
        let docs: Vec<Vec<f32>> = (0..6).map(|axis| unit(6, axis)).collect();
        let ranking = rank_documents(&unit(6, 4), &docs).unwrap();
        assert_eq!(ranking[0], 4);
    }

    #[test]
    fn test_rank_rejects_dimension_mismatch() {
        let docs = vec![vec![1.0, 0.0], vec![1.0, 0.0, 0.0]];
        let result = rank_documents(&[1.0, 0.0], &docs);
        assert!(matches!(
            result,
            Err(BenchError::DimensionMismatch {
                expected: 2,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_recall_at_k() {
        let ranking = vec![3, 1, 4, 0, 2];
        assert_eq!(recall_at_k(&ranking, &[3], 1), 1.0);
        assert_eq!(recall_at_k(&ranking, &[4], 1), 0.0);
        assert_eq!(recall_at_k(&ranking, &[4], 5), 1.0);
        assert_eq!(recall_at_k(&ranking, &[2, 0], 3), 0.0);
        assert_eq!(recall_at_k(&ranking, &[], 10), 0.0);
    }

    #[test]
    fn test_recall_k_beyond_document_count() {
        let ranking = vec![1, 0];
        assert_eq!(recall_at_k(&ranking, &[0], 10), 1.0);
        assert_eq!(recall_at_k(&[], &[0], 10), 0.0);
    }

    #[test]
    fn test_recall_is_monotonic_in_k() {
        let ranking: Vec<usize> = (0..20).rev().collect();
        for target in 0..20 {
            let r1 = recall_at_k(&ranking, &[target], 1);
            let r5 = recall_at_k(&ranking, &[target], 5);
            let r10 = recall_at_k(&ranking, &[target], 10);
            assert!(r1 <= r5 && r5 <= r10);
        }
    }

    #[test]
    fn test_ndcg_at_10() {
        let ranking: Vec<usize> = (0..12).collect();
        assert!((ndcg_at_10(&ranking, &[0]) - 1.0).abs() < 1e-12);
        assert!((ndcg_at_10(&ranking, &[1]) - 1.0 / 3f64.log2()).abs() < 1e-12);
        assert!((ndcg_at_10(&ranking, &[0, 1]) - (1.0 + 1.0 / 3f64.log2())).abs() < 1e-12);
        assert_eq!(ndcg_at_10(&ranking, &[]), 0.0);
    }

    #[test]
    fn test_ndcg_ignores_positions_beyond_ten() {
        let ranking: Vec<usize> = (0..15).collect();
        let base = ndcg_at_10(&ranking, &[2]);
        assert_eq!(ndcg_at_10(&ranking, &[2, 10, 11, 14]), base);
        assert_eq!(ndcg_at_10(&ranking, &[12]), 0.0);
    }

    #[test]
    fn test_single_relevant_doc_at_rank_zero_scores_one() {
        let docs: Vec<Vec<f32>> = (0..12).map(|axis| unit(12, axis)).collect();
        let metrics = evaluate(&docs, &[record(unit(12, 7), vec![7])]).unwrap();
        assert_eq!(
            metrics,
            QualityMetrics {
                recall_at_1: 1.0,
                recall_at_5: 1.0,
                recall_at_10: 1.0,
                ndcg_at_10: 1.0,
            }
        );
    }

    #[test]
    fn test_empty_relevant_set_scores_zero() {
        let docs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let metrics = evaluate(&docs, &[record(vec![1.0, 0.0], Vec::new())]).unwrap();
        assert_eq!(metrics, QualityMetrics::default());
    }

    #[test]
    fn test_single_document() {
        let docs = vec![vec![0.3, 0.4]];
        let metrics = evaluate(&docs, &[record(vec![-1.0, 2.0], vec![0])]).unwrap();
        assert_eq!(metrics.recall_at_1, 1.0);
    }

    #[test]
    fn test_metrics_are_averaged_over_queries() {
        let docs: Vec<Vec<f32>> = (0..3).map(|axis| unit(3, axis)).collect();
        let queries = vec![
            record(unit(3, 0), vec![0]),
            record(unit(3, 0), vec![1]),
        ];
        let metrics = evaluate(&docs, &queries).unwrap();

        assert!((metrics.recall_at_1 - 0.5).abs() < 1e-12);
        assert!((metrics.recall_at_5 - 1.0).abs() < 1e-12);
        assert!((metrics.recall_at_10 - 1.0).abs() < 1e-12);
        // Second query finds doc 1 at rank 1: 1/log2(3)
        let expected = (1.0 + 1.0 / 3f64.log2()) / 2.0;
        assert!((metrics.ndcg_at_10 - expected).abs() < 1e-12);
    }

    #[test]
    fn test_two_document_scenario() {
        // "cats are mammals", "rain is wet"; the query is closest to the first
        let docs = vec![vec![0.9, 0.1, 0.0], vec![0.0, 0.2, 0.9]];
        let query = vec![1.0, 0.0, 0.0];

        assert_eq!(rank_documents(&query, &docs).unwrap(), vec![0, 1]);

        let metrics = evaluate(&docs, &[record(query, vec![0])]).unwrap();
        assert_eq!(metrics.recall_at_1, 1.0);
        assert_eq!(metrics.ndcg_at_10, 1.0);
    }

    #[test]
    fn test_evaluate_rejects_query_dimension_mismatch() {
        let docs = vec![vec![1.0, 0.0, 0.0]];
        let result = evaluate(&docs, &[record(vec![1.0, 0.0], vec![0])]);
        match result {
            Err(BenchError::DimensionMismatch {
                context,
                expected,
                found,
            }) => {
                assert_eq!(context, "query 0");
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_rejects_ragged_documents() {
        let docs = vec![vec![1.0, 0.0], vec![1.0]];
        let result = evaluate(&docs, &[record(vec![1.0, 0.0], vec![0])]);
        assert!(matches!(result, Err(BenchError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_evaluate_rejects_out_of_range_relevant_doc() {
        let docs = vec![vec![1.0, 0.0]];
        let result = evaluate(&docs, &[record(vec![1.0, 0.0], vec![1])]);
        assert!(matches!(
            result,
            Err(BenchError::RelevantDocOutOfRange {
                query: 0,
                index: 1,
                doc_count: 1
            })
        ));
    }

    #[test]
    fn test_evaluate_rejects_no_queries() {
        let docs = vec![vec![1.0]];
        assert!(matches!(evaluate(&docs, &[]), Err(BenchError::EmptyDataset(_))));
    }

    #[test]
    fn test_rank_rejects_nan_document() {
        let docs: Vec<Vec<f32>> = (0..64)
            .map(|i| if i % 3 == 0 { vec![f32::NAN, 1.0] } else { vec![1.0, i as f32] })
            .collect();
        match rank_documents(&[1.0, 0.5], &docs) {
            Err(BenchError::NonFiniteEmbedding { context, position }) => {
                assert_eq!(context, "document 0");
                assert_eq!(position, 0);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_rank_rejects_infinite_query() {
        let docs = vec![vec![1.0, 0.0]];
        let result = rank_documents(&[0.0, f32::INFINITY], &docs);
        assert!(matches!(result, Err(BenchError::NonFiniteEmbedding { position: 1, .. })));
    }

    #[test]
    fn test_evaluate_rejects_nan_query() {
        let docs = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let queries = vec![
            record(vec![1.0, 0.0], vec![0]),
            record(vec![f32::NAN, 0.0], vec![1]),
        ];
        match evaluate(&docs, &queries) {
            Err(BenchError::NonFiniteEmbedding { context, .. }) => assert_eq!(context, "query 1"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_large_magnitudes_do_not_overflow() {
        let sim = cosine_similarity(&[1e20, 1e20], &[2e20, 2e20]);
        assert!((sim - 1.0).abs() < 1e-6);

        let docs = vec![vec![1.0, 0.0], vec![2e20, 2e20]];
        assert_eq!(rank_documents(&[1e20, 1e20], &docs).unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_metric_names_serialize() {
        let json = serde_json::to_value(QualityMetrics {
            recall_at_1: 0.25,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json["Recall@1"], 0.25);
        assert!(json.get("NDCG@10").is_some());
    }
}
