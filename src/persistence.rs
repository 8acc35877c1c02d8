//! Saving and loading benchmark results as JSON.

use crate::benchmark::BenchmarkResults;
use crate::error::{BenchError, Result};
use std::fs;
use std::path::Path;

/// Default filename for the results dump.
pub const DEFAULT_RESULTS_FILENAME: &str = "results.json";

/// Save results as pretty-printed JSON, creating the parent directory if needed.
pub fn save_results(results: &BenchmarkResults, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| BenchError::io(parent, e))?;
        }
    }

    let json = serde_json::to_string_pretty(results)
        .map_err(|e| BenchError::Serialization(e.to_string()))?;
    fs::write(path, json).map_err(|e| BenchError::io(path, e))?;

    Ok(())
}

/// Load results saved by [`save_results`].
pub fn load_results(path: &Path) -> Result<BenchmarkResults> {
    if !path.is_file() {
        return Err(BenchError::ResultsNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| BenchError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmark::ModelResult;
    use crate::dataset::DatasetSummary;
    use crate::eval::{LatencyStats, QualityMetrics, estimate_cost};
    use tempfile::TempDir;

    fn sample_results() -> BenchmarkResults {
        let mut results = BenchmarkResults::new(DatasetSummary {
            name: "test".to_string(),
            documents: 4,
            queries: 2,
            avg_relevant_per_query: 1.0,
        });
        results.models.push(ModelResult {
            model: "MiniLM".to_string(),
            quality: QualityMetrics {
                recall_at_1: 0.5,
                recall_at_5: 1.0,
                recall_at_10: 1.0,
                ndcg_at_10: 0.75,
            },
            latency: LatencyStats {
                mean_ms: 3.5,
                p95_ms: 4.5,
                p99_ms: 4.75,
                min_ms: 2.0,
                max_ms: 5.0,
                runs: 5,
            },
            cost: estimate_cost("MiniLM"),
            dimension: 384,
        });
        results.total_time_secs = 1.5;
        results
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join(DEFAULT_RESULTS_FILENAME);

        let original = sample_results();
        save_results(&original, &path).unwrap();
        let loaded = load_results(&path).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_json_uses_report_metric_names() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_RESULTS_FILENAME);

        save_results(&sample_results(), &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"Recall@1\""));
        assert!(content.contains("\"NDCG@10\""));
        assert!(content.contains("\"p95_ms\""));
        assert!(content.contains("\"cost_per_1M_tokens\""));
    }

    #[test]
    fn test_load_nonexistent() {
        let result = load_results(Path::new("/nonexistent/results.json"));
        assert!(matches!(result, Err(BenchError::ResultsNotFound(_))));
    }
}
