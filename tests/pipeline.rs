use embedding_bench::{
    BenchmarkResults, BenchmarkRunner, Config, Result,
    persistence::{DEFAULT_RESULTS_FILENAME, load_results, save_results},
    report::{REPORT_FILENAME, write_report},
};
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = r#"
dataset:
  documents:
    - "Rust has a borrow checker."
    - "Python is popular for data science."
    - "Kubernetes schedules containers."
  queries:
    - query: "How does rust manage memory?"
      relevant_docs: [0]
    - query: "Which language for data science?"
      relevant_docs: [1]
    - query: "What runs containers?"
      relevant_docs: [2, 0]
models:
  - name: Keywords
    type: api
latency_runs: 3
charts: false
"#;

const KEYWORDS: [&str; 3] = ["rust", "data science", "containers"];

/// One-hot vector over a tiny keyword vocabulary.
fn keyword_embedder(texts: &[String]) -> Result<Vec<Vec<f32>>> {
    Ok(texts
        .iter()
        .map(|text| {
            let lower = text.to_lowercase();
            KEYWORDS
                .iter()
                .map(|k| if lower.contains(k) { 1.0 } else { 0.0 })
                .collect()
        })
        .collect())
}

#[tokio::test]
async fn test_config_to_report() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("bench.yaml");
    fs::write(&config_path, CONFIG).unwrap();

    let mut config = Config::load_from_file(&config_path).unwrap();
    config.output_dir = dir.path().join("out");
    let dataset = config.dataset.build().unwrap();
    assert_eq!(dataset.len(), 3);

    let runner = BenchmarkRunner::new(&dataset, config.latency_runs);
    let mut results = BenchmarkResults::new(dataset.summary());
    for spec in &config.models {
        results
            .models
            .push(runner.run_model(&spec.name, &keyword_embedder).await.unwrap());
    }

    let model = &results.models[0];
    assert_eq!(model.model, "Keywords");
    assert_eq!(model.dimension, 3);
    assert_eq!(model.quality.recall_at_1, 1.0);
    assert_eq!(model.quality.recall_at_10, 1.0);
    assert_eq!(model.latency.runs, 3);
    assert_eq!(model.cost.cost_per_1m_tokens, 0.0);

    let results_path = config.output_dir.join(DEFAULT_RESULTS_FILENAME);
    save_results(&results, &results_path).unwrap();
    assert_eq!(load_results(&results_path).unwrap().models.len(), 1);

    let report = write_report(&results, &config.output_dir, config.charts).unwrap();
    assert_eq!(report, config.output_dir.join(REPORT_FILENAME));

    let markdown = fs::read_to_string(report).unwrap();
    assert!(markdown.contains("- Documents: 3"));
    assert!(markdown.contains("| Keywords | 1.00 | 1.00 | 1.00 |"));
    assert!(markdown.contains(
        "| Keywords | $0.00 | Open-source, self-hosted (CPU/GPU cost excluded) |"
    ));
    assert!(!markdown.contains("## Charts"));
}

#[tokio::test]
async fn test_synthetic_dataset_scores_within_bounds() {
    let config = Config::from_yaml(
        "dataset:\n  synthetic:\n    samples: 20\n    seed: 3\nmodels:\n  - name: Gemini\n    type: api\n",
    )
    .unwrap();
    let dataset = config.dataset.build().unwrap();
    assert_eq!(dataset.len(), 20);
    assert_eq!(dataset.queries.len(), 20);

    let runner = BenchmarkRunner::new(&dataset, 1);
    let result = runner.run_model("Gemini", &keyword_embedder).await.unwrap();

    let q = &result.quality;
    assert!(q.recall_at_1 <= q.recall_at_5);
    assert!(q.recall_at_5 <= q.recall_at_10);
    assert!((0.0..=1.0).contains(&q.recall_at_10));
    assert_eq!(result.cost.note, "Free tier Gemini API (rate-limited)");
}
