//! Markdown report rendering.
//!
//! The report has a fixed layout: dataset description, TL;DR, one table per
//! measured dimension, charts, a decision matrix and reproduction steps. The
//! TL;DR and decision matrix are static text.

pub mod charts;

pub use charts::{Chart, render_charts};

use crate::benchmark::BenchmarkResults;
use crate::error::{BenchError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the Markdown report.
pub const REPORT_FILENAME: &str = "article.md";

const TLDR: &str = "\
## TL;DR
- Fastest model: MiniLM
- Best retrieval quality: BGE-Large
- Best balance: BGE-Base
- API-based option without billing: Gemini
";

const DECISION_MATRIX: &str = "\
## Decision Matrix
- Choose **MiniLM** for low latency systems
- Choose **BGE-Base** for balanced production use
- Choose **BGE-Large** for best semantic accuracy
- Choose **Gemini** if API-based embeddings are required
";

const REPRODUCIBILITY: &str = "\
## Reproducibility

```bash
export GEMINI_API_KEY=...   # only needed for API models
cargo run --release -- generate --samples 100 --seed 42
cargo run --release -- run --config benchmark_config.yaml
```
";

/// Write the full report as Markdown into `out`.
pub fn render_markdown<W: Write>(
    out: &mut W,
    results: &BenchmarkResults,
    charts: &[Chart],
) -> std::io::Result<()> {
    let dataset = &results.dataset;

    writeln!(out, "# Text Embedding Model Benchmark\n")?;

    writeln!(out, "## Dataset\n")?;
    writeln!(out, "- Source: {}", dataset.name)?;
    writeln!(out, "- Documents: {}", dataset.documents)?;
    writeln!(out, "- Queries: {}", dataset.queries)?;
    writeln!(
        out,
        "- Relevant documents per query: {:.2}",
        dataset.avg_relevant_per_query
    )?;
    writeln!(out, "- Models compared: {}\n", results.models.len())?;

    writeln!(out, "{}", TLDR)?;

    writeln!(out, "## Retrieval Quality Results\n")?;
    writeln!(out, "| Model | Recall@1 | Recall@5 | Recall@10 | NDCG@10 |")?;
    writeln!(out, "|------|----------|----------|-----------|---------|")?;
    for r in &results.models {
        let q = &r.quality;
        writeln!(
            out,
            "| {} | {:.2} | {:.2} | {:.2} | {:.2} |",
            r.model, q.recall_at_1, q.recall_at_5, q.recall_at_10, q.ndcg_at_10
        )?;
    }

    writeln!(out, "\n## Latency Benchmark (ms)\n")?;
    writeln!(out, "| Model | Mean | P95 | P99 |")?;
    writeln!(out, "|------|------|-----|-----|")?;
    for r in &results.models {
        let l = &r.latency;
        writeln!(
            out,
            "| {} | {:.2} | {:.2} | {:.2} |",
            r.model, l.mean_ms, l.p95_ms, l.p99_ms
        )?;
    }

    writeln!(out, "\n## Cost Analysis\n")?;
    writeln!(out, "| Model | Cost / 1M Tokens | Notes |")?;
    writeln!(out, "|------|------------------|-------|")?;
    for r in &results.models {
        writeln!(
            out,
            "| {} | ${:.2} | {} |",
            r.model, r.cost.cost_per_1m_tokens, r.cost.note
        )?;
    }

    if !charts.is_empty() {
        writeln!(out, "\n## Charts\n")?;
        for chart in charts {
            writeln!(out, "![{}]({})\n", chart.title, chart.file_name)?;
        }
    } else {
        writeln!(out)?;
    }

    writeln!(out, "{}", DECISION_MATRIX)?;
    write!(out, "{}", REPRODUCIBILITY)?;

    Ok(())
}

/// Render charts (when enabled) and write the report into `output_dir`.
///
/// Returns the path of the written report.
pub fn write_report(
    results: &BenchmarkResults,
    output_dir: &Path,
    with_charts: bool,
) -> Result<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| BenchError::io(output_dir, e))?;

    let charts = if with_charts {
        render_charts(results, output_dir)?
    } else {
        Vec::new()
    };

    let path = output_dir.join(REPORT_FILENAME);

    let file = File::create(&path).map_err(|e| BenchError::io(&path, e))?;
    let mut writer = BufWriter::new(file);
    render_markdown(&mut writer, results, &charts).map_err(|e| BenchError::io(&path, e))?;
    writer.flush().map_err(|e| BenchError::io(&path, e))?;

    info!(report = %path.display(), charts = charts.len(), "Report written");
    Ok(path)
}
