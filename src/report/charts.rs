//! Chart generation for benchmark results.
//!
//! Grouped bar charts, one group per model:
//! 1. Retrieval quality (Recall@1/5/10, NDCG@10)
//! 2. Latency (mean, p95, p99)

use crate::benchmark::BenchmarkResults;
use crate::error::{BenchError, Result};
use plotters::prelude::*;
use plotters::style::register_font;
use std::path::Path;
use tracing::debug;

/// File name of the retrieval quality chart.
pub const QUALITY_CHART: &str = "retrieval_quality.png";

/// File name of the latency chart.
pub const LATENCY_CHART: &str = "latency.png";

const FONT_FAMILY: &str = "sans-serif";
const FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

const COLORS: &[RGBColor] = &[
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
];

/// A chart written next to the report.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    /// File name relative to the output directory.
    pub file_name: String,
}

fn chart_err(err: impl std::fmt::Display) -> BenchError {
    BenchError::Chart(err.to_string())
}

/// Make the bundled font available to the bitmap backend.
fn register_bundled_font() -> Result<()> {
    register_font(FONT_FAMILY, FontStyle::Normal, FONT)
        .map_err(|_| BenchError::Chart("bundled font could not be parsed".to_string()))
}

/// Render all charts into `output_dir`. Nothing is drawn for an empty run.
pub fn render_charts(results: &BenchmarkResults, output_dir: &Path) -> Result<Vec<Chart>> {
    if results.models.is_empty() {
        return Ok(Vec::new());
    }

    register_bundled_font()?;

    let models: Vec<String> = results.models.iter().map(|m| m.model.clone()).collect();

    let quality_series: Vec<(&str, Vec<f64>)> = ["Recall@1", "Recall@5", "Recall@10", "NDCG@10"]
        .iter()
        .enumerate()
        .map(|(i, &name)| {
            let values = results.models.iter().map(|m| m.quality.named()[i].1).collect();
            (name, values)
        })
        .collect();

    let latency_series: Vec<(&str, Vec<f64>)> = vec![
        ("Mean", results.models.iter().map(|m| m.latency.mean_ms).collect()),
        ("P95", results.models.iter().map(|m| m.latency.p95_ms).collect()),
        ("P99", results.models.iter().map(|m| m.latency.p99_ms).collect()),
    ];

    let charts = vec![
        (
            "Retrieval Quality",
            "Score",
            QUALITY_CHART,
            quality_series,
        ),
        ("Latency (ms)", "Milliseconds", LATENCY_CHART, latency_series),
    ];

    let mut rendered = Vec::with_capacity(charts.len());
    for (title, y_desc, file_name, series) in charts {
        let path = output_dir.join(file_name);
        grouped_bar_chart(&path, title, y_desc, &models, &series)?;
        debug!(chart = %path.display(), "Rendered chart");

        rendered.push(Chart {
            title: title.to_string(),
            file_name: file_name.to_string(),
        });
    }

    Ok(rendered)
}

/// Draw one bar per (group, series) pair, series side by side within a group.
fn grouped_bar_chart(
    path: &Path,
    caption: &str,
    y_desc: &str,
    groups: &[String],
    series: &[(&str, Vec<f64>)],
) -> Result<()> {
    let root = BitMapBackend::new(path, (900, 540)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let y_peak = series
        .iter()
        .flat_map(|(_, values)| values.iter().copied())
        .fold(0.0f64, f64::max);
    let y_max = if y_peak > 0.0 { y_peak * 1.15 } else { 1.0 };
    let x_max = groups.len() as f64 - 0.5;

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT_FAMILY, 24))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..x_max, 0.0f64..y_max)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(groups.len() * 2 + 1)
        .x_label_formatter(&|x| {
            let idx = x.round();
            if (x - idx).abs() < 1e-6 && idx >= 0.0 && (idx as usize) < groups.len() {
                groups[idx as usize].clone()
            } else {
                String::new()
            }
        })
        .y_desc(y_desc)
        .draw()
        .map_err(chart_err)?;

    let width = 0.8 / series.len().max(1) as f64;

    for (si, (name, values)) in series.iter().enumerate() {
        let color = COLORS[si % COLORS.len()];
        let offset = -0.4 + width * si as f64;

        chart
            .draw_series(values.iter().enumerate().map(move |(gi, &value)| {
                let x0 = gi as f64 + offset;
                Rectangle::new([(x0, 0.0), (x0 + width, value)], color.filled())
            }))
            .map_err(chart_err)?
            .label(*name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(())
}
