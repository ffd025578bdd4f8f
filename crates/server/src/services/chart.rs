//! Dual-axis performance chart rendering.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog::PerformanceSample;

const CHART_SIZE: (u32, u32) = (960, 540);

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("No performance samples to plot")]
    Empty,

    #[error("Failed to create chart directory '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Chart drawing failed: {0}")]
    Drawing(String),

    #[error("Chart drawing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Which query surface requested the chart; used only for output naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceLabel {
    Rest,
    Graphql,
}

impl ServiceLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Graphql => "graphql",
        }
    }

    fn caption_word(&self) -> &'static str {
        match self {
            Self::Rest => "Rest",
            Self::Graphql => "Graphql",
        }
    }
}

impl std::fmt::Display for ServiceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renders performance samples into a PNG under the static directory.
///
/// Each label has exactly one output path; a new render overwrites the
/// previous chart for that label. Concurrent renders for the same label race
/// last-writer-wins; there is no lock on the output file.
pub struct ChartService {
    static_dir: PathBuf,
}

impl ChartService {
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
        }
    }

    /// Filesystem path the chart for `label` is written to.
    pub fn chart_path(&self, label: ServiceLabel) -> PathBuf {
        self.static_dir
            .join(format!("{}_movies_performance.png", label.as_str()))
    }

    /// Public URL path the chart for `label` is served under.
    pub fn chart_url(&self, label: ServiceLabel) -> String {
        format!("/static/{}_movies_performance.png", label.as_str())
    }

    /// Draw movie count (left axis) and fetch duration (right axis) over the
    /// sampled years and persist the figure.
    pub async fn render(
        &self,
        samples: &[PerformanceSample],
        label: ServiceLabel,
    ) -> Result<PathBuf, ChartError> {
        if samples.is_empty() {
            return Err(ChartError::Empty);
        }

        let path = self.chart_path(label);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| ChartError::Io {
                    path: parent.display().to_string(),
                    source,
                })?;
        }

        let out = path.clone();
        let caption = format!("{} API Performance for each Year", label.caption_word());
        let samples = samples.to_vec();

        // plotters is synchronous; keep it off the async workers.
        tokio::task::spawn_blocking(move || draw_chart(&out, &caption, &samples)).await??;

        tracing::info!("Rendered {} performance chart to {}", label, path.display());
        Ok(path)
    }
}

fn draw_chart(path: &Path, caption: &str, samples: &[PerformanceSample]) -> Result<(), ChartError> {
    let result = (|| -> Result<(), Box<dyn std::error::Error>> {
        let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)?;

        // Samples arrive in ascending year order from the sampler.
        let x_min = samples[0].year;
        let x_max = samples[samples.len() - 1].year + 1;
        let max_count = samples.iter().map(|s| s.count).max().unwrap_or(0) as i32;
        let max_time = samples.iter().map(|s| s.time_taken).fold(0.0_f64, f64::max);

        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .right_y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0..max_count + (max_count / 10).max(1))?
            .set_secondary_coord(x_min..x_max, 0.0..(max_time * 1.1).max(0.1));

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Movie Count")
            .x_labels(samples.len())
            .x_label_formatter(&|year| year.to_string())
            .draw()?;

        chart
            .configure_secondary_axes()
            .y_desc("Time Taken (seconds)")
            .draw()?;

        chart
            .draw_series(LineSeries::new(
                samples.iter().map(|s| (s.year, s.count as i32)),
                BLUE.stroke_width(2),
            ))?
            .label("Movie Count")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BLUE.stroke_width(2)));
        chart.draw_series(
            samples
                .iter()
                .map(|s| Circle::new((s.year, s.count as i32), 3, BLUE.filled())),
        )?;

        chart
            .draw_secondary_series(LineSeries::new(
                samples.iter().map(|s| (s.year, s.time_taken)),
                RED.stroke_width(2),
            ))?
            .label("Time Taken")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], RED.stroke_width(2)));
        chart.draw_secondary_series(
            samples
                .iter()
                .map(|s| Circle::new((s.year, s.time_taken), 3, RED.filled())),
        )?;

        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    })();

    result.map_err(|e| ChartError::Drawing(e.to_string()))
}
