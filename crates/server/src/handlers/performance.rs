use axum::extract::{Path, State};
use axum::Json;
use chrono::{Datelike, Utc};
use serde::Serialize;

use crate::error::AppResult;
use crate::services::{ServiceLabel, YearSpan};
use crate::state::AppState;

/// Aggregate count and fetch duration for a single year.
#[derive(Debug, Serialize)]
pub struct FetchPerformance {
    pub movie_count: usize,
    pub time_taken: String,
}

/// Location of a rendered performance chart.
#[derive(Debug, Serialize)]
pub struct PerformancePlot {
    pub plot_url: String,
}

pub async fn get_fetch_performance(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<Json<FetchPerformance>> {
    let fetched = state.catalog.fetch_year(year).await?;
    Ok(Json(FetchPerformance {
        movie_count: fetched.movies.len(),
        time_taken: format!("{:.2} seconds", fetched.elapsed.as_secs_f64()),
    }))
}

/// Sample fetch performance across the trailing span of years and render
/// the chart for the REST surface.
pub async fn get_performance_plot(
    State(state): State<AppState>,
    Path(num_years): Path<i32>,
) -> AppResult<Json<PerformancePlot>> {
    let span = YearSpan::trailing(Utc::now().year(), num_years);
    let samples = state.catalog.sample_span(span).await?;
    state.charts.render(&samples, ServiceLabel::Rest).await?;
    Ok(Json(PerformancePlot {
        plot_url: state.charts.chart_url(ServiceLabel::Rest),
    }))
}
