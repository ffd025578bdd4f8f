use axum::extract::{Path, State};
use axum::Json;
use chrono::{Datelike, Utc};
use omdb::Movie;

use crate::error::AppResult;
use crate::services::YearSpan;
use crate::state::AppState;

/// Movies released in a single year.
pub async fn get_movies_by_year(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<Json<Vec<Movie>>> {
    let fetched = state.catalog.fetch_year(year).await?;
    Ok(Json(fetched.movies))
}

/// Movies across the trailing span of years ending at the current year.
pub async fn get_movies_for_years(
    State(state): State<AppState>,
    Path(num_years): Path<i32>,
) -> AppResult<Json<Vec<Movie>>> {
    let span = YearSpan::trailing(Utc::now().year(), num_years);
    let movies = state.catalog.fetch_span(span).await?;
    Ok(Json(movies))
}
