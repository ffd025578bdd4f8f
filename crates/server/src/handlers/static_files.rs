use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Serve a generated chart image from the static directory.
///
/// Only bare file names are accepted; anything that looks like a path is
/// rejected before touching the filesystem.
pub async fn get_static_file(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> AppResult<impl IntoResponse> {
    if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
        return Err(AppError::BadRequest(format!(
            "invalid file name: {}",
            file_name
        )));
    }

    let path = state.config.static_dir.join(&file_name);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound(file_name.clone()))?;

    let content_type = if file_name.ends_with(".png") {
        "image/png"
    } else {
        "application/octet-stream"
    };

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        bytes,
    ))
}
