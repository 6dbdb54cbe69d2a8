//! Serves published pages at `/{path}` from the theme directory.

use crate::server::router::PagewrightState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use pagewright_schema::is_valid_page_name;
use std::io::ErrorKind;
use tracing::error;

/// GET /{path}
///
/// Only pages present in the registry at the last reload are served.
pub async fn serve_page(
    State(state): State<PagewrightState>,
    Path(path): Path<String>,
) -> Response {
    if !is_valid_page_name(&path) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let Some(template_file) = state.registry.resolve(&path).await else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.pages.theme().read(&template_file).await {
        Ok(content) => Html(content).into_response(),
        Err(e) if e.kind() == ErrorKind::NotFound => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!(page = %path, error = %e, "failed to read published page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
