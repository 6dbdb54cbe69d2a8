use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use pagewright_schema::FormError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum PagewrightError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Invalid page name: {0}")]
    InvalidPageName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Ractor error: {0}")]
    RactorError(String),
}

impl IntoResponse for PagewrightError {
    fn into_response(self) -> Response {
        match self {
            PagewrightError::Form(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),

            PagewrightError::PageNotFound(_) | PagewrightError::InvalidPageName(_) => {
                (StatusCode::NOT_FOUND, "Page not found").into_response()
            }

            PagewrightError::IoError(_)
            | PagewrightError::DatabaseError(_)
            | PagewrightError::RactorError(_) => {
                error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.",
                )
                    .into_response()
            }
        }
    }
}
