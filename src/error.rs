//! Error types shared across the crate

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("question {id} not found")]
    QuestionNotFound { id: i64 },

    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::QuestionNotFound { .. } => StatusCode::NOT_FOUND,
            Error::InvalidField(_) | Error::Validation(_) | Error::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Database(_) | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures are logged with full detail but surfaced
        // with a generic message.
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
