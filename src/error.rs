use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Forbidden")]
    Forbidden,

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("{0}")]
    Conflict(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Mail relay error: {0}")]
    Mail(#[from] lettre::transport::smtp::Error),

    #[error("Mail relay not configured")]
    MailNotConfigured,

    #[error("Internal Server Error")]
    Anyhow(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("database error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong".to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            AppError::DuplicateEmail => (
                StatusCode::CONFLICT,
                "An account with this email already exists".to_string(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.to_string()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Mail(ref e) => {
                tracing::error!("mail relay error: {e:?}");
                (StatusCode::BAD_GATEWAY, "Failed to send message".to_string())
            }
            AppError::MailNotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Mail relay not configured".to_string(),
            ),
            AppError::Anyhow(ref e) => {
                tracing::error!("system error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl AppError {
    /// Maps a unique-constraint violation to the given error, leaving
    /// everything else as a database error.
    pub fn on_unique_violation(err: sqlx::Error, mapped: AppError) -> AppError {
        if err
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation())
        {
            mapped
        } else {
            AppError::Database(err)
        }
    }
}
