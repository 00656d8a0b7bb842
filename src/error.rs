use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum PortalError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Invalid cookie secret: {0}")]
    InvalidCookieKey(String),

    #[error("Config error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl From<argon2::password_hash::Error> for PortalError {
    fn from(e: argon2::password_hash::Error) -> Self {
        PortalError::PasswordHash(e.to_string())
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_body) = match self {
            PortalError::Reqwest(_) | PortalError::UrlParse(_) => (
                StatusCode::BAD_GATEWAY,
                ApiErrorBody {
                    code: "BAD_GATEWAY".to_string(),
                    message: "Upstream service is unavailable.".to_string(),
                },
            ),
            PortalError::Json(_) => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".to_string(),
                    message: "Malformed JSON payload.".to_string(),
                },
            ),
            PortalError::Database(_)
            | PortalError::PasswordHash(_)
            | PortalError::InvalidCookieKey(_)
            | PortalError::Config(_)
            | PortalError::TaskJoin(_)
            | PortalError::Unexpected(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                },
            ),
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn database_errors_are_masked_as_internal() {
        let resp = PortalError::Database(SqlxError::RowNotFound).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = std::str::from_utf8(&body).unwrap();
        assert!(body.contains(r#""code":"INTERNAL_ERROR""#));
        assert!(!body.contains("RowNotFound"));
    }
}
