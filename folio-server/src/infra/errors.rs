use std::collections::BTreeMap;
use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use folio_core::{SiteError, domain::theme::ThemeError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
    /// Per-field validation messages, rendered under `error.details`.
    pub details: Option<BTreeMap<String, Vec<String>>>,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn validation(
        message: impl Into<String>,
        details: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: message.into(),
            details: Some(details),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut error = json!({
            "message": self.message,
            "status": self.status.as_u16(),
        });
        if let Some(details) = self.details {
            error["details"] = json!(details);
        }

        (self.status, Json(json!({ "error": error }))).into_response()
    }
}

impl From<ThemeError> for AppError {
    fn from(err: ThemeError) -> Self {
        match &err {
            ThemeError::Validation(_) => {
                Self::validation("Invalid theme selection", err.field_errors())
            }
            ThemeError::MissingPalette(name) => {
                tracing::error!(theme = %name, "theme registry is missing a palette");
                Self::internal(err.to_string())
            }
            ThemeError::Storage(_) => Self::internal(err.to_string()),
        }
    }
}

impl From<SiteError> for AppError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::NotFound(msg) => Self::not_found(msg),
            SiteError::Unavailable(msg) => Self::service_unavailable(msg),
            SiteError::Internal(msg) => Self::internal(msg),
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal(err.to_string())
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!(error = ?err, "database operation failed");
        Self::internal("Database operation failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use folio_core::domain::theme::UnknownThemeName;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn validation_errors_carry_field_details() {
        let err = AppError::from(ThemeError::from(UnknownThemeName::new("x")));
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["status"], 422);
        assert!(body["error"]["details"]["theme"][0].is_string());
    }

    #[tokio::test]
    async fn storage_errors_are_internal_with_readable_message() {
        let err = AppError::from(ThemeError::Storage(SiteError::Unavailable(
            "connection refused".into(),
        )));
        let (status, body) = body_json(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            body["error"]["message"]
                .as_str()
                .unwrap()
                .contains("connection refused")
        );
        assert!(body["error"].get("details").is_none());
    }
}
