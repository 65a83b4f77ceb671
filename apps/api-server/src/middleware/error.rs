//! Handler errors rendered as RFC 7807 problem bodies.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use ideaslab_core::{IdeaError, WriteError};
use ideaslab_shared::ErrorResponse;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized,
    Validation(String),
    Internal(String),
}

impl AppError {
    /// Text safe to show the client. Internal details stay in the logs.
    fn public_detail(&self) -> Option<&str> {
        match self {
            AppError::NotFound(detail)
            | AppError::BadRequest(detail)
            | AppError::Validation(detail) => Some(detail),
            AppError::Unauthorized | AppError::Internal(_) => None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Unauthorized => f.write_str("caller is not signed in"),
            AppError::Internal(detail) => write!(f, "idea store failure: {detail}"),
            other => f.write_str(other.public_detail().unwrap_or_default()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if let AppError::Internal(_) = self {
            tracing::error!(error = %self, "Request failed");
        }

        let title = status.canonical_reason().unwrap_or("Error");
        let mut body = ErrorResponse::new(status.as_u16(), title);
        if let Some(detail) = self.public_detail() {
            body = body.with_detail(detail);
        }
        HttpResponse::build(status).json(body)
    }
}

impl From<IdeaError> for AppError {
    fn from(err: IdeaError) -> Self {
        match err {
            IdeaError::Access => AppError::Unauthorized,
            IdeaError::Write(WriteError::MissingField(field)) => {
                AppError::Validation(format!("{field} is required"))
            }
            IdeaError::Write(WriteError::NoMatchingRow(id)) => {
                AppError::NotFound(format!("Idea with id {id} not found"))
            }
            IdeaError::Write(WriteError::Rejected(msg)) => {
                AppError::Internal(format!("write rejected: {msg}"))
            }
            IdeaError::Read(msg) => AppError::Internal(format!("read failed: {msg}")),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_internal_detail_is_not_exposed() {
        let err = AppError::from(IdeaError::Read("connection reset by 10.0.0.5".to_string()));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["title"], "Internal Server Error");
        assert!(body.get("detail").is_none());
    }

    #[actix_web::test]
    async fn test_missing_field_maps_to_unprocessable() {
        let err = AppError::from(IdeaError::Write(WriteError::MissingField("title")));
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], 422);
        assert_eq!(body["detail"], "title is required");
    }
}
