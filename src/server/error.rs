use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::quiz::QuizError;

pub type ApiResponse<T> = Result<T, ApiError>;

/// Every failure a route can report. The client only ever sees the status code and its
/// canonical message; details are logged.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad Request")]
    BadRequest(String),
    #[error("Resource Not Found")]
    NotFound,
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    #[error("Unprocessable Entity")]
    Unprocessable(String),
    #[error("Internal Server Error")]
    Database(#[from] sqlx::Error),
    #[error("Internal Server Error")]
    Metrics(#[from] prometheus::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: u16,
    message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Database(_) | ApiError::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(error) => tracing::error!("Database error: {error}"),
            ApiError::Metrics(error) => tracing::error!("Metrics error: {error}"),
            ApiError::BadRequest(reason) | ApiError::Unprocessable(reason) => {
                tracing::info!("Rejected request: {reason}")
            }
            ApiError::NotFound | ApiError::MethodNotAllowed => {}
        }
        let status = self.status();
        let body = ErrorBody {
            success: false,
            error: status.as_u16(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        // axum reports well-formed JSON of the wrong shape as 422
        match rejection.status() {
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::Unprocessable(rejection.body_text()),
            _ => ApiError::BadRequest(rejection.body_text()),
        }
    }
}

// `/questions/abc` names no resource
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::NotFound
    }
}

impl From<QuizError> for ApiError {
    fn from(error: QuizError) -> Self {
        match error {
            QuizError::UnknownCategory(_) | QuizError::Exhausted => ApiError::NotFound,
            QuizError::Database(error) => ApiError::Database(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    use super::*;

    async fn body_of(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_body() {
        let (status, body) = body_of(ApiError::NotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"success": false, "error": 404, "message": "Resource Not Found"})
        );
    }

    #[tokio::test]
    async fn database_errors_hide_details() {
        let (status, body) = body_of(ApiError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
        assert_eq!(body["error"], 500);
    }

    #[tokio::test]
    async fn unprocessable_body() {
        let (status, body) = body_of(ApiError::Unprocessable("answer".to_owned())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["message"], "Unprocessable Entity");
    }

    #[test]
    fn quiz_errors_map_to_not_found() {
        assert!(matches!(
            ApiError::from(QuizError::Exhausted),
            ApiError::NotFound
        ));
        assert!(matches!(
            ApiError::from(QuizError::UnknownCategory(3)),
            ApiError::NotFound
        ));
    }
}
