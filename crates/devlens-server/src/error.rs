use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// HTTP-facing error with the taxonomy-to-status mapping in one place:
/// malformed input 400, security boundary 403, absent things 404,
/// unexpected I/O 500. Bodies are structured JSON, never raw failures.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Forbidden(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg) => msg,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.message(), "request failed");
        }
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}

impl From<devlens_trace::Error> for ApiError {
    fn from(err: devlens_trace::Error) -> Self {
        match err {
            devlens_trace::Error::InvalidRequest(_) => ApiError::BadRequest(err.to_string()),
            devlens_trace::Error::NotFound(_) => ApiError::NotFound(err.to_string()),
            devlens_trace::Error::AccessDenied(_) => ApiError::Forbidden(err.to_string()),
            devlens_trace::Error::Read(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<devlens_index::Error> for ApiError {
    fn from(err: devlens_index::Error) -> Self {
        match err {
            devlens_index::Error::TableNotFound(_) => ApiError::NotFound(err.to_string()),
            devlens_index::Error::Storage(_) | devlens_index::Error::Io(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_errors_map_to_documented_statuses() {
        let cases = [
            (
                ApiError::from(devlens_trace::Error::InvalidRequest("x".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(devlens_trace::Error::NotFound("/x".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(devlens_trace::Error::AccessDenied("/x".into())),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::from(devlens_trace::Error::Read(std::io::Error::other("x"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected);
        }
    }

    #[test]
    fn test_index_errors_map_to_documented_statuses() {
        let not_found = ApiError::from(devlens_index::Error::TableNotFound("users".into()));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
    }
}
