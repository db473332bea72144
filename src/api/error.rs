use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Typed failure surface of the HTTP layer, mapped to a status code and JSON
/// body exactly once, in the `IntoResponse` impl below. Client-caused failures
/// (`Validation`, `NotFound`) stay in the 4xx range; store failures map to 500
/// instead of being reported as the caller's fault.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input or a business-rule violation (already exists,
    /// not found on mutate).
    #[error("{0}")]
    Validation(String),
    /// A search yielded nothing.
    #[error("Not Found")]
    NotFound,
    /// Endpoint is declared but not supported by this server.
    #[error("not implemented")]
    NotImplemented,
    /// A store call failed; the underlying error is logged, not leaked.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Error body shape for 4xx/5xx responses carrying a code.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Generic body shape for 404 responses.
#[derive(Debug, Serialize)]
pub struct NotFoundResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(message) => {
                log::info!("\tError - 400 - Bad Request: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        code: "ERR000".to_string(),
                        message,
                    }),
                )
                    .into_response()
            }
            ApiError::NotFound => {
                log::info!("\tError - 404 - Not Found");
                (
                    StatusCode::NOT_FOUND,
                    Json(NotFoundResponse {
                        message: "Not Found".to_string(),
                    }),
                )
                    .into_response()
            }
            ApiError::NotImplemented => StatusCode::NOT_IMPLEMENTED.into_response(),
            ApiError::Store(err) => {
                log::error!("store failure: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        code: "ERR500".to_string(),
                        message: "internal storage error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::Validation("already exists".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (ApiError::NotFound, StatusCode::NOT_FOUND),
            (ApiError::NotImplemented, StatusCode::NOT_IMPLEMENTED),
            (
                ApiError::Store(anyhow::anyhow!("connection refused")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_store_errors_convert_with_question_mark() {
        fn failing() -> ApiResult<()> {
            Err(anyhow::anyhow!("boom"))?;
            Ok(())
        }
        assert!(matches!(failing(), Err(ApiError::Store(_))));
    }
}
