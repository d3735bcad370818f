use crate::dca::SolveError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Solve(#[from] SolveError),

    #[error("Unknown ticker: {0}")]
    NotFound(String),
}

// Malformed or incomplete bodies are unparsable input, not a solver outcome.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Solve(SolveError::invalid("request body", rejection.body_text()))
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Solve(SolveError::InvalidInput { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Solve(SolveError::Degenerate(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        tracing::warn!(status = status.as_u16(), "{}", self);

        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
