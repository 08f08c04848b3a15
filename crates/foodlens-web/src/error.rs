//! Mapping from engine errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use foodlens_common::FoodLensError;
use serde::Serialize;
use tracing::warn;

/// Error body returned by every JSON endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError(pub FoodLensError);

impl From<FoodLensError> for ApiError {
    fn from(err: FoodLensError) -> Self {
        ApiError(err)
    }
}

/// Rejected requests are the caller's fault; store failures are ours.
pub fn status_for(err: &FoodLensError) -> StatusCode {
    match err {
        FoodLensError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        FoodLensError::Connection(_)      => StatusCode::SERVICE_UNAVAILABLE,
        FoodLensError::Query(_)           => StatusCode::BAD_GATEWAY,
        FoodLensError::Config(_) | FoodLensError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            warn!(kind = self.0.kind(), error = %self.0, "Request failed");
        }
        let body = ErrorBody { error: self.0.kind(), message: self.0.to_string() };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(status_for(&FoodLensError::invalid("empty")), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&FoodLensError::Connection("down".into())), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(status_for(&FoodLensError::Query("auth".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(status_for(&FoodLensError::Config("bad".into())), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
