use thiserror::Error;

/// Error taxonomy shared by the evidence store adapter and the scoring engine.
#[derive(Debug, Error)]
pub enum FoodLensError {
    /// Malformed or empty caller input. Never retried.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The evidence store could not be reached (or did not answer in time).
    #[error("Evidence store unreachable: {0}")]
    Connection(String),

    /// The evidence store rejected the request.
    #[error("Evidence store rejected query: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FoodLensError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        FoodLensError::InvalidArgument(msg.into())
    }

    /// Stable label used in logs and API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            FoodLensError::InvalidArgument(_) => "invalid_argument",
            FoodLensError::Connection(_)      => "connection_error",
            FoodLensError::Query(_)           => "query_error",
            FoodLensError::Config(_)          => "config_error",
            FoodLensError::Other(_)           => "internal_error",
        }
    }

    /// Whether a caller may reasonably retry the same request later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FoodLensError::Connection(_))
    }

    /// Store failures are shown as a degraded result rather than a rejected request.
    pub fn is_store_failure(&self) -> bool {
        matches!(self, FoodLensError::Connection(_) | FoodLensError::Query(_))
    }
}

pub type Result<T> = std::result::Result<T, FoodLensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_connection_errors_are_retryable() {
        assert!(FoodLensError::Connection("down".into()).is_retryable());
        assert!(!FoodLensError::Query("bad auth".into()).is_retryable());
        assert!(!FoodLensError::invalid("empty").is_retryable());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(FoodLensError::invalid("x").kind(), "invalid_argument");
        assert_eq!(FoodLensError::Query("x".into()).kind(), "query_error");
        let other: FoodLensError = anyhow::anyhow!("boom").into();
        assert_eq!(other.kind(), "internal_error");
        assert!(!other.is_store_failure());
    }
}
