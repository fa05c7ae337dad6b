use std::time::Duration;

use thiserror::Error;

/// Main error type for the planner service
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),

    #[error("{stage} call timed out after {}s", .after.as_secs())]
    Timeout {
        stage: &'static str,
        after: Duration,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Whether a caller could reasonably try again. Nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            PlannerError::Service { status, .. } => *status == 429 || *status >= 500,
            PlannerError::Network(_) => true,
            PlannerError::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Service { .. } => "SERVICE_ERROR",
            PlannerError::Network(_) => "NETWORK_ERROR",
            PlannerError::InvalidResponse(_) => "INVALID_RESPONSE",
            PlannerError::Timeout { .. } => "TIMEOUT_ERROR",
            PlannerError::InvalidRequest(_) => "INVALID_REQUEST",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// HTTP status the server answers with for this error
    pub fn http_status(&self) -> u16 {
        match self {
            PlannerError::Config(_) => 500,
            PlannerError::Service { .. } => 502,
            PlannerError::Network(_) => 502,
            PlannerError::InvalidResponse(_) => 502,
            PlannerError::Timeout { .. } => 504,
            PlannerError::InvalidRequest(_) => 422,
            PlannerError::Validation(_) => 500,
        }
    }

    /// Convert to the error body returned by the HTTP surface
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "detail": self.to_string(),
            "code": self.error_code(),
            "retryable": self.is_retryable()
        })
    }
}
