//! Error types for the bridge.

pub mod unified;

pub use unified::{ErrorCategory, RecoverySuggestion};

use thiserror::Error;

/// Primary error type for all bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Poe API request failed ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Tool execution error: {tool_name} - {message}")]
    ToolExecution { tool_name: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Maximum tool call iterations reached ({limit})")]
    IterationLimitExceeded { limit: usize },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Poe API execution failed: {0}")]
    Execution(#[source] Box<BridgeError>),
}

impl BridgeError {
    /// Create an API error from a non-success status and its raw body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a tool execution error.
    pub fn tool(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool_name: tool_name.into(),
            message: message.into(),
        }
    }

    /// Classify this error into a category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Authentication,
            Self::Network(e) if e.is_timeout() => ErrorCategory::Timeout,
            Self::Network(_) => ErrorCategory::Network,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Serialization(_) | Self::MalformedResponse(_) => ErrorCategory::Serialization,
            Self::Api { status, .. } => match status {
                401 | 403 => ErrorCategory::Authentication,
                429 => ErrorCategory::RateLimit,
                500..=599 => ErrorCategory::Server,
                _ => ErrorCategory::Api,
            },
            Self::ToolExecution { .. } | Self::InvalidArgument(_) => ErrorCategory::ToolExecution,
            Self::IterationLimitExceeded { .. } => ErrorCategory::IterationLimit,
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::Io(_) => ErrorCategory::Unknown,
            Self::Execution(inner) => inner.category(),
        }
    }

    /// Wrap a failure of a high-level prompt execution.
    pub fn execution(inner: BridgeError) -> Self {
        match inner {
            already @ Self::Execution(_) => already,
            other => Self::Execution(Box::new(other)),
        }
    }

    /// Whether this error came from the remote completion transport.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Execution(inner) => inner.is_transport(),
            other => matches!(
                other,
                Self::Api { .. } | Self::Network(_) | Self::MalformedResponse(_) | Self::Authentication(_)
            ),
        }
    }

    /// Whether this error is potentially retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::RateLimit
                | ErrorCategory::Network
                | ErrorCategory::Timeout
                | ErrorCategory::Server
        )
    }

    /// Suggest recovery actions.
    pub fn recovery_suggestion(&self) -> RecoverySuggestion {
        match self.category() {
            ErrorCategory::Authentication => RecoverySuggestion::CheckCredentials,
            ErrorCategory::RateLimit | ErrorCategory::Network | ErrorCategory::Server => {
                RecoverySuggestion::RetryWithBackoff
            }
            ErrorCategory::Timeout => RecoverySuggestion::IncreaseTimeout,
            ErrorCategory::Configuration => RecoverySuggestion::CheckConfiguration,
            ErrorCategory::ToolExecution => RecoverySuggestion::CheckToolImplementation,
            ErrorCategory::IterationLimit => RecoverySuggestion::SimplifyRequest,
            ErrorCategory::Cancelled => RecoverySuggestion::None,
            _ => RecoverySuggestion::ContactSupport,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_status_maps_to_category() {
        assert_eq!(BridgeError::api(401, "").category(), ErrorCategory::Authentication);
        assert_eq!(BridgeError::api(429, "").category(), ErrorCategory::RateLimit);
        assert_eq!(BridgeError::api(503, "").category(), ErrorCategory::Server);
        assert_eq!(BridgeError::api(400, "").category(), ErrorCategory::Api);
    }

    #[test]
    fn only_transient_failures_are_retryable() {
        assert!(BridgeError::api(500, "boom").is_retryable());
        assert!(BridgeError::api(429, "slow down").is_retryable());
        assert!(!BridgeError::api(400, "bad").is_retryable());
        assert!(!BridgeError::Cancelled.is_retryable());
        assert!(!BridgeError::IterationLimitExceeded { limit: 100 }.is_retryable());
    }

    #[test]
    fn cancellation_is_not_a_transport_failure() {
        assert!(!BridgeError::Cancelled.is_transport());
        assert!(BridgeError::api(502, "gateway").is_transport());
        assert!(BridgeError::MalformedResponse("no choices".into()).is_transport());
    }

    #[test]
    fn execution_wrapper_keeps_inner_category() {
        let err = BridgeError::execution(BridgeError::api(429, "slow down"));
        assert_eq!(err.to_string(), "Poe API execution failed: Poe API request failed (429): slow down");
        assert_eq!(err.category(), ErrorCategory::RateLimit);
        assert!(err.is_transport());

        let twice = BridgeError::execution(err);
        assert!(matches!(twice, BridgeError::Execution(ref inner) if !matches!(**inner, BridgeError::Execution(_))));
    }

    #[test]
    fn api_error_message_keeps_status_and_body() {
        let err = BridgeError::api(404, "{\"error\":\"unknown model\"}");
        assert_eq!(
            err.to_string(),
            "Poe API request failed (404): {\"error\":\"unknown model\"}"
        );
    }
}
