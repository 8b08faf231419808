//! Error types for the IBM adapter.

use thiserror::Error;

/// Errors from the IBM Quantum API client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IbmError {
    /// Token could not be used in an HTTP header.
    #[error("Invalid API token")]
    InvalidToken,

    /// Network-level failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API returned an error payload.
    #[error("API error{}: {message}", format_code(.code))]
    Api {
        /// Provider error code, when present.
        code: Option<String>,
        /// Provider error message.
        message: String,
    },

    /// A named backend is unknown or offline.
    #[error("Backend not available: {0}")]
    BackendUnavailable(String),

    /// No operational quantum device is currently listed.
    #[error("No operational quantum devices available")]
    NoBackendsAvailable,

    /// Unknown job ID.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// The job reached a failed terminal state.
    #[error("Job failed: {0}")]
    JobFailed(String),

    /// The job was cancelled remotely.
    #[error("Job cancelled")]
    JobCancelled,

    /// The poll loop gave up waiting.
    #[error("Timed out waiting for job {0}")]
    Timeout(String),

    /// Response body could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn format_code(code: &Option<String>) -> String {
    match code {
        Some(c) => format!(" ({c})"),
        None => String::new(),
    }
}

impl IbmError {
    /// Actionable hint for common failure classes, shown alongside the
    /// error by the CLI.
    pub fn hint(&self) -> &'static str {
        let text = self.to_string().to_lowercase();
        if text.contains("transpil") {
            "The circuit needs hardware-specific compilation for this device."
        } else if text.contains("insufficient") || text.contains("credit") {
            "Check the account balance on your provider dashboard."
        } else if text.contains("queue") || text.contains("busy") {
            "The device is congested. Try again in 30 minutes."
        } else if matches!(self, IbmError::Timeout(_)) {
            "The queue is long today. Rerun with a larger --timeout, or try later."
        } else if matches!(self, IbmError::NoBackendsAvailable) {
            "All devices are offline or in maintenance. Check the provider status page."
        } else if matches!(self, IbmError::JobFailed(_)) {
            "The device may be temporarily offline. Check the provider status page."
        } else {
            "Check your token, network connection and the provider status page."
        }
    }
}

/// Result type for IBM operations.
pub type IbmResult<T> = Result<T, IbmError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = IbmError::Api {
            code: Some("1517".to_string()),
            message: "backend busy".to_string(),
        };
        assert_eq!(err.to_string(), "API error (1517): backend busy");

        let err = IbmError::Api {
            code: None,
            message: "oops".to_string(),
        };
        assert_eq!(err.to_string(), "API error: oops");
    }

    #[test]
    fn test_hints_map_failure_classes() {
        let busy = IbmError::Api {
            code: None,
            message: "backend queue is full".to_string(),
        };
        assert!(busy.hint().contains("30 minutes"));

        let transpile = IbmError::JobFailed("transpilation failed".to_string());
        assert!(transpile.hint().contains("compilation"));

        let credits = IbmError::Api {
            code: None,
            message: "insufficient credits remaining".to_string(),
        };
        assert!(credits.hint().contains("balance"));

        assert!(IbmError::NoBackendsAvailable.hint().contains("status page"));
        assert!(IbmError::Timeout("j1".to_string()).hint().contains("--timeout"));
    }
}
