//! Error types for compliance checks

use thiserror::Error;

use crate::wire::UNREACHABLE_MESSAGE;

/// Why a compliance check produced no report.
///
/// `Display` is the message shown to the user; each variant maps to
/// exactly one line of text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    #[error("URL must not be empty")]
    EmptyUrl,

    /// No response at all: connection refused, DNS failure, reset
    #[error("{}", UNREACHABLE_MESSAGE)]
    Unreachable,

    /// The service answered with a non-success status. `message` is the
    /// service's `detail.message` or the generic fallback.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// A success status whose body is not a JSON report
    #[error("Invalid response from compliance checker: {0}")]
    MalformedResponse(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl CheckError {
    /// Text displayed in place of a report
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// HTTP status for service errors
    pub fn status(&self) -> Option<u16> {
        match self {
            CheckError::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid service endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
