// ABOUTME: Alias service error types with SNAFU pattern.
// ABOUTME: Failure kind is derived from the provider's message by the classifier.

use snafu::Snafu;

use crate::classify::{ServiceErrorKind, classify_message};

/// Error returned by an alias service call.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum AliasError {
    #[snafu(display("{operation} failed: {message}"))]
    Request {
        operation: &'static str,
        message: String,
    },

    #[snafu(display("{operation} response is missing {field}"))]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },

    #[snafu(display("{operation} response has invalid {field}: {message}"))]
    InvalidField {
        operation: &'static str,
        field: &'static str,
        message: String,
    },
}

impl AliasError {
    pub fn request(operation: &'static str, message: impl Into<String>) -> Self {
        AliasError::Request {
            operation,
            message: message.into(),
        }
    }

    /// Returns the failure kind for exit code selection.
    pub fn kind(&self) -> ServiceErrorKind {
        match self {
            AliasError::Request { message, .. } => classify_message(message),
            AliasError::MissingField { .. } | AliasError::InvalidField { .. } => {
                ServiceErrorKind::Generic
            }
        }
    }

    /// Whether the service reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ServiceErrorKind::NotFound
    }
}
