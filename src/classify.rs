// ABOUTME: Maps alias-service error messages to failure kinds.
// ABOUTME: Keyword matching, network first, then resource-not-found, else generic.

use std::fmt;

/// Failure kind of an alias-service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceErrorKind {
    /// Credentials, connectivity, or timeouts.
    Network,
    /// The function, alias, or version does not exist.
    NotFound,
    /// Anything else the service rejected.
    Generic,
}

/// Classification of an optional error, where no error means success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Success,
    Failure(ServiceErrorKind),
}

const NETWORK_KEYWORDS: &[&str] = &[
    "unable to locate credentials",
    "could not connect",
    "connection refused",
    "network",
    "timeout",
    "timed out",
    "unreachable",
];

const NOT_FOUND_KEYWORDS: &[&str] = &[
    "resourcenotfoundexception",
    "does not exist",
    "not found",
    "cannot find",
];

/// Classify an error message. Total: every string maps to exactly one kind.
pub fn classify_message(message: &str) -> ServiceErrorKind {
    let message = message.to_lowercase();

    if NETWORK_KEYWORDS.iter().any(|k| message.contains(k)) {
        ServiceErrorKind::Network
    } else if NOT_FOUND_KEYWORDS.iter().any(|k| message.contains(k)) {
        ServiceErrorKind::NotFound
    } else {
        ServiceErrorKind::Generic
    }
}

/// Classify an optional error by its rendered message.
pub fn classify<E: fmt::Display + ?Sized>(error: Option<&E>) -> Classification {
    match error {
        None => Classification::Success,
        Some(e) => Classification::Failure(classify_message(&e.to_string())),
    }
}
