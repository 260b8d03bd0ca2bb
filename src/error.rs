// ABOUTME: Application-wide error types for lad.
// ABOUTME: Uses thiserror; maps every failure to one process exit code at the boundary.

use std::path::PathBuf;
use thiserror::Error;

use crate::alias::AliasError;
use crate::classify::ServiceErrorKind;

/// Process exit codes consumed by calling scripts and pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitCode {
    Success = 0,
    InvalidInput = 1,
    ServiceError = 2,
    ResourceNotFound = 3,
    NetworkError = 4,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Error taxonomy surfaced to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    PreconditionViolation,
    ServiceNetwork,
    ServiceNotFound,
    ServiceGeneric,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    Precondition(String),

    #[error(transparent)]
    Alias(#[from] AliasError),

    #[error("{step} failed: {message}")]
    Build { step: String, message: String },

    #[error("cannot read {path}: {message}")]
    ConfigRead { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Error::Precondition(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidInput(_) | Error::ConfigRead { .. } => ErrorKind::InvalidInput,
            Error::Precondition(_) => ErrorKind::PreconditionViolation,
            Error::Alias(e) => match e.kind() {
                ServiceErrorKind::Network => ErrorKind::ServiceNetwork,
                ServiceErrorKind::NotFound => ErrorKind::ServiceNotFound,
                ServiceErrorKind::Generic => ErrorKind::ServiceGeneric,
            },
            Error::Build { .. } | Error::Io(_) => ErrorKind::ServiceGeneric,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self.kind() {
            ErrorKind::InvalidInput | ErrorKind::PreconditionViolation => ExitCode::InvalidInput,
            ErrorKind::ServiceGeneric => ExitCode::ServiceError,
            ErrorKind::ServiceNotFound => ExitCode::ResourceNotFound,
            ErrorKind::ServiceNetwork => ExitCode::NetworkError,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
