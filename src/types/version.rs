// ABOUTME: Opaque function version identifier assigned by the provider.
// ABOUTME: Versions are immutable; only publishing creates new ones.

use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("version cannot be empty")]
    Empty,

    #[error("version cannot contain whitespace")]
    Whitespace,
}

/// A published, immutable snapshot of a function.
///
/// The value is whatever the provider assigned (`"3"`, `"42"`, `"$LATEST"`).
/// Equality is plain string equality, which is how alias comparisons are made.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(value: &str) -> Result<Self, VersionError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(VersionError::Whitespace);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}
