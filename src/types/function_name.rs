// ABOUTME: Validated Lambda function identifier.
// ABOUTME: Accepts plain names, partial ARNs, and full ARNs.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FunctionNameError {
    #[error("function name cannot be empty")]
    Empty,

    #[error("function name exceeds maximum length of 140 characters")]
    TooLong,

    #[error("invalid character in function name: '{0}'")]
    InvalidChar(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionName(String);

impl FunctionName {
    pub fn new(value: &str) -> Result<Self, FunctionNameError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FunctionNameError::Empty);
        }

        if trimmed.len() > 140 {
            return Err(FunctionNameError::TooLong);
        }

        // ARNs add ':' to the name character set
        for c in trimmed.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' && c != ':' {
                return Err(FunctionNameError::InvalidChar(c));
            }
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Function name derived from a SAM stack: `<stack>-function-default`.
    pub fn for_stack(stack_name: &str) -> Result<Self, FunctionNameError> {
        Self::new(&format!("{}-function-default", stack_name.trim()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FunctionName {
    type Err = FunctionNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
