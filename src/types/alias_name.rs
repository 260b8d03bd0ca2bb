// ABOUTME: The fixed set of aliases managed per function.
// ABOUTME: live serves traffic, latest tracks the newest publish, previous is the rollback target.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AliasName {
    /// Serves production traffic; the only alias that ever carries routing.
    Live,
    /// Last known-good version, the rollback target.
    Previous,
    /// Most recently published version.
    Latest,
}

impl AliasName {
    pub fn as_str(&self) -> &'static str {
        match self {
            AliasName::Live => "live",
            AliasName::Previous => "previous",
            AliasName::Latest => "latest",
        }
    }
}

impl fmt::Display for AliasName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
