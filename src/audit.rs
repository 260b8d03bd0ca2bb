// ABOUTME: Append-only rollback audit log.
// ABOUTME: One line per rollback: timestamp, environment, versions, reason, and operator.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Local, SecondsFormat};

use crate::types::{Environment, Version};

/// Default file name, placed next to the executable.
pub const ROLLBACK_LOG_FILENAME: &str = "rollback.log";

/// Reason recorded when the operator gives none.
pub const DEFAULT_REASON: &str = "no reason given";

/// A single rollback event.
#[derive(Debug, Clone, PartialEq)]
pub struct RollbackLogEntry {
    pub timestamp: DateTime<FixedOffset>,
    pub env: Environment,
    pub from_version: Version,
    pub to_version: Version,
    pub reason: String,
    pub operator: String,
}

impl RollbackLogEntry {
    /// Entry stamped with the current local time.
    pub fn now(
        env: Environment,
        from_version: Version,
        to_version: Version,
        reason: &str,
        operator: &str,
    ) -> Self {
        Self {
            timestamp: Local::now().fixed_offset(),
            env,
            from_version,
            to_version,
            reason: reason.to_string(),
            operator: operator.to_string(),
        }
    }

    /// `[RFC3339] ENV=.. FROM_VERSION=.. TO_VERSION=.. REASON=".." OPERATOR=..`
    pub fn format_line(&self) -> String {
        format!(
            "[{}] ENV={} FROM_VERSION={} TO_VERSION={} REASON=\"{}\" OPERATOR={}",
            self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
            self.env,
            self.from_version,
            self.to_version,
            escape_field(&self.reason),
            escape_field(&self.operator)
        )
    }
}

/// Keep a free-text field on one line and inside its quotes.
fn escape_field(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c if c.is_control() => escaped.extend(c.escape_default()),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Rollback log file. Entries are only ever appended.
#[derive(Debug, Clone)]
pub struct RollbackLog {
    path: PathBuf,
}

impl RollbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log in the executable's directory, or the current directory if that
    /// cannot be determined.
    pub fn beside_executable() -> Self {
        let dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| {
                tracing::warn!("cannot locate executable, writing rollback log to current directory");
                PathBuf::from(".")
            });
        Self::new(dir.join(ROLLBACK_LOG_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, entry: &RollbackLogEntry) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", entry.format_line())
    }
}

/// Operator identity from `$USER`, or `unknown`.
pub fn operator_from_env() -> String {
    std::env::var("USER")
        .ok()
        .filter(|user| !user.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
