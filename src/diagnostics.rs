// ABOUTME: Diagnostics accumulator for non-fatal warnings during alias operations.
// ABOUTME: Collects warnings that shouldn't fail a command but should be shown to users.

/// Collects non-fatal warnings during a command.
#[derive(Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning, auto-logging it via tracing.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!("{}", warning.message);
        self.warnings.push(warning);
    }

    /// Get all collected warnings.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Check if any warnings were collected.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn has(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

/// A non-fatal warning collected during a command.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    /// Create a rollback log write warning.
    pub fn rollback_log(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::RollbackLog,
            message: message.into(),
        }
    }

    /// Create a warning for a canary check that could not read the live alias.
    pub fn canary_check(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::CanaryCheck,
            message: message.into(),
        }
    }

    /// Create a warning for promoting without an active canary.
    pub fn no_active_canary(message: impl Into<String>) -> Self {
        Self {
            kind: WarningKind::NoActiveCanary,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during alias operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Rollback succeeded but the audit entry was not written.
    RollbackLog,
    /// Live alias read failed while checking for a canary; treated as none.
    CanaryCheck,
    /// Promote ran without a canary having been verified first.
    NoActiveCanary,
}
