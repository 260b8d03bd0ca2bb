// ABOUTME: Alias transitions for deploy, canary, promote, rollback, switch, and status.
// ABOUTME: Every operation re-reads alias state from the service before deciding what to write.

use crate::alias::{AliasError, AliasService, AliasState};
use crate::audit::{DEFAULT_REASON, RollbackLog, RollbackLogEntry};
use crate::diagnostics::{Diagnostics, Warning};
use crate::error::{Error, Result};
use crate::types::{AliasName, Environment, FunctionName, Routing, Version, Weight};

use super::build::BuildRunner;
use super::state::StatusReport;

/// Result of publishing a new version.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployOutcome {
    pub version: Version,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CanaryOutcome {
    /// Routing written: `weight` of traffic on `canary`, the rest on `primary`.
    Applied {
        primary: Version,
        canary: Version,
        weight: Weight,
    },
    /// Routing cleared; all traffic on `version`.
    Cleared { version: Version },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromoteOutcome {
    Promoted { previous: Version, live: Version },
    /// `live` already equals `latest`.
    NothingToPromote { version: Version },
}

#[derive(Debug, Clone, PartialEq)]
pub enum RollbackOutcome {
    RolledBack {
        from: Version,
        to: Version,
        /// Entry that was (or failed to be) appended to the audit log.
        entry: RollbackLogEntry,
        logged: bool,
    },
    /// `live` already equals `previous`.
    NothingToRollBack { version: Version },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchOutcome {
    Switched { from: Version, to: Version },
    AlreadyLive { version: Version },
}

/// Who is rolling back, and why.
#[derive(Debug, Clone)]
pub struct RollbackRequest {
    pub env: Environment,
    pub reason: Option<String>,
    pub operator: String,
}

/// Drives alias transitions for one function.
///
/// Holds no state of its own: the alias service is the source of truth and
/// is read fresh on every operation, so re-running a completed operation is
/// a no-op rather than an error.
pub struct Deployer<'a, S: ?Sized> {
    service: &'a S,
    function: &'a FunctionName,
}

impl<'a, S: AliasService + ?Sized> Deployer<'a, S> {
    pub fn new(service: &'a S, function: &'a FunctionName) -> Self {
        Self { service, function }
    }

    pub fn function(&self) -> &FunctionName {
        self.function
    }

    async fn read(&self, alias: AliasName) -> std::result::Result<AliasState, AliasError> {
        let state = self.service.get_alias(self.function, alias).await?;
        tracing::debug!(
            function = %self.function,
            alias = %alias,
            version = %state.version,
            canary = ?state.routing.as_ref().map(|r| r.canary.as_str()),
            "read alias"
        );
        Ok(state)
    }

    pub(crate) async fn read_version(&self, alias: AliasName) -> Result<Version> {
        Ok(self.read(alias).await?.version)
    }

    async fn write(
        &self,
        alias: AliasName,
        primary: &Version,
        routing: Option<&Routing>,
    ) -> Result<()> {
        self.service
            .update_alias(self.function, alias, primary, routing)
            .await?;
        tracing::info!(
            function = %self.function,
            alias = %alias,
            primary = %primary,
            canary = ?routing.map(|r| r.canary.as_str()),
            weight = ?routing.map(|r| r.weight.fraction()),
            "updated alias"
        );
        Ok(())
    }

    /// Routing currently on `live`.
    ///
    /// A failed read is treated as "no canary" and recorded as a warning.
    pub async fn active_canary(&self, diag: &mut Diagnostics) -> Option<Routing> {
        match self.read(AliasName::Live).await {
            Ok(live) => live.routing,
            Err(e) => {
                diag.warn(Warning::canary_check(format!(
                    "could not read live alias while checking for a canary, assuming none: {e}"
                )));
                None
            }
        }
    }

    /// Build (unless `build` is `None`), publish a new version, and point
    /// `latest` at it. Refused while a canary is active on `live`.
    pub async fn deploy(
        &self,
        build: Option<&dyn BuildRunner>,
        description: &str,
        diag: &mut Diagnostics,
    ) -> Result<DeployOutcome> {
        if let Some(routing) = self.active_canary(diag).await {
            return Err(Error::precondition(format!(
                "canary release in progress (version {} at {}), run promote or rollback first",
                routing.canary, routing.weight
            )));
        }

        if let Some(build) = build {
            build.build().await?;
            build.deploy(description).await?;
        }

        let version = self
            .service
            .publish_version(self.function, description)
            .await?;
        tracing::info!(function = %self.function, version = %version, "published version");

        self.write(AliasName::Latest, &version, None).await?;

        Ok(DeployOutcome {
            version,
            description: description.to_string(),
        })
    }

    /// Route `weight` of `live` traffic to `latest`'s version.
    ///
    /// A zero weight clears routing and is allowed even when `live == latest`.
    pub async fn canary(&self, weight: Weight) -> Result<CanaryOutcome> {
        let live = self.read_version(AliasName::Live).await?;

        if weight.is_zero() {
            self.write(AliasName::Live, &live, None).await?;
            return Ok(CanaryOutcome::Cleared { version: live });
        }

        let latest = self.read_version(AliasName::Latest).await?;
        if live == latest {
            return Err(Error::precondition(format!(
                "live and latest both point to version {live}, deploy a new version first"
            )));
        }

        self.apply_canary(live, latest, weight).await
    }

    /// Write a canary split between already-read versions.
    pub(crate) async fn apply_canary(
        &self,
        primary: Version,
        canary: Version,
        weight: Weight,
    ) -> Result<CanaryOutcome> {
        let routing = Routing::new(canary, weight);
        self.write(AliasName::Live, &primary, Some(&routing)).await?;
        Ok(CanaryOutcome::Applied {
            primary,
            canary: routing.canary,
            weight,
        })
    }

    /// Make `latest` the sole version on `live`, recording the old `live`
    /// as `previous`. Warns when no canary is active unless `skip_canary_check`.
    pub async fn promote(
        &self,
        skip_canary_check: bool,
        diag: &mut Diagnostics,
    ) -> Result<PromoteOutcome> {
        let live = self.read(AliasName::Live).await?;
        let latest = self.read_version(AliasName::Latest).await?;

        if live.version == latest {
            tracing::info!(version = %latest, "live already on latest, nothing to promote");
            return Ok(PromoteOutcome::NothingToPromote { version: latest });
        }

        if !skip_canary_check && live.routing.is_none() {
            diag.warn(Warning::no_active_canary(
                "no active canary, consider running canary before promote",
            ));
        }

        self.promote_versions(live.version, latest).await
    }

    /// Promote using versions read earlier, without re-reading.
    pub(crate) async fn promote_versions(
        &self,
        live: Version,
        latest: Version,
    ) -> Result<PromoteOutcome> {
        self.write(AliasName::Previous, &live, None).await?;
        self.write(AliasName::Live, &latest, None).await?;
        Ok(PromoteOutcome::Promoted {
            previous: live,
            live: latest,
        })
    }

    /// Point `live` and `latest` at `previous`, then append an audit entry.
    ///
    /// Moving `latest` keeps a later promote from re-releasing the bad
    /// version. A failed audit write is a warning, not an error.
    pub async fn rollback(
        &self,
        request: &RollbackRequest,
        log: &RollbackLog,
        diag: &mut Diagnostics,
    ) -> Result<RollbackOutcome> {
        let live = self.read_version(AliasName::Live).await?;
        let previous = self.read_version(AliasName::Previous).await?;

        if live == previous {
            tracing::info!(version = %live, "live already on previous, nothing to roll back");
            return Ok(RollbackOutcome::NothingToRollBack { version: live });
        }

        self.write(AliasName::Live, &previous, None).await?;
        self.write(AliasName::Latest, &previous, None).await?;

        let reason = request
            .reason
            .as_deref()
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(DEFAULT_REASON);
        let entry = RollbackLogEntry::now(
            request.env,
            live.clone(),
            previous.clone(),
            reason,
            &request.operator,
        );

        let logged = match log.append(&entry) {
            Ok(()) => true,
            Err(e) => {
                diag.warn(Warning::rollback_log(format!(
                    "could not write rollback log {}: {e}",
                    log.path().display()
                )));
                false
            }
        };

        Ok(RollbackOutcome::RolledBack {
            from: live,
            to: previous,
            entry,
            logged,
        })
    }

    /// Point `live` at an arbitrary published version, clearing routing.
    /// `previous` and `latest` are left untouched.
    pub async fn switch(&self, target: &Version) -> Result<SwitchOutcome> {
        self.service.version_exists(self.function, target).await?;

        let live = self.read_version(AliasName::Live).await?;
        if live == *target {
            return Ok(SwitchOutcome::AlreadyLive { version: live });
        }

        self.write(AliasName::Live, target, None).await?;
        Ok(SwitchOutcome::Switched {
            from: live,
            to: target.clone(),
        })
    }

    /// Read all three aliases. Missing aliases are reported as unconfigured;
    /// other read failures are errors.
    pub async fn status(&self) -> Result<StatusReport> {
        let live = self.read_optional(AliasName::Live).await?;
        let previous = self.read_optional(AliasName::Previous).await?;
        let latest = self.read_optional(AliasName::Latest).await?;

        Ok(StatusReport {
            live,
            previous: previous.map(|a| a.version),
            latest: latest.map(|a| a.version),
        })
    }

    async fn read_optional(&self, alias: AliasName) -> Result<Option<AliasState>> {
        match self.read(alias).await {
            Ok(state) => Ok(Some(state)),
            Err(e) if e.is_not_found() => {
                tracing::debug!(alias = %alias, "alias not configured: {e}");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
