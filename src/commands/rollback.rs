// ABOUTME: Rollback command implementation.
// ABOUTME: Reverts live and latest to previous and appends to the rollback log.

use std::path::PathBuf;

use lad::alias::AliasService;
use lad::audit::{RollbackLog, operator_from_env};
use lad::deploy::{Deployer, RollbackOutcome, RollbackRequest};
use lad::diagnostics::Diagnostics;
use lad::error::Result;
use lad::output::Output;
use lad::types::Environment;

use super::emit_warnings;

pub async fn rollback<S: AliasService + ?Sized>(
    deployer: &Deployer<'_, S>,
    env: Environment,
    reason: Option<String>,
    log_path: Option<PathBuf>,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    let mut diag = Diagnostics::default();

    let log = log_path.map_or_else(RollbackLog::beside_executable, RollbackLog::new);
    let request = RollbackRequest {
        env,
        reason,
        operator: operator_from_env(),
    };

    output.progress(&format!("Rolling back {} ({env})", deployer.function()));
    let outcome = deployer.rollback(&request, &log, &mut diag).await?;
    emit_warnings(&output, &diag);

    match outcome {
        RollbackOutcome::RolledBack {
            from,
            to,
            entry,
            logged,
        } => {
            if logged {
                output.progress(&format!("  → Logged to {}", log.path().display()));
            }
            output.success(&format!(
                "Rolled back from version {from} to {to} (reason: {})",
                entry.reason
            ));
        }
        RollbackOutcome::NothingToRollBack { version } => {
            output.success(&format!(
                "Live already on previous version {version}, nothing to roll back"
            ));
        }
    }
    Ok(())
}
