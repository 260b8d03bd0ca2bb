// ABOUTME: Canary command implementation.
// ABOUTME: Applies a traffic split on live and optionally promotes straight after a 75% step.

use lad::alias::AliasService;
use lad::deploy::{CanaryOutcome, CanaryRequest, Deployer, NextAction, PromoteOutcome};
use lad::diagnostics::Diagnostics;
use lad::error::Result;
use lad::output::Output;
use lad::types::Environment;

use super::emit_warnings;

pub async fn canary<S: AliasService + ?Sized>(
    deployer: &Deployer<'_, S>,
    env: Environment,
    request: CanaryRequest,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    let mut diag = Diagnostics::default();

    match deployer.canary(request.weight).await? {
        CanaryOutcome::Cleared { version } => {
            output.success(&format!(
                "Canary routing cleared, all traffic on version {version}"
            ));
            return Ok(());
        }
        CanaryOutcome::Applied {
            primary,
            canary,
            weight,
        } => {
            output.success(&format!(
                "Traffic split: version {primary} {} / version {canary} {weight}",
                weight.complement()
            ));
        }
    }

    if request.auto_promote {
        output.progress("  → Promoting");
        if let PromoteOutcome::Promoted { previous, live } =
            deployer.promote(true, &mut diag).await?
        {
            output.success(&format!("Promoted version {live} (previous: {previous})"));
        }
        emit_warnings(&output, &diag);
        return Ok(());
    }

    emit_warnings(&output, &diag);
    match request.suggested_next() {
        Some(next) => {
            let action = NextAction::StartCanary(next);
            output.progress(&format!("Next: increase to {} → {}", next, action.command(env)));
        }
        None => {
            let action = NextAction::Promote { skip_canary: false };
            output.progress(&format!("Next: {} → {}", action.description(), action.command(env)));
        }
    }
    Ok(())
}
