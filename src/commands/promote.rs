// ABOUTME: Promote command implementation.
// ABOUTME: Moves all live traffic to latest and records the old live as previous.

use lad::alias::AliasService;
use lad::deploy::{Deployer, PromoteOutcome};
use lad::diagnostics::Diagnostics;
use lad::error::Result;
use lad::output::Output;

use super::emit_warnings;

pub async fn promote<S: AliasService + ?Sized>(
    deployer: &Deployer<'_, S>,
    skip_canary: bool,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    let mut diag = Diagnostics::default();

    let outcome = deployer.promote(skip_canary, &mut diag).await?;
    emit_warnings(&output, &diag);

    match outcome {
        PromoteOutcome::Promoted { previous, live } => {
            output.success(&format!("Promoted version {live} (previous: {previous})"));
        }
        PromoteOutcome::NothingToPromote { version } => {
            output.success(&format!(
                "Live already on version {version}, nothing to promote"
            ));
        }
    }
    Ok(())
}
