// ABOUTME: Switch command implementation.
// ABOUTME: Points live at an arbitrary version outside the normal release flow.

use lad::alias::AliasService;
use lad::deploy::{Deployer, SwitchOutcome};
use lad::error::Result;
use lad::output::Output;
use lad::types::Version;

pub async fn switch<S: AliasService + ?Sized>(
    deployer: &Deployer<'_, S>,
    target: &Version,
    mut output: Output,
) -> Result<()> {
    output.start_timer();

    match deployer.switch(target).await? {
        SwitchOutcome::Switched { from, to } => {
            output.warning("switch bypasses the release flow and does not update previous");
            output.warning(&format!(
                "rollback will not return to version {from}"
            ));
            output.success(&format!("Switched live from version {from} to {to}"));
        }
        SwitchOutcome::AlreadyLive { version } => {
            output.success(&format!("Live already on version {version}"));
        }
    }
    Ok(())
}
