// ABOUTME: Auto command implementation.
// ABOUTME: Reports each step of an automatic canary progression as it happens.

use humantime_serde::re::humantime::format_duration;
use lad::alias::AliasService;
use lad::deploy::{AutoEvent, AutoPlan, Deployer, PromoteOutcome, Sleep};
use lad::error::Result;
use lad::output::Output;

pub async fn auto<S: AliasService + ?Sized>(
    deployer: &Deployer<'_, S>,
    plan: AutoPlan,
    mut output: Output,
) -> Result<()> {
    output.start_timer();

    let steps = plan
        .percents()
        .iter()
        .map(|pct| format!("{pct}%"))
        .collect::<Vec<_>>()
        .join(", ");
    output.progress(&format!(
        "Auto canary for {}: [{steps}] → promote, {} per step ({} total)",
        deployer.function(),
        format_duration(plan.wait()),
        format_duration(plan.total_wait())
    ));
    output.separator();

    let outcome = deployer
        .auto(&plan, &Sleep, |event| match event {
            AutoEvent::Started { live, latest } => {
                output.progress(&format!("  → live {live}, latest {latest}"));
            }
            AutoEvent::StepApplied {
                index,
                total,
                primary,
                canary,
                weight,
            } => {
                output.progress(&format!(
                    "[{index}/{total}] version {primary} {} / version {canary} {weight}",
                    weight.complement()
                ));
            }
            AutoEvent::Waiting { duration } => {
                output.progress(&format!("  → Waiting {}", format_duration(duration)));
            }
            AutoEvent::Promoting { index, total } => {
                output.progress(&format!("[{index}/{total}] Promoting"));
            }
        })
        .await?;

    output.separator();
    if let PromoteOutcome::Promoted { previous, live } = outcome {
        output.success(&format!("Promoted version {live} (previous: {previous})"));
    }
    Ok(())
}
