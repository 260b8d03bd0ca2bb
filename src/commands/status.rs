// ABOUTME: Status command implementation.
// ABOUTME: Shows alias versions, canary split, release state, and suggested next commands.

use lad::alias::AliasService;
use lad::deploy::{CanaryState, Deployer, StatusReport};
use lad::error::Result;
use lad::output::{Output, OutputMode};
use lad::types::{Environment, Version};
use serde::Serialize;

const NOT_CONFIGURED: &str = "not configured";

#[derive(Serialize)]
struct StatusJson<'a> {
    event: &'static str,
    function: &'a str,
    env: String,
    live: Option<&'a Version>,
    previous: Option<&'a Version>,
    latest: Option<&'a Version>,
    canary: Option<CanaryJson<'a>>,
    class: String,
    next: Vec<String>,
}

#[derive(Serialize)]
struct CanaryJson<'a> {
    version: &'a Version,
    percent: f64,
}

pub async fn status<S: AliasService + ?Sized>(
    deployer: &Deployer<'_, S>,
    env: Environment,
    output: Output,
) -> Result<()> {
    let report = deployer.status().await?;

    if output.mode() == OutputMode::Json {
        print_json(deployer.function().as_str(), env, &report);
        return Ok(());
    }

    output.progress(&format!("Function: {} ({env})", deployer.function()));
    output.separator();
    output.progress(&format!(
        "live:     {}",
        describe(report.live.as_ref().map(|l| &l.version))
    ));
    output.progress(&format!("previous: {}", describe(report.previous.as_ref())));
    output.progress(&format!("latest:   {}", describe(report.latest.as_ref())));

    if let Some(CanaryState::Canary {
        primary,
        canary,
        weight,
    }) = report.canary_state()
    {
        output.progress(&format!(
            "canary:   version {primary} {} / version {canary} {weight}",
            weight.complement()
        ));
    }
    output.separator();

    output.success(&format!("Status: {}", report.class()));
    for action in report.next_actions() {
        output.progress(&format!(
            "  {} → {}",
            action.description(),
            action.command(env)
        ));
    }
    Ok(())
}

fn describe(version: Option<&Version>) -> String {
    version.map_or_else(|| NOT_CONFIGURED.to_string(), |v| format!("version {v}"))
}

fn print_json(function: &str, env: Environment, report: &StatusReport) {
    let canary = report.live.as_ref().and_then(|live| live.routing.as_ref());
    let status = StatusJson {
        event: "status",
        function,
        env: env.to_string(),
        live: report.live.as_ref().map(|l| &l.version),
        previous: report.previous.as_ref(),
        latest: report.latest.as_ref(),
        canary: canary.map(|r| CanaryJson {
            version: &r.canary,
            percent: r.weight.percent(),
        }),
        class: report.class().to_string(),
        next: report
            .next_actions()
            .iter()
            .map(|a| a.command(env))
            .collect(),
    };
    if let Ok(json) = serde_json::to_string(&status) {
        println!("{json}");
    }
}
