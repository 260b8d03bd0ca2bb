// ABOUTME: Build-and-deploy step run before publishing a new function version.
// ABOUTME: Production runner shells out to the SAM CLI via tokio::process.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

/// Builds the function code and pushes it to the provider.
#[async_trait]
pub trait BuildRunner: Send + Sync {
    async fn build(&self) -> Result<()>;

    /// Deploy the built artifact; `description` is attached to the stack.
    async fn deploy(&self, description: &str) -> Result<()>;
}

/// Runs `sam build` and `sam deploy` in a project directory.
#[derive(Debug, Clone)]
pub struct SamCli {
    program: PathBuf,
    project_dir: PathBuf,
}

impl SamCli {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from("sam"),
            project_dir: project_dir.into(),
        }
    }

    /// Use a different executable, e.g. a wrapper script.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Arguments passed to `sam deploy`.
    pub fn deploy_args(description: &str) -> Vec<String> {
        vec![
            "deploy".to_string(),
            "--parameter-overrides".to_string(),
            format!("Runtime=provided.al2023 Description=\"{description}\""),
        ]
    }

    async fn run(&self, args: &[String]) -> Result<()> {
        let step = format!("{} {}", self.program.display(), args.first().map_or("", String::as_str));
        tracing::info!(step = %step, dir = %self.project_dir.display(), "running build step");

        // Output streams straight through so the operator sees SAM's progress.
        let status = Command::new(&self.program)
            .args(args)
            .current_dir(&self.project_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Error::Build {
                step: step.clone(),
                message: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::Build {
                step,
                message: status.to_string(),
            })
        }
    }
}

#[async_trait]
impl BuildRunner for SamCli {
    async fn build(&self) -> Result<()> {
        self.run(&["build".to_string()]).await
    }

    async fn deploy(&self, description: &str) -> Result<()> {
        self.run(&Self::deploy_args(description)).await
    }
}
