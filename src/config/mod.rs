// ABOUTME: Resolved settings for one invocation: environment, function, and profile.
// ABOUTME: Command-line values win; samconfig.toml fills in what was not given.

mod samconfig;

pub use samconfig::SamConfig;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{Environment, FunctionName};

pub const SAMCONFIG_FILENAME: &str = "samconfig.toml";

/// Values supplied on the command line, before resolution.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub function: Option<String>,
    pub profile: Option<String>,
    pub samconfig: Option<PathBuf>,
}

/// Everything a command needs to address the right function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub env: Environment,
    pub function: FunctionName,
    /// AWS shared-config profile; `None` uses the default credential chain.
    pub profile: Option<String>,
}

impl Settings {
    /// Resolve settings relative to `dir` (where samconfig.toml is looked up
    /// unless an explicit path was given).
    pub fn resolve(env: Environment, overrides: &Overrides, dir: &Path) -> Result<Self> {
        let samconfig_path = overrides
            .samconfig
            .clone()
            .unwrap_or_else(|| dir.join(SAMCONFIG_FILENAME));
        let samconfig = SamConfig::load(&samconfig_path);

        let function = match non_empty(overrides.function.as_deref()) {
            Some(name) => {
                FunctionName::new(name).map_err(|e| Error::invalid_input(e.to_string()))?
            }
            None => function_from_samconfig(env, &samconfig_path, &samconfig)?,
        };

        let profile = non_empty(overrides.profile.as_deref())
            .map(str::to_string)
            .or_else(|| {
                samconfig
                    .as_ref()
                    .ok()
                    .and_then(|config| config.profile(env))
                    .map(str::to_string)
            });

        Ok(Self {
            env,
            function,
            profile,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn function_from_samconfig(
    env: Environment,
    path: &Path,
    samconfig: &Result<SamConfig>,
) -> Result<FunctionName> {
    let config = samconfig.as_ref().map_err(|e| {
        Error::invalid_input(format!("{e}; pass the function name with --function"))
    })?;

    let stack_name = config.stack_name(env).ok_or_else(|| {
        Error::invalid_input(format!(
            "{} has no stack_name for environment '{env}'; pass the function name with --function",
            path.display()
        ))
    })?;

    FunctionName::for_stack(stack_name).map_err(|e| Error::invalid_input(e.to_string()))
}
