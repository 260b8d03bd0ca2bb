// ABOUTME: Reader for SAM's samconfig.toml.
// ABOUTME: Extracts per-environment stack_name and profile from [<env>.deploy.parameters].

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
struct EnvSection {
    #[serde(default)]
    deploy: DeploySection,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DeploySection {
    #[serde(default)]
    parameters: DeployParameters,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DeployParameters {
    #[serde(default)]
    stack_name: Option<String>,
    #[serde(default)]
    profile: Option<String>,
}

/// Parsed samconfig.toml, keyed by environment section name.
#[derive(Debug, Clone, Default)]
pub struct SamConfig {
    environments: HashMap<String, EnvSection>,
}

impl SamConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: HashMap<String, toml::Value> =
            toml::from_str(content).map_err(|e| Error::invalid_input(e.to_string()))?;

        // Top-level scalars like `version = 0.1` are not environments.
        let environments = raw
            .into_iter()
            .filter(|(_, value)| value.is_table())
            .filter_map(|(name, value)| match value.try_into::<EnvSection>() {
                Ok(section) => Some((name, section)),
                Err(e) => {
                    tracing::debug!(section = %name, "skipping samconfig section: {e}");
                    None
                }
            })
            .collect();

        Ok(Self { environments })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn parameters(&self, env: Environment) -> Option<&DeployParameters> {
        self.environments
            .get(env.as_str())
            .map(|section| &section.deploy.parameters)
    }

    pub fn stack_name(&self, env: Environment) -> Option<&str> {
        self.parameters(env)?
            .stack_name
            .as_deref()
            .filter(|s| !s.is_empty())
    }

    pub fn profile(&self, env: Environment) -> Option<&str> {
        self.parameters(env)?
            .profile
            .as_deref()
            .filter(|s| !s.is_empty())
    }
}
