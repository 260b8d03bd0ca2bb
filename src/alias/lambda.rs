// ABOUTME: AliasService implementation backed by the AWS Lambda API.
// ABOUTME: Wraps aws-sdk-lambda calls and renders SDK errors for classification.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_lambda::Client;
use aws_sdk_lambda::error::DisplayErrorContext;
use aws_sdk_lambda::types::AliasRoutingConfiguration;
use snafu::OptionExt;

use super::error::{InvalidFieldSnafu, MissingFieldSnafu};
use super::{AliasError, AliasService, AliasState};
use crate::types::{AliasName, FunctionName, Routing, Version, Weight};

/// Lambda alias client using the standard AWS credential chain.
#[derive(Debug, Clone)]
pub struct LambdaAliasService {
    client: Client,
}

impl LambdaAliasService {
    /// Load AWS configuration, optionally from a named shared-config profile.
    pub async fn connect(profile: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = profile {
            loader = loader.profile_name(profile);
        }
        let config = loader.load().await;
        tracing::debug!(region = ?config.region(), "loaded AWS configuration");

        Self::from_client(Client::new(&config))
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

/// Render an SDK error with its full source chain so service codes like
/// `ResourceNotFoundException` reach the classifier.
fn request_error<E>(operation: &'static str, err: E) -> AliasError
where
    E: std::error::Error,
{
    AliasError::request(operation, DisplayErrorContext(&err).to_string())
}

fn parse_version(operation: &'static str, value: &str) -> Result<Version, AliasError> {
    Version::new(value).map_err(|e| {
        InvalidFieldSnafu {
            operation,
            field: "version",
            message: e.to_string(),
        }
        .build()
    })
}

fn parse_routing(
    operation: &'static str,
    weights: Option<&HashMap<String, f64>>,
) -> Result<Option<Routing>, AliasError> {
    let Some(weights) = weights else {
        return Ok(None);
    };

    if weights.len() > 1 {
        tracing::warn!(
            entries = weights.len(),
            "alias has more than one routing entry, using the first"
        );
    }

    let Some((version, fraction)) = weights.iter().next() else {
        return Ok(None);
    };

    let weight = Weight::from_fraction(*fraction).map_err(|e| {
        InvalidFieldSnafu {
            operation,
            field: "routing weight",
            message: e.to_string(),
        }
        .build()
    })?;

    Ok(Some(Routing::new(parse_version(operation, version)?, weight)))
}

#[async_trait]
impl AliasService for LambdaAliasService {
    async fn publish_version(
        &self,
        function: &FunctionName,
        description: &str,
    ) -> Result<Version, AliasError> {
        const OP: &str = "PublishVersion";

        let output = self
            .client
            .publish_version()
            .function_name(function.as_str())
            .description(description)
            .send()
            .await
            .map_err(|e| request_error(OP, e))?;

        let version = output.version().context(MissingFieldSnafu {
            operation: OP,
            field: "version",
        })?;
        parse_version(OP, version)
    }

    async fn get_alias(
        &self,
        function: &FunctionName,
        alias: AliasName,
    ) -> Result<AliasState, AliasError> {
        const OP: &str = "GetAlias";

        let output = self
            .client
            .get_alias()
            .function_name(function.as_str())
            .name(alias.as_str())
            .send()
            .await
            .map_err(|e| request_error(OP, e))?;

        let version = output.function_version().context(MissingFieldSnafu {
            operation: OP,
            field: "function version",
        })?;
        let routing = parse_routing(
            OP,
            output
                .routing_config()
                .and_then(|config| config.additional_version_weights()),
        )?;

        Ok(AliasState {
            name: alias,
            version: parse_version(OP, version)?,
            routing,
        })
    }

    async fn update_alias(
        &self,
        function: &FunctionName,
        alias: AliasName,
        primary: &Version,
        routing: Option<&Routing>,
    ) -> Result<(), AliasError> {
        let routing_config = match routing {
            Some(routing) => AliasRoutingConfiguration::builder()
                .additional_version_weights(routing.canary.as_str(), routing.weight.fraction())
                .build(),
            // An explicitly empty map is what clears existing routing.
            None => AliasRoutingConfiguration::builder()
                .set_additional_version_weights(Some(HashMap::new()))
                .build(),
        };

        self.client
            .update_alias()
            .function_name(function.as_str())
            .name(alias.as_str())
            .function_version(primary.as_str())
            .routing_config(routing_config)
            .send()
            .await
            .map_err(|e| request_error("UpdateAlias", e))?;

        Ok(())
    }

    async fn version_exists(
        &self,
        function: &FunctionName,
        version: &Version,
    ) -> Result<(), AliasError> {
        self.client
            .get_function()
            .function_name(function.as_str())
            .qualifier(version.as_str())
            .send()
            .await
            .map_err(|e| request_error("GetFunction", e))?;

        Ok(())
    }
}
