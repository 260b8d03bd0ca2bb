// ABOUTME: Alias service abstraction over the provider's alias and version API.
// ABOUTME: Exports the AliasService trait and the Lambda-backed client.

mod error;
mod lambda;

pub use error::{AliasError, InvalidFieldSnafu, MissingFieldSnafu, RequestSnafu};
pub use lambda::LambdaAliasService;

use async_trait::async_trait;

use crate::types::{AliasName, FunctionName, Routing, Version};

/// Current configuration of one alias as read from the service.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasState {
    pub name: AliasName,
    /// Version receiving the complement of the canary weight.
    pub version: Version,
    pub routing: Option<Routing>,
}

/// Operations the deployment core needs from the alias service.
///
/// Every call is a single blocking round-trip; nothing is retried here.
#[async_trait]
pub trait AliasService: Send + Sync {
    /// Publish the function's current code as a new immutable version.
    async fn publish_version(
        &self,
        function: &FunctionName,
        description: &str,
    ) -> Result<Version, AliasError>;

    /// Read an alias, including its routing entry if one is present.
    async fn get_alias(
        &self,
        function: &FunctionName,
        alias: AliasName,
    ) -> Result<AliasState, AliasError>;

    /// Read only the primary version of an alias.
    async fn get_alias_version(
        &self,
        function: &FunctionName,
        alias: AliasName,
    ) -> Result<Version, AliasError> {
        Ok(self.get_alias(function, alias).await?.version)
    }

    /// Replace the alias's primary version and routing.
    ///
    /// `None` clears any existing routing entry; this is never a merge.
    async fn update_alias(
        &self,
        function: &FunctionName,
        alias: AliasName,
        primary: &Version,
        routing: Option<&Routing>,
    ) -> Result<(), AliasError>;

    /// Succeeds if the version is published on the function.
    async fn version_exists(
        &self,
        function: &FunctionName,
        version: &Version,
    ) -> Result<(), AliasError>;
}
