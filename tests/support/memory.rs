// ABOUTME: In-memory AliasService used to exercise deployment logic without AWS.
// ABOUTME: Records every call and supports injected failures per operation.

#![allow(dead_code)]

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use lad::alias::{AliasError, AliasService, AliasState};
use lad::types::{AliasName, FunctionName, Routing, Version};

/// Alias service operations, for failure injection and call inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    PublishVersion,
    GetAlias,
    UpdateAlias,
    VersionExists,
}

impl Operation {
    fn api_name(self) -> &'static str {
        match self {
            Operation::PublishVersion => "PublishVersion",
            Operation::GetAlias => "GetAlias",
            Operation::UpdateAlias => "UpdateAlias",
            Operation::VersionExists => "GetFunction",
        }
    }
}

/// A recorded call against the service.
#[derive(Debug, Clone, PartialEq)]
pub enum AliasCall {
    PublishVersion {
        description: String,
    },
    GetAlias {
        alias: AliasName,
    },
    UpdateAlias {
        alias: AliasName,
        primary: Version,
        routing: Option<Routing>,
    },
    VersionExists {
        version: Version,
    },
}

impl AliasCall {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            AliasCall::PublishVersion { .. } | AliasCall::UpdateAlias { .. }
        )
    }
}

#[derive(Debug)]
struct InjectedFailure {
    /// Calls that still succeed before failures start.
    remaining_successes: usize,
    message: String,
}

#[derive(Debug, Default)]
struct FunctionRecord {
    versions: Vec<Version>,
    aliases: HashMap<AliasName, (Version, Option<Routing>)>,
}

#[derive(Debug, Default)]
struct State {
    functions: HashMap<FunctionName, FunctionRecord>,
    calls: Vec<AliasCall>,
    failures: HashMap<Operation, InjectedFailure>,
}

/// Alias service holding functions, versions, and aliases in memory.
///
/// Versions are numbered sequentially like Lambda's (`"1"`, `"2"`, ...).
#[derive(Debug, Default)]
pub struct MemoryAliasService {
    state: Mutex<State>,
}

impl MemoryAliasService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function with `count` published versions, `"1"` through `"count"`.
    pub fn with_function(self, function: &FunctionName, count: u32) -> Self {
        {
            let mut state = self.state.lock();
            let record = state.functions.entry(function.clone()).or_default();
            for n in 1..=count {
                if let Ok(version) = Version::new(&n.to_string()) {
                    record.versions.push(version);
                }
            }
        }
        self
    }

    /// Point an alias at a version, with optional routing.
    pub fn with_alias(
        self,
        function: &FunctionName,
        alias: AliasName,
        version: &Version,
        routing: Option<Routing>,
    ) -> Self {
        self.state
            .lock()
            .functions
            .entry(function.clone())
            .or_default()
            .aliases
            .insert(alias, (version.clone(), routing));
        self
    }

    /// Make every call of `operation` fail with `message`.
    pub fn fail(&self, operation: Operation, message: &str) {
        self.fail_after(operation, 0, message);
    }

    /// Let `successes` calls of `operation` through, then fail the rest.
    pub fn fail_after(&self, operation: Operation, successes: usize, message: &str) {
        self.state.lock().failures.insert(
            operation,
            InjectedFailure {
                remaining_successes: successes,
                message: message.to_string(),
            },
        );
    }

    /// Current alias configuration, bypassing call recording.
    pub fn alias(&self, function: &FunctionName, alias: AliasName) -> Option<AliasState> {
        let state = self.state.lock();
        let (version, routing) = state.functions.get(function)?.aliases.get(&alias)?;
        Some(AliasState {
            name: alias,
            version: version.clone(),
            routing: routing.clone(),
        })
    }

    pub fn calls(&self) -> Vec<AliasCall> {
        self.state.lock().calls.clone()
    }

    pub fn mutations(&self) -> Vec<AliasCall> {
        self.state
            .lock()
            .calls
            .iter()
            .filter(|c| c.is_mutation())
            .cloned()
            .collect()
    }

    fn record(state: &mut State, operation: Operation, call: AliasCall) -> Result<(), AliasError> {
        state.calls.push(call);

        if let Some(failure) = state.failures.get_mut(&operation) {
            if failure.remaining_successes == 0 {
                return Err(AliasError::request(
                    operation.api_name(),
                    failure.message.clone(),
                ));
            }
            failure.remaining_successes -= 1;
        }
        Ok(())
    }

    fn function_mut<'a>(
        state: &'a mut State,
        operation: Operation,
        function: &FunctionName,
    ) -> Result<&'a mut FunctionRecord, AliasError> {
        state.functions.get_mut(function).ok_or_else(|| {
            AliasError::request(
                operation.api_name(),
                format!("ResourceNotFoundException: Function not found: {function}"),
            )
        })
    }
}

#[async_trait]
impl AliasService for MemoryAliasService {
    async fn publish_version(
        &self,
        function: &FunctionName,
        description: &str,
    ) -> Result<Version, AliasError> {
        let operation = Operation::PublishVersion;
        let mut state = self.state.lock();
        Self::record(
            &mut state,
            operation,
            AliasCall::PublishVersion {
                description: description.to_string(),
            },
        )?;

        let record = Self::function_mut(&mut state, operation, function)?;
        let next = record.versions.len() + 1;
        let version = Version::new(&next.to_string())
            .map_err(|e| AliasError::request(operation.api_name(), e.to_string()))?;
        record.versions.push(version.clone());
        Ok(version)
    }

    async fn get_alias(
        &self,
        function: &FunctionName,
        alias: AliasName,
    ) -> Result<AliasState, AliasError> {
        let operation = Operation::GetAlias;
        let mut state = self.state.lock();
        Self::record(&mut state, operation, AliasCall::GetAlias { alias })?;

        let record = Self::function_mut(&mut state, operation, function)?;
        let (version, routing) = record.aliases.get(&alias).ok_or_else(|| {
            AliasError::request(
                operation.api_name(),
                format!("ResourceNotFoundException: Alias not found: {function}:{alias}"),
            )
        })?;

        Ok(AliasState {
            name: alias,
            version: version.clone(),
            routing: routing.clone(),
        })
    }

    async fn update_alias(
        &self,
        function: &FunctionName,
        alias: AliasName,
        primary: &Version,
        routing: Option<&Routing>,
    ) -> Result<(), AliasError> {
        let operation = Operation::UpdateAlias;
        let mut state = self.state.lock();
        Self::record(
            &mut state,
            operation,
            AliasCall::UpdateAlias {
                alias,
                primary: primary.clone(),
                routing: routing.cloned(),
            },
        )?;

        let record = Self::function_mut(&mut state, operation, function)?;
        if !record.aliases.contains_key(&alias) {
            return Err(AliasError::request(
                operation.api_name(),
                format!("ResourceNotFoundException: Alias not found: {function}:{alias}"),
            ));
        }
        for version in std::iter::once(primary).chain(routing.map(|r| &r.canary)) {
            if !record.versions.contains(version) {
                return Err(AliasError::request(
                    operation.api_name(),
                    format!("ResourceNotFoundException: Version {version} does not exist"),
                ));
            }
        }

        record
            .aliases
            .insert(alias, (primary.clone(), routing.cloned()));
        Ok(())
    }

    async fn version_exists(
        &self,
        function: &FunctionName,
        version: &Version,
    ) -> Result<(), AliasError> {
        let operation = Operation::VersionExists;
        let mut state = self.state.lock();
        Self::record(
            &mut state,
            operation,
            AliasCall::VersionExists {
                version: version.clone(),
            },
        )?;

        let record = Self::function_mut(&mut state, operation, function)?;
        if record.versions.contains(version) {
            Ok(())
        } else {
            Err(AliasError::request(
                operation.api_name(),
                format!("ResourceNotFoundException: Function not found: {function}:{version}"),
            ))
        }
    }
}
