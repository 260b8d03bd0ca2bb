// ABOUTME: Shared fixtures for integration tests.
// ABOUTME: Builds in-memory alias services in a given release state.

#![allow(dead_code, unused_imports)]

mod memory;

pub use memory::{AliasCall, MemoryAliasService, Operation};

use lad::types::{AliasName, FunctionName, Routing, Version, Weight};

pub fn function() -> FunctionName {
    FunctionName::new("orders-function-default").unwrap()
}

pub fn v(value: &str) -> Version {
    Version::new(value).unwrap()
}

pub fn pct(percent: u32) -> Weight {
    Weight::from_percent(percent).unwrap()
}

/// Service with versions 1..=`published` and the three aliases set.
pub fn service(published: u32, live: &str, previous: &str, latest: &str) -> MemoryAliasService {
    let f = function();
    MemoryAliasService::new()
        .with_function(&f, published)
        .with_alias(&f, AliasName::Live, &v(live), None)
        .with_alias(&f, AliasName::Previous, &v(previous), None)
        .with_alias(&f, AliasName::Latest, &v(latest), None)
}

/// Same as `service`, with a canary split already on live.
pub fn service_with_canary(
    published: u32,
    live: &str,
    previous: &str,
    latest: &str,
    weight: u32,
) -> MemoryAliasService {
    let f = function();
    service(published, live, previous, latest).with_alias(
        &f,
        AliasName::Live,
        &v(live),
        Some(Routing::new(v(latest), pct(weight))),
    )
}
