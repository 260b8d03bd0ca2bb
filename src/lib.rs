// ABOUTME: Library root for lad - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod alias;
pub mod audit;
pub mod classify;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod output;
pub mod types;
