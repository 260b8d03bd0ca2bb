// ABOUTME: Validated domain types for alias deployments.
// ABOUTME: Versions, function names, alias names, environments, and traffic weights.

mod alias_name;
mod environment;
mod function_name;
mod version;
mod weight;

pub use alias_name::AliasName;
pub use environment::Environment;
pub use function_name::{FunctionName, FunctionNameError};
pub use version::{Version, VersionError};
pub use weight::{Routing, Weight, WeightError};
