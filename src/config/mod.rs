//! Configuration for graph construction
//!
//! Layers built-in defaults, an optional YAML file and environment overrides
//! into a [`Config`], which [`crate::topology::ConstructorConfig::from_config`]
//! turns into namespaces and inclusion predicates.

mod defaults;
pub mod loader;
pub mod paths;
pub mod schema;

pub use defaults::WILDCARD_NAMESPACES;
pub use loader::ConfigLoader;
pub use schema::{Config, IncludeConfig, LoggerConfig};
