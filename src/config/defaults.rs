//! Default configuration values

use super::schema::Config;

/// Namespace values that would mean "every namespace", which is not supported
pub const WILDCARD_NAMESPACES: &[&str] = &["*", "all", "-A"];

/// Get the default configuration
pub fn default_config() -> Config {
    Config::default()
}
