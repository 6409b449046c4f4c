//! Configuration loading and validation
//!
//! A config file, when present, replaces the built-in defaults wholesale
//! (fields it omits take their serde defaults). Environment overrides are
//! applied on top of whichever of the two was used.

use super::{defaults, paths, schema::Config};
use anyhow::{Context, Result};
use std::path::Path;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration, apply environment overrides, then validate it
    ///
    /// The file (`path`, or the root config if it exists) replaces the
    /// built-in defaults; environment variables override individual fields.
    ///
    /// An explicit `path` must exist; the root config is optional.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let mut config = Self::load_defaults();

        match path {
            Some(path) => config = Self::load_file(path)?,
            None => {
                let root = paths::root_config_path();
                if root.exists() {
                    config = Self::load_file(&root)?;
                }
            }
        }

        config = Self::apply_env_overrides(config);
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found: {}", path.display()));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Check that the configuration names a usable set of namespaces
    ///
    /// Fails on:
    /// - An empty namespace list
    /// - Blank namespace names
    /// - "All namespaces" wildcards, which are not supported
    pub fn validate(config: &Config) -> Result<()> {
        if config.namespaces.is_empty() {
            return Err(anyhow::anyhow!("namespaces must list at least one namespace"));
        }

        for ns in &config.namespaces {
            if ns.trim().is_empty() {
                return Err(anyhow::anyhow!("namespaces contains a blank entry"));
            }
            if defaults::WILDCARD_NAMESPACES.contains(&ns.as_str()) {
                return Err(anyhow::anyhow!(
                    "namespace '{}' is not supported, list namespaces explicitly",
                    ns
                ));
            }
        }

        Ok(())
    }

    /// Load default configuration
    pub fn load_defaults() -> Config {
        defaults::default_config()
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // EVENTING_GRAPH_NAMESPACES override (comma-separated)
        if let Ok(namespaces) = std::env::var("EVENTING_GRAPH_NAMESPACES") {
            config.namespaces = namespaces
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        if let Ok(context) = std::env::var("EVENTING_GRAPH_CONTEXT") {
            config.context = Some(context).filter(|c| !c.is_empty());
        }

        if let Ok(debug) = std::env::var("EVENTING_GRAPH_DEBUG") {
            if let Ok(val) = debug.parse::<bool>() {
                config.logger.debug = val;
            }
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.namespaces, vec!["default".to_string()]);
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_wildcards() {
        for ns in ["*", "all", "-A"] {
            let config = Config {
                namespaces: vec!["default".to_string(), ns.to_string()],
                ..Default::default()
            };
            assert!(ConfigLoader::validate(&config).is_err(), "{ns} accepted");
        }
    }

    #[test]
    fn test_validate_rejects_empty_and_blank() {
        let empty = Config {
            namespaces: Vec::new(),
            ..Default::default()
        };
        assert!(ConfigLoader::validate(&empty).is_err());

        let blank = Config {
            namespaces: vec!["  ".to_string()],
            ..Default::default()
        };
        assert!(ConfigLoader::validate(&blank).is_err());
    }

    #[test]
    fn test_env_overrides() {
        // SAFETY: set_var is unsafe in Rust 2024 due to potential data races.
        // This is the only test in this binary touching these variables.
        unsafe {
            std::env::set_var("EVENTING_GRAPH_NAMESPACES", "team-a, team-b,");
            std::env::set_var("EVENTING_GRAPH_CONTEXT", "kind-knative");
            std::env::set_var("EVENTING_GRAPH_DEBUG", "true");
        }

        let config = ConfigLoader::apply_env_overrides(Config::default());

        assert_eq!(config.namespaces, vec!["team-a", "team-b"]);
        assert_eq!(config.context.as_deref(), Some("kind-knative"));
        assert!(config.logger.debug);

        // SAFETY: see above
        unsafe {
            std::env::remove_var("EVENTING_GRAPH_NAMESPACES");
            std::env::remove_var("EVENTING_GRAPH_CONTEXT");
            std::env::remove_var("EVENTING_GRAPH_DEBUG");
        }
    }
}
