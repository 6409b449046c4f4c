//! Configuration schema definitions
//!
//! Defines the structure of configuration files using serde for serialization.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Kubeconfig context to use; the current context when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Namespaces to build the topology from
    #[serde(default = "default_namespaces")]
    pub namespaces: Vec<String>,

    /// Which kinds to ingest
    #[serde(default)]
    pub include: IncludeConfig,

    /// Label keys; resources carrying any of them are left out of the graph
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_labels: Vec<String>,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerConfig,
}

/// Per-kind ingestion switches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncludeConfig {
    #[serde(default = "default_true")]
    pub brokers: bool,

    #[serde(default = "default_true")]
    pub channels: bool,

    /// Dynamically discovered source kinds
    #[serde(default = "default_true")]
    pub sources: bool,

    #[serde(default = "default_true")]
    pub triggers: bool,

    #[serde(default = "default_true")]
    pub subscriptions: bool,

    #[serde(default = "default_true")]
    pub event_types: bool,
}

/// Logger configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Write debug logs to a temp file
    #[serde(default)]
    pub debug: bool,
}

// Default value functions
fn default_namespaces() -> Vec<String> {
    vec!["default".to_string()]
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context: None,
            namespaces: default_namespaces(),
            include: IncludeConfig::default(),
            skip_labels: Vec::new(),
            logger: LoggerConfig::default(),
        }
    }
}

impl Default for IncludeConfig {
    fn default() -> Self {
        Self {
            brokers: true,
            channels: true,
            sources: true,
            triggers: true,
            subscriptions: true,
            event_types: true,
        }
    }
}
