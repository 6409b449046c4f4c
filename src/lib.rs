//! Knative Eventing topology graph
//!
//! Builds a directed graph of every path a CloudEvent can travel through an
//! eventing installation: Brokers, Channels, Sources, Triggers, Subscriptions
//! and EventTypes, read from one or more namespaces of a cluster.

pub mod cluster;
pub mod config;
pub mod logging;
pub mod models;
pub mod topology;

// Re-export commonly used types for convenience
pub use cluster::{EventingLister, KubeLister, create_client};
pub use config::{Config, ConfigLoader};
pub use models::{Destination, EventingKind, KReference};
pub use topology::{
    ConstructorConfig, Edge, EdgeId, Graph, GraphError, ListError, Transform, Vertex, VertexId,
    construct_graph, construct_graph_from_config, construct_graph_with,
};
