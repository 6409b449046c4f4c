//! Event topology graph
//!
//! Structure:
//! - `graph` - Vertex/edge arenas and lookups
//! - `destination` - Canonical destination identity used for vertex dedup
//! - `transform` - What an edge does to the events crossing it
//! - `graph_builder` - Per-kind ingestion rules
//! - `discovery` - Source kinds discovered from labelled CRDs
//! - `constructor` - Builds a graph from a cluster (or any lister)
//! - `error` - Listing and construction errors

pub mod constructor;
pub mod destination;
pub mod discovery;
pub mod error;
pub mod graph;
mod graph_builder;
pub mod transform;

pub use constructor::{
    ConstructorConfig, Predicate, construct_graph, construct_graph_from_config,
    construct_graph_with,
};
pub use destination::{ComparableDestination, canonicalize};
pub use discovery::{SOURCE_CRD_LABEL_SELECTOR, SourceKind, source_from_value, source_kind_from_crd};
pub use error::{DecodeError, GraphError, ListError};
pub use graph::{Edge, EdgeId, Graph, Vertex, VertexId};
pub use transform::{AttributeConstraint, EventShape, Transform};
