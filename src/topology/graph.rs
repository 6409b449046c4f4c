//! Graph data structures for the event topology
//!
//! Vertices and edges live in two arenas owned by the [`Graph`]. A vertex
//! refers to its edges by [`EdgeId`] and an edge to its endpoints by
//! [`VertexId`], so one logical edge is shared by both endpoints without
//! shared ownership.

use super::destination::{ComparableDestination, canonicalize};
use super::transform::Transform;
use crate::models::{Destination, KReference};
use std::collections::HashMap;

/// Index of a vertex inside its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

/// Index of an edge inside its graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A node: one canonical destination events can reach
#[derive(Debug, Clone)]
pub struct Vertex {
    id: VertexId,
    destination: Destination,
    in_edges: Vec<EdgeId>,
    out_edges: Vec<EdgeId>,
}

impl Vertex {
    pub fn id(&self) -> VertexId {
        self.id
    }

    /// The destination this vertex was first created from
    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn in_edges(&self) -> &[EdgeId] {
        &self.in_edges
    }

    pub fn out_edges(&self) -> &[EdgeId] {
        &self.out_edges
    }
}

/// A directed hop between two vertices
#[derive(Debug, Clone)]
pub struct Edge {
    id: EdgeId,
    from: VertexId,
    to: VertexId,
    declared_by: Destination,
    transform: Transform,
    primary: bool,
}

impl Edge {
    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn from(&self) -> VertexId {
        self.from
    }

    pub fn to(&self) -> VertexId {
        self.to
    }

    /// Identity of the resource that declared this edge (the Trigger, not the Broker)
    pub fn declared_by(&self) -> &Destination {
        &self.declared_by
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// True when the edge is the declaring resource's own configured sink or dead-letter sink
    pub fn is_primary(&self) -> bool {
        self.primary
    }
}

/// Directed multigraph of every path an event may travel
///
/// Built once by the constructor and then only read. There is no removal:
/// a routing change means building a new graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    index: HashMap<ComparableDestination, VertexId>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the vertex for `dest`, creating it on first reference
    pub fn get_or_create_vertex(&mut self, dest: &Destination) -> VertexId {
        let key = canonicalize(dest);
        if let Some(id) = self.index.get(&key) {
            return *id;
        }

        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            id,
            destination: dest.clone(),
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        });
        self.index.insert(key, id);
        id
    }

    /// Look up the vertex for `dest` without creating it
    pub fn find_vertex(&self, dest: &Destination) -> Option<VertexId> {
        self.index.get(&canonicalize(dest)).copied()
    }

    /// Add an edge `from -> to`
    ///
    /// Parallel edges are never merged: identical calls add distinct edges.
    pub fn add_edge(
        &mut self,
        from: VertexId,
        to: VertexId,
        declared_by: &Destination,
        transform: Transform,
        primary: bool,
    ) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            id,
            from,
            to,
            declared_by: declared_by.clone(),
            transform,
            primary,
        });
        self.vertices[from.0].out_edges.push(id);
        self.vertices[to.0].in_edges.push(id);
        id
    }

    /// Find the primary outgoing edge declared by the resource `reference`
    ///
    /// Matches on the declaring resource's identity and the primary flag; the
    /// first such edge in insertion order wins.
    pub fn primary_out_edge_with_ref(&self, reference: &KReference) -> Option<&Edge> {
        let key = ComparableDestination::from(reference);
        self.edges
            .iter()
            .find(|edge| edge.primary && canonicalize(&edge.declared_by) == key)
    }

    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.0)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Outgoing edges of a vertex; empty for an unknown id
    pub fn out_edges(&self, id: VertexId) -> impl Iterator<Item = &Edge> {
        self.vertex(id)
            .map(|v| v.out_edges.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|e| &self.edges[e.0])
    }

    /// Incoming edges of a vertex; empty for an unknown id
    pub fn in_edges(&self, id: VertexId) -> impl Iterator<Item = &Edge> {
        self.vertex(id)
            .map(|v| v.in_edges.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|e| &self.edges[e.0])
    }

    /// All edges flagged primary
    pub fn primary_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(|e| e.primary)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broker_ref() -> KReference {
        KReference::new("eventing.knative.dev/v1", "Broker", "default", "my-broker")
    }

    #[test]
    fn test_graph_creation() {
        let graph = Graph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let mut graph = Graph::new();
        let first = graph.get_or_create_vertex(&Destination::from_ref(broker_ref()));
        for _ in 0..5 {
            let again = graph.get_or_create_vertex(&Destination::from_ref(broker_ref()));
            assert_eq!(first, again);
        }
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_add_edge_links_both_endpoints() {
        let mut graph = Graph::new();
        let from = graph.get_or_create_vertex(&Destination::from_ref(broker_ref()));
        let to = graph.get_or_create_vertex(&Destination::from_uri("https://knative.dev"));
        let edge = graph.add_edge(
            from,
            to,
            &Destination::from_ref(broker_ref()),
            Transform::NoTransform,
            true,
        );

        assert_eq!(graph.vertex(from).unwrap().out_edges(), &[edge]);
        assert_eq!(graph.vertex(to).unwrap().in_edges(), &[edge]);
        assert!(graph.vertex(from).unwrap().in_edges().is_empty());

        let edge = graph.edge(edge).unwrap();
        assert_eq!(edge.from(), from);
        assert_eq!(edge.to(), to);
        assert!(edge.is_primary());
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let mut graph = Graph::new();
        let from = graph.get_or_create_vertex(&Destination::from_ref(broker_ref()));
        let to = graph.get_or_create_vertex(&Destination::from_uri("https://knative.dev"));
        let declared_by = Destination::from_ref(broker_ref());

        let a = graph.add_edge(from, to, &declared_by, Transform::NoTransform, false);
        let b = graph.add_edge(from, to, &declared_by, Transform::NoTransform, false);

        assert_ne!(a, b);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.out_edges(from).count(), 2);
        assert_eq!(graph.in_edges(to).count(), 2);
    }

    #[test]
    fn test_primary_lookup_requires_primary_flag() {
        let mut graph = Graph::new();
        let from = graph.get_or_create_vertex(&Destination::from_ref(broker_ref()));
        let to = graph.get_or_create_vertex(&Destination::from_uri("https://knative.dev"));
        let trigger = KReference::new("eventing.knative.dev/v1", "Trigger", "default", "t");

        graph.add_edge(
            from,
            to,
            &Destination::from_ref(trigger.clone()),
            Transform::NoTransform,
            false,
        );
        assert!(graph.primary_out_edge_with_ref(&trigger).is_none());

        let dls = graph.get_or_create_vertex(&Destination::from_uri("http://dls"));
        let primary = graph.add_edge(
            from,
            dls,
            &Destination::from_ref(trigger.clone()),
            Transform::NoTransform,
            true,
        );
        assert_eq!(
            graph.primary_out_edge_with_ref(&trigger).map(Edge::id),
            Some(primary)
        );
    }

    #[test]
    fn test_primary_lookup_follows_insertion_order() {
        let mut graph = Graph::new();
        let early = graph.get_or_create_vertex(&Destination::from_uri("http://a"));
        let late = graph.get_or_create_vertex(&Destination::from_uri("http://b"));
        let sink = graph.get_or_create_vertex(&Destination::from_uri("http://sink"));
        let declared_by = Destination::from_ref(broker_ref());

        // Inserted first, but leaves the later vertex
        let first = graph.add_edge(late, sink, &declared_by, Transform::NoTransform, true);
        graph.add_edge(early, sink, &declared_by, Transform::NoTransform, true);

        assert_eq!(
            graph.primary_out_edge_with_ref(&broker_ref()).map(Edge::id),
            Some(first)
        );
    }

    #[test]
    fn test_unknown_vertex_has_no_edges() {
        let graph = Graph::new();
        assert_eq!(graph.out_edges(VertexId(3)).count(), 0);
        assert_eq!(graph.in_edges(VertexId(3)).count(), 0);
        assert!(graph.find_vertex(&Destination::from_ref(broker_ref())).is_none());
    }
}
