//! Per-kind ingestion into the topology graph
//!
//! Each `add_*` method turns one resource into vertices and edges. Triggers
//! and Subscriptions need their Broker/Channel vertex to exist already, and
//! EventTypes bound to a Trigger/Subscription need that resource's primary
//! edge, so callers must ingest in dependency order (see
//! [`super::constructor`]).

use super::error::GraphError;
use super::graph::Graph;
use super::transform::Transform;
use crate::models::duck::dead_letter_sink;
use crate::models::{
    Broker, Channel, Destination, EventType, EventingKind, KReference, Source, Subscription,
    Trigger,
};
use kube::ResourceExt;

/// Kind label used for Channels listed without type metadata
const DEFAULT_CHANNEL_KIND: &str = "Channel";

/// Identity of a statically known eventing resource
fn eventing_ref(kind: EventingKind, namespace: &str, name: &str) -> KReference {
    KReference::new(kind.api_version(), kind.as_str(), namespace, name)
}

impl Graph {
    /// Add a Broker and, if configured, its dead-letter sink edge
    pub fn add_broker(&mut self, broker: &Broker) {
        let namespace = broker.namespace().unwrap_or_default();
        let dest = Destination::from_ref(eventing_ref(
            EventingKind::Broker,
            &namespace,
            &broker.name_any(),
        ));
        let v = self.get_or_create_vertex(&dest);

        let Some(dls) = dead_letter_sink(&broker.spec.delivery) else {
            return;
        };

        let to = self.get_or_create_vertex(dls);
        self.add_edge(v, to, &dest, Transform::NoTransform, true);
    }

    /// Add a Channel and, if configured, its dead-letter sink edge
    ///
    /// The kind label comes from the object's type metadata, falling back to
    /// `Channel` when the API server omitted it.
    pub fn add_channel(&mut self, channel: &Channel) {
        let kind = channel
            .types
            .as_ref()
            .map(|t| t.kind.as_str())
            .filter(|k| !k.is_empty())
            .unwrap_or(DEFAULT_CHANNEL_KIND);
        let dest = Destination::from_ref(KReference::new(
            EventingKind::Channel.api_version(),
            kind,
            channel.namespace().unwrap_or_default(),
            channel.name_any(),
        ));
        let v = self.get_or_create_vertex(&dest);

        let Some(dls) = dead_letter_sink(&channel.spec.delivery) else {
            return;
        };

        let to = self.get_or_create_vertex(dls);
        self.add_edge(v, to, &dest, Transform::NoTransform, true);
    }

    /// Add a Source and the edge to its sink, carrying its CloudEvent overrides
    pub fn add_source(&mut self, source: &Source) {
        let (api_version, kind) = source
            .types
            .as_ref()
            .map(|t| (t.api_version.clone(), t.kind.clone()))
            .unwrap_or_default();
        let dest = Destination::from_ref(KReference::new(
            api_version,
            kind,
            source.namespace().unwrap_or_default(),
            source.name_any(),
        ));
        let v = self.get_or_create_vertex(&dest);
        let to = self.get_or_create_vertex(&source.spec.sink);

        self.add_edge(
            v,
            to,
            &dest,
            Transform::CloudEventOverrides(source.spec.ce_overrides.clone()),
            true,
        );
    }

    /// Add a Trigger's dispatch edge and, if configured, its dead-letter sink edge
    ///
    /// Fails without touching the graph when the Trigger's Broker is unknown.
    pub fn add_trigger(&mut self, trigger: &Trigger) -> Result<(), GraphError> {
        let namespace = trigger.namespace().unwrap_or_default();
        let broker_dest = Destination::from_ref(eventing_ref(
            EventingKind::Broker,
            &namespace,
            &trigger.spec.broker,
        ));
        let Some(broker) = self.find_vertex(&broker_dest) else {
            return Err(GraphError::MissingBroker {
                namespace,
                name: trigger.name_any(),
                broker: trigger.spec.broker.clone(),
            });
        };

        let trigger_dest = Destination::from_ref(eventing_ref(
            EventingKind::Trigger,
            &namespace,
            &trigger.name_any(),
        ));

        let to = self.get_or_create_vertex(&trigger.spec.subscriber);
        self.add_edge(
            broker,
            to,
            &trigger_dest,
            transform_for_trigger(trigger),
            false,
        );

        let Some(dls) = dead_letter_sink(&trigger.spec.delivery) else {
            return Ok(());
        };

        let dls = self.get_or_create_vertex(dls);
        self.add_edge(broker, dls, &trigger_dest, Transform::NoTransform, true);

        Ok(())
    }

    /// Add a Subscription's dispatch, reply and dead-letter edges
    ///
    /// Fails without touching the graph when the Subscription's Channel is
    /// unknown. Without a subscriber, the reply edge leaves the channel
    /// directly since that is where replies originate.
    pub fn add_subscription(&mut self, subscription: &Subscription) -> Result<(), GraphError> {
        let namespace = subscription.namespace().unwrap_or_default();
        let channel_ref = &subscription.spec.channel;
        let channel_dest = Destination::from_ref(KReference::new(
            channel_ref.api_version.clone(),
            channel_ref.kind.clone(),
            namespace.clone(),
            channel_ref.name.clone(),
        ));
        let Some(channel) = self.find_vertex(&channel_dest) else {
            return Err(GraphError::MissingChannel {
                namespace,
                name: subscription.name_any(),
                channel: channel_ref.name.clone(),
            });
        };

        let subscription_dest = Destination::from_ref(eventing_ref(
            EventingKind::Subscription,
            &namespace,
            &subscription.name_any(),
        ));

        let mut reply_from = channel;
        if let Some(subscriber) = &subscription.spec.subscriber {
            let to = self.get_or_create_vertex(subscriber);
            self.add_edge(channel, to, &subscription_dest, Transform::NoTransform, false);
            reply_from = to;
        }

        if let Some(reply) = &subscription.spec.reply {
            let reply = self.get_or_create_vertex(reply);
            self.add_edge(
                reply_from,
                reply,
                &subscription_dest,
                Transform::NoTransform,
                false,
            );
        }

        let Some(dls) = dead_letter_sink(&subscription.spec.delivery) else {
            return Ok(());
        };

        let dls = self.get_or_create_vertex(dls);
        self.add_edge(
            channel,
            dls,
            &subscription_dest,
            Transform::NoTransform,
            true,
        );

        Ok(())
    }

    /// Attach an EventType to the topology
    ///
    /// Bound to a Trigger or Subscription, the event type is documented on a
    /// new edge running back along that resource's primary edge. Bound to
    /// anything else, it links its own vertex to the referenced one. An
    /// EventType without a reference only contributes its own vertex.
    pub fn add_event_type(&mut self, event_type: &EventType) -> Result<(), GraphError> {
        let namespace = event_type.namespace().unwrap_or_default();
        let dest = Destination::from_ref(eventing_ref(
            EventingKind::EventType,
            &namespace,
            &event_type.name_any(),
        ));
        let transform = Transform::EventType(Box::new(event_type.clone()));

        let Some(reference) = &event_type.spec.reference else {
            self.get_or_create_vertex(&dest);
            return Ok(());
        };

        if is_delivery_kind(&reference.kind) {
            let Some(edge) = self.primary_out_edge_with_ref(reference) else {
                return Err(GraphError::MissingPrimaryEdge {
                    namespace,
                    name: event_type.name_any(),
                    reference: reference.clone(),
                });
            };
            let (from, to) = (edge.to(), edge.from());
            self.add_edge(from, to, &dest, transform, false);
            return Ok(());
        }

        let from = self.get_or_create_vertex(&dest);
        let to = self.get_or_create_vertex(&Destination::from_ref(reference.clone()));
        self.add_edge(from, to, &dest, transform, false);

        Ok(())
    }
}

/// Trigger and Subscription references resolve through their primary edge
fn is_delivery_kind(kind: &str) -> bool {
    kind == EventingKind::Trigger.as_str() || kind == EventingKind::Subscription.as_str()
}

/// Legacy attribute filters become a transform; SQL `filters` supersede them
fn transform_for_trigger(trigger: &Trigger) -> Transform {
    match &trigger.spec.filter {
        Some(filter) if trigger.spec.filters.is_empty() => {
            Transform::AttributesFilter(filter.clone())
        }
        _ => Transform::NoTransform,
    }
}
