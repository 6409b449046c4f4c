//! Eventing resource model layer
//!
//! Rust types for the eventing resources the topology is built from.
//!
//! Structure:
//! - `duck` - Shared duck-typed shapes (destinations, delivery, overrides)
//! - `eventing` - Broker, Trigger, EventType
//! - `messaging` - Channel, Subscription
//! - `source` - Normalized source duck shape
//! - `resource_kind` - Group/version/plural metadata per kind

pub mod duck;
pub mod eventing;
pub mod messaging;
pub mod resource_kind;
pub mod source;

pub use duck::{CloudEventOverrides, DeliverySpec, Destination, KReference};
pub use eventing::{
    Broker, BrokerSpec, EventAttributeDefinition, EventType, EventTypeSpec, Trigger, TriggerFilter,
    TriggerSpec,
};
pub use messaging::{Channel, ChannelReference, ChannelSpec, Subscription, SubscriptionSpec};
pub use resource_kind::EventingKind;
pub use source::{Source, SourceSpec};

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::TypeMeta;
use kube::core::object::{NotUsed, Object};

/// Build a namespaced object of the given type, as the API server would return it
///
/// Handy for fixtures and for callers feeding the graph without a cluster.
pub fn new_object<P: Clone>(
    api_version: &str,
    kind: &str,
    namespace: &str,
    name: &str,
    spec: P,
) -> Object<P, NotUsed> {
    Object {
        types: Some(TypeMeta {
            api_version: api_version.to_string(),
            kind: kind.to_string(),
        }),
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec,
        status: None,
    }
}

/// Build an object of a statically known eventing kind
pub fn new_eventing_object<P: Clone>(
    kind: EventingKind,
    namespace: &str,
    name: &str,
    spec: P,
) -> Object<P, NotUsed> {
    new_object(kind.api_version(), kind.as_str(), namespace, name, spec)
}
