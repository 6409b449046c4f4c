//! `eventing.knative.dev` resources: Broker, Trigger and EventType

use super::duck::{DeliverySpec, Destination, KReference};
use kube::core::object::{NotUsed, Object};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A Broker: an event mesh that fans events out to Triggers
pub type Broker = Object<BrokerSpec, NotUsed>;

/// A Trigger: subscribes a destination to a Broker, optionally filtered
pub type Trigger = Object<TriggerSpec, NotUsed>;

/// An EventType: asserts that a CloudEvent type is observable at a reference
pub type EventType = Object<EventTypeSpec, NotUsed>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerSpec {
    /// Implementation-specific configuration object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<KReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliverySpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSpec {
    /// Name of the Broker in the Trigger's own namespace
    #[serde(default)]
    pub broker: String,
    /// Legacy exact-match attribute filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<TriggerFilter>,
    /// SQL-style subscriptions API filters; when present they supersede `filter`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<serde_json::Value>,
    #[serde(default)]
    pub subscriber: Destination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliverySpec>,
}

/// Exact-match attribute filter; an empty value matches any value of that attribute
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerFilter {
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventTypeSpec {
    /// Where this event type can be observed (a Broker, Channel, Trigger, Source, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<KReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<EventAttributeDefinition>,
}

/// A single CloudEvent attribute declared by an EventType
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttributeDefinition {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
