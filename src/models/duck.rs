//! Duck-typed shapes shared across eventing resources
//!
//! These mirror the `duck.knative.dev` wire types: destinations, object
//! references, delivery configuration and CloudEvent overrides. Only the
//! fields the topology needs are modelled; unknown fields are ignored on decode.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference to a namespaced object, addressable by apiVersion/kind/namespace/name
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KReference {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
}

impl KReference {
    pub fn new(
        api_version: impl Into<String>,
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

/// Where events are sent: an object reference or a URI
///
/// `ca_certs` and `audience` are carried for completeness but never take part
/// in graph identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<KReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(rename = "CACerts", default, skip_serializing_if = "Option::is_none")]
    pub ca_certs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
}

impl Destination {
    /// Destination pointing at an object reference
    pub fn from_ref(reference: KReference) -> Self {
        Self {
            reference: Some(reference),
            ..Default::default()
        }
    }

    /// Destination pointing at a URI
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
            ..Default::default()
        }
    }

    /// True when neither a reference nor a URI is set
    pub fn is_empty(&self) -> bool {
        self.reference.is_none() && self.uri.is_none()
    }

    /// True when a URI is set and parses as an absolute URL
    pub fn has_absolute_uri(&self) -> bool {
        self.uri
            .as_deref()
            .map(|uri| url::Url::parse(uri).is_ok())
            .unwrap_or(false)
    }
}

impl From<KReference> for Destination {
    fn from(reference: KReference) -> Self {
        Destination::from_ref(reference)
    }
}

/// Delivery options attached to brokers, channels, triggers and subscriptions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_letter_sink: Option<Destination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backoff_delay: Option<String>,
}

/// Returns the dead-letter sink configured on an optional delivery spec
pub fn dead_letter_sink(delivery: &Option<DeliverySpec>) -> Option<&Destination> {
    delivery.as_ref().and_then(|d| d.dead_letter_sink.as_ref())
}

/// Extension attributes a source stamps onto every event it emits
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudEventOverrides {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_destination_wire_names() {
        let dest: Destination = serde_json::from_value(json!({
            "ref": {
                "apiVersion": "serving.knative.dev/v1",
                "kind": "Service",
                "namespace": "default",
                "name": "event-display"
            },
            "CACerts": "-----BEGIN CERTIFICATE-----",
            "audience": "event-display"
        }))
        .unwrap();

        let reference = dest.reference.as_ref().unwrap();
        assert_eq!(reference.api_version, "serving.knative.dev/v1");
        assert_eq!(reference.name, "event-display");
        assert_eq!(dest.ca_certs.as_deref(), Some("-----BEGIN CERTIFICATE-----"));
        assert_eq!(dest.uri, None);
    }

    #[test]
    fn test_absolute_uri_check() {
        assert!(Destination::from_uri("https://knative.dev").has_absolute_uri());
        assert!(!Destination::from_uri("/relative/path").has_absolute_uri());
        assert!(!Destination::default().has_absolute_uri());
        assert!(Destination::default().is_empty());
    }

    #[test]
    fn test_dead_letter_sink_helper() {
        let delivery = Some(DeliverySpec {
            dead_letter_sink: Some(Destination::from_uri("http://dls.default.svc")),
            ..Default::default()
        });
        assert_eq!(
            dead_letter_sink(&delivery).and_then(|d| d.uri.as_deref()),
            Some("http://dls.default.svc")
        );
        assert!(dead_letter_sink(&None).is_none());
        assert!(dead_letter_sink(&Some(DeliverySpec::default())).is_none());
    }
}
