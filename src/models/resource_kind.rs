//! Eventing resource kind definitions
//!
//! Centralized enum for the statically known eventing resource kinds. Keeps
//! group/version/plural strings in one place so listing and identity
//! construction never disagree about them.

use kube::core::ApiResource;
use std::fmt;
use std::str::FromStr;

/// Statically known eventing resource kinds
///
/// Sources are deliberately absent: they are discovered at runtime from CRDs
/// carrying the source label, see [`crate::topology::discovery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventingKind {
    // eventing.knative.dev
    Broker,
    Trigger,
    EventType,
    // messaging.knative.dev
    Channel,
    Subscription,
}

impl EventingKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            EventingKind::Broker => "Broker",
            EventingKind::Trigger => "Trigger",
            EventingKind::EventType => "EventType",
            EventingKind::Channel => "Channel",
            EventingKind::Subscription => "Subscription",
        }
    }

    /// API group serving this kind
    pub fn group(&self) -> &'static str {
        match self {
            EventingKind::Broker | EventingKind::Trigger | EventingKind::EventType => {
                "eventing.knative.dev"
            }
            EventingKind::Channel | EventingKind::Subscription => "messaging.knative.dev",
        }
    }

    /// API version listed and used for graph identities
    pub fn version(&self) -> &'static str {
        match self {
            EventingKind::EventType => "v1beta3",
            _ => "v1",
        }
    }

    /// Full `group/version` string
    pub fn api_version(&self) -> &'static str {
        match self {
            EventingKind::Broker | EventingKind::Trigger => "eventing.knative.dev/v1",
            EventingKind::EventType => "eventing.knative.dev/v1beta3",
            EventingKind::Channel | EventingKind::Subscription => "messaging.knative.dev/v1",
        }
    }

    /// Plural resource name
    pub fn plural(&self) -> &'static str {
        match self {
            EventingKind::Broker => "brokers",
            EventingKind::Trigger => "triggers",
            EventingKind::EventType => "eventtypes",
            EventingKind::Channel => "channels",
            EventingKind::Subscription => "subscriptions",
        }
    }

    /// Build the dynamic `ApiResource` used to list this kind
    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group().to_string(),
            version: self.version().to_string(),
            api_version: self.api_version().to_string(),
            kind: self.as_str().to_string(),
            plural: self.plural().to_string(),
        }
    }

    /// Try to parse a string into an EventingKind, returning None if invalid
    pub fn parse_optional(s: &str) -> Option<Self> {
        s.parse().ok()
    }

    /// All statically known kinds, in ingestion order
    pub fn all() -> &'static [Self] {
        &[
            EventingKind::Broker,
            EventingKind::Channel,
            EventingKind::Trigger,
            EventingKind::Subscription,
            EventingKind::EventType,
        ]
    }

    /// Try to parse a string (case-insensitive, plurals and short names) into an EventingKind
    pub fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "broker" | "brokers" => Some(EventingKind::Broker),
            "trigger" | "triggers" => Some(EventingKind::Trigger),
            "eventtype" | "eventtypes" | "et" => Some(EventingKind::EventType),
            "channel" | "channels" | "ch" => Some(EventingKind::Channel),
            "subscription" | "subscriptions" | "sub" => Some(EventingKind::Subscription),
            _ => None,
        }
    }
}

impl fmt::Display for EventingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<EventingKind> for String {
    fn from(kind: EventingKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for EventingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Broker" => Ok(EventingKind::Broker),
            "Trigger" => Ok(EventingKind::Trigger),
            "EventType" => Ok(EventingKind::EventType),
            "Channel" => Ok(EventingKind::Channel),
            "Subscription" => Ok(EventingKind::Subscription),
            _ => Err(format!("Unknown eventing resource kind: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_version_matches_group_and_version() {
        for kind in EventingKind::all() {
            assert_eq!(
                kind.api_version(),
                format!("{}/{}", kind.group(), kind.version())
            );
        }
    }

    #[test]
    fn test_api_resource() {
        let ar = EventingKind::EventType.api_resource();
        assert_eq!(ar.group, "eventing.knative.dev");
        assert_eq!(ar.version, "v1beta3");
        assert_eq!(ar.api_version, "eventing.knative.dev/v1beta3");
        assert_eq!(ar.kind, "EventType");
        assert_eq!(ar.plural, "eventtypes");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            EventingKind::parse_optional("Trigger"),
            Some(EventingKind::Trigger)
        );
        assert_eq!(EventingKind::parse_optional("trigger"), None);
        assert_eq!(EventingKind::parse_optional("PingSource"), None);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(
            EventingKind::from_str_case_insensitive("subscriptions"),
            Some(EventingKind::Subscription)
        );
        assert_eq!(
            EventingKind::from_str_case_insensitive("ET"),
            Some(EventingKind::EventType)
        );
        assert_eq!(EventingKind::from_str_case_insensitive("pods"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EventingKind::Channel), "Channel");
        let s: String = EventingKind::Broker.into();
        assert_eq!(s, "Broker");
    }
}
