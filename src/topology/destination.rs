//! Destination identity
//!
//! The graph keys vertices by the canonical form of a [`Destination`]. Only
//! the object reference and the URI participate; TLS and audience settings
//! do not change which node events land on.

use crate::models::{Destination, KReference};

/// Hashable, owned identity of a destination
///
/// Two destinations map to the same vertex iff their comparable forms are
/// equal. A reference-only destination never equals a URI-only destination,
/// even when both would resolve to the same live address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComparableDestination {
    reference: Option<KReference>,
    uri: Option<String>,
}

impl ComparableDestination {
    pub fn reference(&self) -> Option<&KReference> {
        self.reference.as_ref()
    }

    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }
}

impl From<&Destination> for ComparableDestination {
    fn from(dest: &Destination) -> Self {
        Self {
            reference: dest.reference.clone(),
            uri: dest.uri.clone(),
        }
    }
}

impl From<&KReference> for ComparableDestination {
    fn from(reference: &KReference) -> Self {
        Self {
            reference: Some(reference.clone()),
            uri: None,
        }
    }
}

/// Canonicalize a destination into its identity key
pub fn canonicalize(dest: &Destination) -> ComparableDestination {
    ComparableDestination::from(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_ref() -> KReference {
        KReference::new("serving.knative.dev/v1", "Service", "default", "display")
    }

    #[test]
    fn test_equal_references_are_equal() {
        let a = Destination::from_ref(service_ref());
        let b = Destination::from_ref(service_ref());
        assert_eq!(canonicalize(&a), canonicalize(&b));
    }

    #[test]
    fn test_identity_ignores_tls_and_audience() {
        let plain = Destination::from_uri("https://knative.dev");
        let with_tls = Destination {
            ca_certs: Some("cert".to_string()),
            audience: Some("aud".to_string()),
            ..Destination::from_uri("https://knative.dev")
        };
        assert_eq!(canonicalize(&plain), canonicalize(&with_tls));
    }

    #[test]
    fn test_reference_never_equals_uri() {
        let by_ref = Destination::from_ref(service_ref());
        let by_uri = Destination::from_uri("http://display.default.svc.cluster.local");
        assert_ne!(canonicalize(&by_ref), canonicalize(&by_uri));
    }

    #[test]
    fn test_no_partial_matches() {
        let a = Destination::from_ref(service_ref());
        let mut other_ns = service_ref();
        other_ns.namespace = "other".to_string();
        let b = Destination::from_ref(other_ns);
        assert_ne!(canonicalize(&a), canonicalize(&b));

        let mut other_version = service_ref();
        other_version.api_version = "serving.knative.dev/v1beta1".to_string();
        assert_ne!(canonicalize(&a), canonicalize(&Destination::from_ref(other_version)));
    }

    #[test]
    fn test_reference_conversion_matches_destination() {
        let reference = service_ref();
        assert_eq!(
            ComparableDestination::from(&reference),
            canonicalize(&Destination::from_ref(reference.clone()))
        );
    }
}
