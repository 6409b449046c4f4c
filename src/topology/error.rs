//! Errors raised while listing resources and building the graph

use crate::models::KReference;

/// Failure listing one kind of resource
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("resource not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,

    #[error("API request failed: {0}")]
    Request(#[source] kube::Error),

    #[error("failed to decode listed object: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ListError {
    /// Whether the failure means "this kind is absent or hidden here"
    ///
    /// Such failures are treated as an empty list rather than aborting.
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            ListError::NotFound | ListError::Unauthorized | ListError::Forbidden
        )
    }
}

impl From<kube::Error> for ListError {
    fn from(err: kube::Error) -> Self {
        match &err {
            kube::Error::Api(response) => match response.code {
                404 => ListError::NotFound,
                401 => ListError::Unauthorized,
                403 => ListError::Forbidden,
                _ => ListError::Request(err),
            },
            _ => ListError::Request(err),
        }
    }
}

/// Failure building the topology graph
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("trigger {namespace}/{name} refers to a non-existent broker {broker}, can't add it to the graph")]
    MissingBroker {
        namespace: String,
        name: String,
        broker: String,
    },

    #[error("subscription {namespace}/{name} refers to a non-existent channel {channel}, can't add it to the graph")]
    MissingChannel {
        namespace: String,
        name: String,
        channel: String,
    },

    #[error("event type {namespace}/{name}: referenced {} {}/{} has no primary outward edge", .reference.kind, .reference.namespace, .reference.name)]
    MissingPrimaryEdge {
        namespace: String,
        name: String,
        reference: KReference,
    },

    #[error("failed to list {kind} in namespace {namespace}: {source}")]
    List {
        kind: String,
        namespace: String,
        #[source]
        source: ListError,
    },

    #[error("failed to list source CRDs: {0}")]
    ListSourceCrds(#[source] ListError),

    #[error("failed to connect to the cluster: {0}")]
    Client(#[source] anyhow::Error),
}

/// Failure decoding a source CRD or source instance during discovery
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("missing field {0}")]
    MissingField(&'static str),

    #[error("no served version")]
    NoServedVersion,

    #[error("sink is neither an object reference nor an absolute URI")]
    InvalidSink,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignorable_list_errors() {
        assert!(ListError::NotFound.is_ignorable());
        assert!(ListError::Unauthorized.is_ignorable());
        assert!(ListError::Forbidden.is_ignorable());

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!ListError::from(json_err).is_ignorable());
    }

    #[test]
    fn test_missing_primary_edge_message() {
        let err = GraphError::MissingPrimaryEdge {
            namespace: "default".to_string(),
            name: "dev.knative.ping".to_string(),
            reference: KReference::new("eventing.knative.dev/v1", "Trigger", "default", "t1"),
        };
        assert_eq!(
            err.to_string(),
            "event type default/dev.knative.ping: referenced Trigger default/t1 has no primary outward edge"
        );
    }

    #[test]
    fn test_source_crd_error_names_no_namespace() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = GraphError::ListSourceCrds(ListError::from(json_err));
        let message = err.to_string();
        assert!(message.starts_with("failed to list source CRDs: "));
        assert!(!message.contains("namespace"));
    }
}
