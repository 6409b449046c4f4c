//! Resource listing
//!
//! [`EventingLister`] is everything the graph constructor needs from the
//! cluster. [`KubeLister`] implements it with kube-rs; tests substitute a mock.

use crate::models::{Broker, Channel, EventType, EventingKind, Subscription, Trigger};
use crate::topology::discovery::{SOURCE_CRD_LABEL_SELECTOR, SourceKind, crd_api_resource};
use crate::topology::error::ListError;
use async_trait::async_trait;
use kube::Api;
use kube::api::ListParams;
use kube::core::DynamicObject;
use kube::core::object::{NotUsed, Object};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;

/// Lists eventing resources, one kind and namespace at a time
///
/// Errors must classify "kind absent / not allowed" as [`ListError::NotFound`],
/// [`ListError::Unauthorized`] or [`ListError::Forbidden`] so the constructor
/// can tolerate them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventingLister: Send + Sync {
    async fn list_brokers(&self, namespace: &str) -> Result<Vec<Broker>, ListError>;

    async fn list_channels(&self, namespace: &str) -> Result<Vec<Channel>, ListError>;

    async fn list_triggers(&self, namespace: &str) -> Result<Vec<Trigger>, ListError>;

    async fn list_subscriptions(&self, namespace: &str) -> Result<Vec<Subscription>, ListError>;

    async fn list_event_types(&self, namespace: &str) -> Result<Vec<EventType>, ListError>;

    /// CRDs carrying the source label, as raw JSON
    async fn list_source_crds(&self) -> Result<Vec<Value>, ListError>;

    /// Instances of one discovered source kind, as raw JSON
    async fn list_source_instances(
        &self,
        source_kind: &SourceKind,
        namespace: &str,
    ) -> Result<Vec<Value>, ListError>;
}

/// [`EventingLister`] backed by the Kubernetes API
#[derive(Clone)]
pub struct KubeLister {
    client: kube::Client,
}

impl KubeLister {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying Kubernetes client
    pub fn client(&self) -> &kube::Client {
        &self.client
    }

    async fn list_typed<P>(
        &self,
        kind: EventingKind,
        namespace: &str,
    ) -> Result<Vec<Object<P, NotUsed>>, ListError>
    where
        P: Clone + Debug + DeserializeOwned + Send + Sync + 'static,
    {
        let api: Api<Object<P, NotUsed>> =
            Api::namespaced_with(self.client.clone(), namespace, &kind.api_resource());
        let list = api.list(&ListParams::default()).await?;
        tracing::debug!(
            "Listed {} {} in namespace {}",
            list.items.len(),
            kind.plural(),
            namespace
        );
        Ok(list.items)
    }
}

fn to_values(objects: Vec<DynamicObject>) -> Result<Vec<Value>, ListError> {
    objects
        .iter()
        .map(|obj| serde_json::to_value(obj).map_err(ListError::from))
        .collect()
}

#[async_trait]
impl EventingLister for KubeLister {
    async fn list_brokers(&self, namespace: &str) -> Result<Vec<Broker>, ListError> {
        self.list_typed(EventingKind::Broker, namespace).await
    }

    async fn list_channels(&self, namespace: &str) -> Result<Vec<Channel>, ListError> {
        self.list_typed(EventingKind::Channel, namespace).await
    }

    async fn list_triggers(&self, namespace: &str) -> Result<Vec<Trigger>, ListError> {
        self.list_typed(EventingKind::Trigger, namespace).await
    }

    async fn list_subscriptions(&self, namespace: &str) -> Result<Vec<Subscription>, ListError> {
        self.list_typed(EventingKind::Subscription, namespace).await
    }

    async fn list_event_types(&self, namespace: &str) -> Result<Vec<EventType>, ListError> {
        self.list_typed(EventingKind::EventType, namespace).await
    }

    async fn list_source_crds(&self) -> Result<Vec<Value>, ListError> {
        let api: Api<DynamicObject> = Api::all_with(self.client.clone(), &crd_api_resource());
        let params = ListParams::default().labels(SOURCE_CRD_LABEL_SELECTOR);
        let list = api.list(&params).await?;
        tracing::debug!("Found {} source CRDs", list.items.len());
        to_values(list.items)
    }

    async fn list_source_instances(
        &self,
        source_kind: &SourceKind,
        namespace: &str,
    ) -> Result<Vec<Value>, ListError> {
        let api: Api<DynamicObject> = Api::namespaced_with(
            self.client.clone(),
            namespace,
            &source_kind.api_resource(),
        );
        let list = api.list(&ListParams::default()).await?;
        to_values(list.items)
    }
}
