//! Graph construction from live cluster state
//!
//! Lists every kind in every requested namespace and feeds the resources the
//! caller's predicates accept into the graph, in dependency order:
//! Brokers, Channels, Sources, Triggers, Subscriptions. EventTypes are
//! ingested in a second pass once every namespace is done, so an EventType
//! may point at a Trigger or Subscription from any requested namespace.

use super::discovery::{SourceKind, source_from_value, source_kind_from_crd};
use super::error::{GraphError, ListError};
use super::graph::Graph;
use crate::cluster::{EventingLister, KubeLister, create_client};
use crate::config::Config;
use crate::models::{Broker, Channel, EventType, EventingKind, Source, Subscription, Trigger};
use kube::ResourceExt;

/// Inclusion predicate evaluated before a resource is ingested
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// What to build the graph from
pub struct ConstructorConfig {
    /// Namespaces to read, in order; there is no "all namespaces" wildcard
    pub namespaces: Vec<String>,
    pub should_add_broker: Predicate<Broker>,
    pub should_add_channel: Predicate<Channel>,
    pub should_add_source: Predicate<Source>,
    pub should_add_trigger: Predicate<Trigger>,
    pub should_add_subscription: Predicate<Subscription>,
    pub should_add_event_type: Predicate<EventType>,
}

impl ConstructorConfig {
    /// Read `namespaces`, accepting every resource
    pub fn new<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            namespaces: namespaces.into_iter().map(Into::into).collect(),
            should_add_broker: accept_all(),
            should_add_channel: accept_all(),
            should_add_source: accept_all(),
            should_add_trigger: accept_all(),
            should_add_subscription: accept_all(),
            should_add_event_type: accept_all(),
        }
    }

    /// Build predicates from file configuration
    ///
    /// Disabled kinds reject everything; otherwise resources carrying any of
    /// the configured skip labels are rejected.
    pub fn from_config(config: &Config) -> Self {
        let include = &config.include;
        let skip = &config.skip_labels;
        Self {
            namespaces: config.namespaces.clone(),
            should_add_broker: label_predicate(include.brokers, skip),
            should_add_channel: label_predicate(include.channels, skip),
            should_add_source: label_predicate(include.sources, skip),
            should_add_trigger: label_predicate(include.triggers, skip),
            should_add_subscription: label_predicate(include.subscriptions, skip),
            should_add_event_type: label_predicate(include.event_types, skip),
        }
    }

    pub fn with_broker_filter(mut self, f: impl Fn(&Broker) -> bool + Send + Sync + 'static) -> Self {
        self.should_add_broker = Box::new(f);
        self
    }

    pub fn with_channel_filter(
        mut self,
        f: impl Fn(&Channel) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.should_add_channel = Box::new(f);
        self
    }

    pub fn with_source_filter(mut self, f: impl Fn(&Source) -> bool + Send + Sync + 'static) -> Self {
        self.should_add_source = Box::new(f);
        self
    }

    pub fn with_trigger_filter(
        mut self,
        f: impl Fn(&Trigger) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.should_add_trigger = Box::new(f);
        self
    }

    pub fn with_subscription_filter(
        mut self,
        f: impl Fn(&Subscription) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.should_add_subscription = Box::new(f);
        self
    }

    pub fn with_event_type_filter(
        mut self,
        f: impl Fn(&EventType) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.should_add_event_type = Box::new(f);
        self
    }
}

fn accept_all<T: 'static>() -> Predicate<T> {
    Box::new(|_| true)
}

fn label_predicate<K: ResourceExt + 'static>(enabled: bool, skip_labels: &[String]) -> Predicate<K> {
    if !enabled {
        return Box::new(|_| false);
    }
    let skip_labels = skip_labels.to_vec();
    Box::new(move |obj: &K| {
        let labels = obj.labels();
        !skip_labels.iter().any(|key| labels.contains_key(key))
    })
}

/// Build the graph from the cluster described by file configuration
pub async fn construct_graph_from_config(config: &Config) -> Result<Graph, GraphError> {
    let client = create_client(config.context.as_deref())
        .await
        .map_err(GraphError::Client)?;
    construct_graph(client, &ConstructorConfig::from_config(config)).await
}

/// Build the graph from the cluster behind `client`
pub async fn construct_graph(
    client: kube::Client,
    config: &ConstructorConfig,
) -> Result<Graph, GraphError> {
    construct_graph_with(&KubeLister::new(client), config).await
}

/// Build the graph from any lister
///
/// On error the partially built graph is dropped; callers never see it.
pub async fn construct_graph_with<L>(
    lister: &L,
    config: &ConstructorConfig,
) -> Result<Graph, GraphError>
where
    L: EventingLister + ?Sized,
{
    let mut graph = Graph::new();
    let source_kinds = discover_source_kinds(lister).await?;

    for ns in &config.namespaces {
        tracing::debug!("Building topology for namespace {}", ns);

        let brokers = tolerate(EventingKind::Broker.as_str(), ns, lister.list_brokers(ns).await)?;
        for broker in &brokers {
            if (config.should_add_broker)(broker) {
                graph.add_broker(broker);
            }
        }

        let channels = tolerate(
            EventingKind::Channel.as_str(),
            ns,
            lister.list_channels(ns).await,
        )?;
        for channel in &channels {
            if (config.should_add_channel)(channel) {
                graph.add_channel(channel);
            }
        }

        for source in list_sources(lister, &source_kinds, ns).await {
            if (config.should_add_source)(&source) {
                graph.add_source(&source);
            }
        }

        let triggers = tolerate(
            EventingKind::Trigger.as_str(),
            ns,
            lister.list_triggers(ns).await,
        )?;
        for trigger in &triggers {
            if (config.should_add_trigger)(trigger) {
                graph.add_trigger(trigger)?;
            }
        }

        let subscriptions = tolerate(
            EventingKind::Subscription.as_str(),
            ns,
            lister.list_subscriptions(ns).await,
        )?;
        for subscription in &subscriptions {
            if (config.should_add_subscription)(subscription) {
                graph.add_subscription(subscription)?;
            }
        }
    }

    for ns in &config.namespaces {
        let event_types = tolerate(
            EventingKind::EventType.as_str(),
            ns,
            lister.list_event_types(ns).await,
        )?;
        for event_type in &event_types {
            if (config.should_add_event_type)(event_type) {
                graph.add_event_type(event_type)?;
            }
        }
    }

    tracing::info!(
        "Built event topology: {} vertices, {} edges across {} namespaces",
        graph.vertex_count(),
        graph.edge_count(),
        config.namespaces.len()
    );

    Ok(graph)
}

/// Treat "absent or hidden" listing failures as an empty list
fn tolerate<T>(
    kind: &str,
    namespace: &str,
    result: Result<Vec<T>, ListError>,
) -> Result<Vec<T>, GraphError> {
    match result {
        Ok(items) => Ok(items),
        Err(err) if err.is_ignorable() => {
            tracing::debug!(
                "Skipping {} in namespace {}: {}",
                kind,
                namespace,
                err
            );
            Ok(Vec::new())
        }
        Err(source) => Err(GraphError::List {
            kind: kind.to_string(),
            namespace: namespace.to_string(),
            source,
        }),
    }
}

/// Discover source kinds from labelled CRDs, skipping CRDs that don't decode
async fn discover_source_kinds<L>(lister: &L) -> Result<Vec<SourceKind>, GraphError>
where
    L: EventingLister + ?Sized,
{
    let crds = match lister.list_source_crds().await {
        Ok(crds) => crds,
        Err(err) if err.is_ignorable() => {
            tracing::debug!("Skipping source discovery: {}", err);
            Vec::new()
        }
        Err(err) => return Err(GraphError::ListSourceCrds(err)),
    };

    let mut kinds = Vec::new();
    for crd in &crds {
        match source_kind_from_crd(crd) {
            Ok(kind) => {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
            Err(e) => {
                let name = crd
                    .pointer("/metadata/name")
                    .and_then(|n| n.as_str())
                    .unwrap_or("<unnamed>");
                tracing::debug!("Skipping source CRD {}: {}", name, e);
            }
        }
    }

    tracing::debug!("Discovered {} source kinds", kinds.len());
    Ok(kinds)
}

/// List and decode sources of every discovered kind in one namespace
///
/// Listing or decoding failures only drop the affected kind or instance.
async fn list_sources<L>(lister: &L, kinds: &[SourceKind], namespace: &str) -> Vec<Source>
where
    L: EventingLister + ?Sized,
{
    let mut sources = Vec::new();
    for kind in kinds {
        let instances = match lister.list_source_instances(kind, namespace).await {
            Ok(instances) => instances,
            Err(e) => {
                tracing::warn!(
                    "Failed to list {} in namespace {}: {}",
                    kind.plural,
                    namespace,
                    e
                );
                continue;
            }
        };

        for instance in instances {
            match source_from_value(instance, kind) {
                Ok(source) => sources.push(source),
                Err(e) => tracing::debug!(
                    "Skipping malformed {} in namespace {}: {}",
                    kind.kind,
                    namespace,
                    e
                ),
            }
        }
    }
    sources
}
