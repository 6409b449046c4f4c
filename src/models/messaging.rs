//! `messaging.knative.dev` resources: Channel and Subscription

use super::duck::{DeliverySpec, Destination};
use kube::core::object::{NotUsed, Object};
use serde::{Deserialize, Serialize};

/// A Channel: a durable event forwarding point that Subscriptions attach to
pub type Channel = Object<ChannelSpec, NotUsed>;

/// A Subscription: connects a Channel to a subscriber and optional reply
pub type Subscription = Object<SubscriptionSpec, NotUsed>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSpec {
    /// Template of the backing channel implementation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_template: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliverySpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSpec {
    /// The channel this subscription reads from, always in the Subscription's namespace
    pub channel: ChannelReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscriber: Option<Destination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<Destination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliverySpec>,
}

/// Namespace-less reference to a channel-like object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelReference {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub name: String,
}
