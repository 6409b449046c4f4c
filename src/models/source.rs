//! Normalized shape shared by every source kind
//!
//! Source CRDs differ wildly in their spec, but all of them embed the
//! `SourceSpec` duck fields. Instances are listed dynamically and decoded into
//! this shape.

use super::duck::{CloudEventOverrides, Destination};
use kube::core::object::{NotUsed, Object};
use serde::{Deserialize, Serialize};

/// Any resource conforming to the source duck type
pub type Source = Object<SourceSpec, NotUsed>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSpec {
    #[serde(default)]
    pub sink: Destination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ce_overrides: Option<CloudEventOverrides>,
}
