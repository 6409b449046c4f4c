//! Dynamic discovery of source kinds
//!
//! Sources are not a fixed set of kinds: any CRD labelled
//! `duck.knative.dev/source=true` declares one. Discovery reads the group,
//! served version and plural name from each such CRD, and decodes listed
//! instances into the normalized [`Source`] shape.
//!
//! Everything here works on raw JSON so that one malformed or foreign CRD
//! only costs that CRD, never the whole scan.

use super::error::DecodeError;
use crate::models::Source;
use kube::core::{ApiResource, TypeMeta};
use serde_json::Value;

/// Label selector identifying source CRDs
pub const SOURCE_CRD_LABEL_SELECTOR: &str = "duck.knative.dev/source=true";

/// `ApiResource` for listing CustomResourceDefinitions dynamically
pub fn crd_api_resource() -> ApiResource {
    ApiResource {
        group: "apiextensions.k8s.io".to_string(),
        version: "v1".to_string(),
        api_version: "apiextensions.k8s.io/v1".to_string(),
        kind: "CustomResourceDefinition".to_string(),
        plural: "customresourcedefinitions".to_string(),
    }
}

/// A source kind discovered from its CRD
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceKind {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
}

impl SourceKind {
    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource {
            group: self.group.clone(),
            version: self.version.clone(),
            api_version: self.api_version(),
            kind: self.kind.clone(),
            plural: self.plural.clone(),
        }
    }
}

/// Read group, served version and plural name from a source CRD
///
/// The first version marked `served` wins. CRDs without a `versions` list
/// fall back to the legacy single `spec.version` field.
pub fn source_kind_from_crd(crd: &Value) -> Result<SourceKind, DecodeError> {
    let spec = crd.get("spec").ok_or(DecodeError::MissingField("spec"))?;

    let group = spec
        .get("group")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingField("spec.group"))?;

    let version = match spec.get("versions").and_then(Value::as_array) {
        Some(versions) if !versions.is_empty() => versions
            .iter()
            .find(|v| v.get("served").and_then(Value::as_bool) == Some(true))
            .and_then(|v| v.get("name"))
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or(DecodeError::NoServedVersion)?,
        _ => spec
            .get("version")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
            .ok_or(DecodeError::MissingField("spec.version"))?,
    };

    let names = spec.get("names");
    let plural = names
        .and_then(|n| n.get("plural"))
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingField("spec.names.plural"))?;
    let kind = names
        .and_then(|n| n.get("kind"))
        .and_then(Value::as_str)
        .unwrap_or_default();

    Ok(SourceKind {
        group: group.to_string(),
        version: version.to_string(),
        kind: kind.to_string(),
        plural: plural.to_string(),
    })
}

/// Decode a listed source instance into the normalized source shape
///
/// Type metadata missing from the listed object is filled in from the kind
/// it was listed as. The sink must be an object reference or an absolute URI.
pub fn source_from_value(value: Value, source_kind: &SourceKind) -> Result<Source, DecodeError> {
    let mut source: Source = serde_json::from_value(value)?;

    if source.metadata.name.as_deref().unwrap_or_default().is_empty() {
        return Err(DecodeError::MissingField("metadata.name"));
    }

    let types_missing = source
        .types
        .as_ref()
        .map(|t| t.kind.is_empty() || t.api_version.is_empty())
        .unwrap_or(true);
    if types_missing {
        source.types = Some(TypeMeta {
            api_version: source_kind.api_version(),
            kind: source_kind.kind.clone(),
        });
    }

    let sink = &source.spec.sink;
    if sink.reference.is_none() && !sink.has_absolute_uri() {
        return Err(DecodeError::InvalidSink);
    }

    Ok(source)
}
