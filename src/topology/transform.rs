//! Edge transforms
//!
//! Every edge carries a [`Transform`] describing what happens to an event's
//! shape when it crosses the hop. The set of variants is closed; consumers are
//! expected to match on it exhaustively.

use crate::models::{CloudEventOverrides, EventType, TriggerFilter};
use std::collections::BTreeMap;

/// Effect an edge has on the events crossing it
#[derive(Debug, Clone)]
pub enum Transform {
    /// Events pass through unchanged
    NoTransform,
    /// The hop is documented to carry events of this type
    EventType(Box<EventType>),
    /// Only events matching the Trigger's legacy attribute filter cross
    AttributesFilter(TriggerFilter),
    /// The Source stamps these extension attributes onto egress events
    CloudEventOverrides(Option<CloudEventOverrides>),
}

impl Transform {
    /// Short stable name, suitable for logs and rendering
    pub fn name(&self) -> &'static str {
        match self {
            Transform::NoTransform => "no-transform",
            Transform::EventType(_) => "event-type",
            Transform::AttributesFilter(_) => "attributes-filter",
            Transform::CloudEventOverrides(_) => "cloudevent-overrides",
        }
    }

    pub fn is_no_transform(&self) -> bool {
        matches!(self, Transform::NoTransform)
    }

    /// Apply the transform to an event shape
    ///
    /// Returns `None` when no event of the given shape can cross the edge.
    pub fn apply(&self, shape: &EventShape) -> Option<EventShape> {
        match self {
            Transform::NoTransform => Some(shape.clone()),
            Transform::EventType(event_type) => {
                let mut out = shape.clone();
                for attr in &event_type.spec.attributes {
                    out.constrain(&attr.name, attr.required, attr.value.as_deref())?;
                }
                Some(out)
            }
            Transform::AttributesFilter(filter) => {
                let mut out = shape.clone();
                for (name, value) in &filter.attributes {
                    let value = (!value.is_empty()).then_some(value.as_str());
                    out.constrain(name, true, value)?;
                }
                Some(out)
            }
            Transform::CloudEventOverrides(overrides) => {
                let mut out = shape.clone();
                if let Some(overrides) = overrides {
                    for (name, value) in &overrides.extensions {
                        out.attributes.insert(
                            name.clone(),
                            AttributeConstraint {
                                required: true,
                                value: Some(value.clone()),
                            },
                        );
                    }
                }
                Some(out)
            }
        }
    }
}

/// What is known about a CloudEvent attribute at some point of the topology
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeConstraint {
    pub required: bool,
    /// Fixed value, `None` when any value is possible
    pub value: Option<String>,
}

/// The set of attribute constraints an event is known to satisfy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventShape {
    pub attributes: BTreeMap<String, AttributeConstraint>,
}

impl EventShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shape declared by an EventType's attribute definitions
    pub fn from_event_type(event_type: &EventType) -> Self {
        let attributes = event_type
            .spec
            .attributes
            .iter()
            .map(|attr| {
                (
                    attr.name.clone(),
                    AttributeConstraint {
                        required: attr.required,
                        value: attr.value.clone(),
                    },
                )
            })
            .collect();
        Self { attributes }
    }

    /// Fixed value of an attribute, if known
    pub fn value(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(|a| a.value.as_deref())
    }

    /// Narrow an attribute; `None` when the narrowing contradicts a fixed value
    fn constrain(&mut self, name: &str, required: bool, value: Option<&str>) -> Option<()> {
        let entry = self.attributes.entry(name.to_string()).or_default();
        entry.required |= required;
        match (entry.value.as_deref(), value) {
            (Some(existing), Some(wanted)) if existing != wanted => None,
            (None, Some(wanted)) => {
                entry.value = Some(wanted.to_string());
                Some(())
            }
            _ => Some(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EventAttributeDefinition, EventTypeSpec, EventingKind, new_eventing_object};

    fn event_type(attrs: &[(&str, Option<&str>)]) -> EventType {
        new_eventing_object(
            EventingKind::EventType,
            "default",
            "dev.knative.example",
            EventTypeSpec {
                attributes: attrs
                    .iter()
                    .map(|(name, value)| EventAttributeDefinition {
                        name: name.to_string(),
                        required: true,
                        value: value.map(str::to_string),
                    })
                    .collect(),
                ..Default::default()
            },
        )
    }

    fn filter(attrs: &[(&str, &str)]) -> TriggerFilter {
        TriggerFilter {
            attributes: attrs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[test]
    fn test_no_transform_passes_through() {
        let shape = EventShape::from_event_type(&event_type(&[("type", Some("a"))]));
        assert_eq!(Transform::NoTransform.apply(&shape), Some(shape));
    }

    #[test]
    fn test_filter_rejects_conflicting_type() {
        let shape = EventShape::from_event_type(&event_type(&[("type", Some("a"))]));
        let transform = Transform::AttributesFilter(filter(&[("type", "b")]));
        assert_eq!(transform.apply(&shape), None);
    }

    #[test]
    fn test_filter_narrows_open_attribute() {
        let shape = EventShape::from_event_type(&event_type(&[("source", None)]));
        let transform = Transform::AttributesFilter(filter(&[("source", "/ping"), ("type", "")]));
        let out = transform.apply(&shape).unwrap();
        assert_eq!(out.value("source"), Some("/ping"));
        assert!(out.attributes["type"].required);
        assert_eq!(out.value("type"), None);
    }

    #[test]
    fn test_event_type_transform_merges_attributes() {
        let shape = EventShape::from_event_type(&event_type(&[("source", Some("/s"))]));
        let transform = Transform::EventType(Box::new(event_type(&[("type", Some("t"))])));
        let out = transform.apply(&shape).unwrap();
        assert_eq!(out.value("source"), Some("/s"));
        assert_eq!(out.value("type"), Some("t"));

        let conflicting = Transform::EventType(Box::new(event_type(&[("source", Some("/x"))])));
        assert_eq!(conflicting.apply(&shape), None);
    }

    #[test]
    fn test_overrides_set_extensions() {
        let mut extensions = BTreeMap::new();
        extensions.insert("team".to_string(), "payments".to_string());
        let transform = Transform::CloudEventOverrides(Some(CloudEventOverrides { extensions }));
        let out = transform.apply(&EventShape::new()).unwrap();
        assert_eq!(out.value("team"), Some("payments"));

        assert_eq!(
            Transform::CloudEventOverrides(None).apply(&EventShape::new()),
            Some(EventShape::new())
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(Transform::NoTransform.name(), "no-transform");
        assert_eq!(
            Transform::AttributesFilter(TriggerFilter::default()).name(),
            "attributes-filter"
        );
        assert!(Transform::NoTransform.is_no_transform());
        assert!(!Transform::CloudEventOverrides(None).is_no_transform());
    }
}
