//! The field difference engine.
//!
//! Each entity type declares, once, a static table of its comparable
//! fields: the field name, a typed accessor, and a comparison mode. The
//! engine walks the caller-supplied field list in order and reports one
//! [`FieldChange`] per field whose values differ under its mode. There is
//! no reflection anywhere; an undeclared field is a configuration bug and
//! fails fast.

use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

use driftline_core::{DriftError, Result};

/// How a field's two values are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    /// Exact equality: identifiers, booleans, numbers.
    Identity,
    /// Exact text equality.
    TextExact,
    /// Case-insensitive text equality; used for canonical display names.
    TextCaseInsensitive,
    /// Order- and duplicate-insensitive comparison of a label collection.
    UnorderedTextSet,
}

/// A field value lifted out of an entity for comparison and reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Id(Uuid),
    OptionalId(Option<Uuid>),
    Bool(bool),
    Int(i64),
    Text(String),
    TextSet(Vec<String>),
}

/// One declared comparable field of an entity type.
pub struct FieldSpec<T> {
    /// The field name, as requested by callers.
    pub name: &'static str,
    /// Comparison mode.
    pub mode: CompareMode,
    /// Typed accessor lifting the value out of the entity.
    pub get: fn(&T) -> FieldValue,
}

/// An entity type with a declared field table.
pub trait Diffable: Sized + 'static {
    /// Entity type name used in error messages.
    const ENTITY: &'static str;

    /// The declared field table.
    fn fields() -> &'static [FieldSpec<Self>];

    /// All declared field names, in declaration order.
    fn field_names() -> Vec<&'static str> {
        Self::fields().iter().map(|spec| spec.name).collect()
    }
}

/// One detected difference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    /// The field name.
    pub field: String,
    /// Value on the before side.
    pub before: FieldValue,
    /// Value on the after side.
    pub after: FieldValue,
}

/// Compares the requested fields of two entity versions.
///
/// The output preserves the caller-supplied field order and contains only
/// fields that actually differ. Requesting a field the entity type does
/// not declare fails with [`DriftError::FieldNotSupported`].
pub fn compare<T: Diffable>(before: &T, after: &T, fields: &[&str]) -> Result<Vec<FieldChange>> {
    let specs = T::fields();
    let mut changes = Vec::new();

    for &name in fields {
        let spec = specs
            .iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| DriftError::FieldNotSupported {
                entity: T::ENTITY,
                field: name.to_string(),
            })?;

        let before_value = (spec.get)(before);
        let after_value = (spec.get)(after);
        if !values_equal(spec.mode, &before_value, &after_value) {
            changes.push(FieldChange {
                field: spec.name.to_string(),
                before: before_value,
                after: after_value,
            });
        }
    }

    Ok(changes)
}

fn values_equal(mode: CompareMode, before: &FieldValue, after: &FieldValue) -> bool {
    match (mode, before, after) {
        (CompareMode::TextCaseInsensitive, FieldValue::Text(a), FieldValue::Text(b)) => {
            a.to_lowercase() == b.to_lowercase()
        }
        (CompareMode::UnorderedTextSet, FieldValue::TextSet(a), FieldValue::TextSet(b)) => {
            a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
        }
        _ => before == after,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use driftline_core::{Component, ComponentId, LibraryId, ThreatId};

    fn component(name: &str, labels: &[&str]) -> Component {
        Component {
            id: ComponentId::from_uuid(Uuid::from_u128(1)),
            library_id: LibraryId::from_uuid(Uuid::from_u128(900)),
            name: name.to_string(),
            description: "A gateway".to_string(),
            component_type: None,
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn equal_entities_produce_no_changes() {
        let a = component("Gateway", &["edge", "net"]);
        let changes = compare(&a, &a.clone(), &["name", "description", "labels"]).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn case_and_label_order_are_not_changes() {
        // Scenario: Name "Foo" vs "foo", Labels [a,b] vs [b,a] compare equal.
        let before = component("Foo", &["a", "b"]);
        let after = component("foo", &["b", "a"]);
        let changes = compare(&before, &after, &["name", "labels"]).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn duplicate_labels_are_not_a_change() {
        let before = component("Gateway", &["a", "b"]);
        let after = component("Gateway", &["b", "a", "a"]);
        let changes = compare(&before, &after, &["labels"]).unwrap();
        assert!(changes.is_empty());
    }

    #[test]
    fn one_change_per_differing_field_in_requested_order() {
        let before = component("Gateway", &["a"]);
        let mut after = component("Proxy", &["b"]);
        after.description = "A proxy".to_string();

        let changes = compare(&before, &after, &["labels", "name", "description"]).unwrap();
        let fields: Vec<&str> = changes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["labels", "name", "description"]);
        assert_eq!(changes[1].before, FieldValue::Text("Gateway".to_string()));
        assert_eq!(changes[1].after, FieldValue::Text("Proxy".to_string()));
    }

    #[test]
    fn description_comparison_is_case_sensitive() {
        let before = component("Gateway", &[]);
        let mut after = before.clone();
        after.description = "A GATEWAY".to_string();
        let changes = compare(&before, &after, &["description"]).unwrap();
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn identity_mode_compares_optional_ids_exactly() {
        use driftline_core::ComponentTypeId;
        let before = component("Gateway", &[]);
        let mut after = before.clone();
        after.component_type = Some(ComponentTypeId::from_uuid(Uuid::from_u128(5)));
        let changes = compare(&before, &after, &["component_type"]).unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].before, FieldValue::OptionalId(None));
    }

    #[test]
    fn undeclared_field_names_entity_and_field() {
        // Scenario: an undeclared field is a fail-fast configuration error.
        let a = component("Gateway", &[]);
        let err = compare(&a, &a.clone(), &["color"]).unwrap_err();
        match err {
            DriftError::FieldNotSupported { entity, field } => {
                assert_eq!(entity, "component");
                assert_eq!(field, "color");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn severity_difference_is_an_int_change() {
        use driftline_core::Threat;
        let before = Threat {
            id: ThreatId::from_uuid(Uuid::from_u128(2)),
            library_id: LibraryId::from_uuid(Uuid::from_u128(900)),
            name: "Spoofing".to_string(),
            description: String::new(),
            severity: 3,
            labels: vec![],
        };
        let mut after = before.clone();
        after.severity = 5;
        let changes = compare(&before, &after, &["severity"]).unwrap();
        assert_eq!(changes[0].before, FieldValue::Int(3));
        assert_eq!(changes[0].after, FieldValue::Int(5));
    }
}
