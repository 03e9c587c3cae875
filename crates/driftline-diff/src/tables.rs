//! Declared field tables for every catalog entity type.
//!
//! The canonical display-name field compares case-insensitively, label
//! collections compare as unordered sets, everything else is exact.

use driftline_core::{
    Component, ComponentType, Library, Property, PropertyOption, PropertyType,
    SecurityRequirement, TestCase, Threat,
};

use crate::fields::{CompareMode, Diffable, FieldSpec, FieldValue};

impl Diffable for Library {
    const ENTITY: &'static str = "library";

    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<Library>] = &[
            FieldSpec {
                name: "id",
                mode: CompareMode::Identity,
                get: |entity: &Library| FieldValue::Id(*entity.id.as_uuid()),
            },
            FieldSpec {
                name: "name",
                mode: CompareMode::TextCaseInsensitive,
                get: |entity: &Library| FieldValue::Text(entity.name.clone()),
            },
            FieldSpec {
                name: "version",
                mode: CompareMode::TextExact,
                get: |entity: &Library| FieldValue::Text(entity.version.clone()),
            },
            FieldSpec {
                name: "description",
                mode: CompareMode::TextExact,
                get: |entity: &Library| FieldValue::Text(entity.description.clone()),
            },
        ];
        FIELDS
    }
}

impl Diffable for Component {
    const ENTITY: &'static str = "component";

    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<Component>] = &[
            FieldSpec {
                name: "id",
                mode: CompareMode::Identity,
                get: |entity: &Component| FieldValue::Id(*entity.id.as_uuid()),
            },
            FieldSpec {
                name: "name",
                mode: CompareMode::TextCaseInsensitive,
                get: |entity: &Component| FieldValue::Text(entity.name.clone()),
            },
            FieldSpec {
                name: "description",
                mode: CompareMode::TextExact,
                get: |entity: &Component| FieldValue::Text(entity.description.clone()),
            },
            FieldSpec {
                name: "component_type",
                mode: CompareMode::Identity,
                get: |entity: &Component| {
                    FieldValue::OptionalId(entity.component_type.map(|id| *id.as_uuid()))
                },
            },
            FieldSpec {
                name: "labels",
                mode: CompareMode::UnorderedTextSet,
                get: |entity: &Component| FieldValue::TextSet(entity.labels.clone()),
            },
        ];
        FIELDS
    }
}

impl Diffable for Threat {
    const ENTITY: &'static str = "threat";

    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<Threat>] = &[
            FieldSpec {
                name: "id",
                mode: CompareMode::Identity,
                get: |entity: &Threat| FieldValue::Id(*entity.id.as_uuid()),
            },
            FieldSpec {
                name: "name",
                mode: CompareMode::TextCaseInsensitive,
                get: |entity: &Threat| FieldValue::Text(entity.name.clone()),
            },
            FieldSpec {
                name: "description",
                mode: CompareMode::TextExact,
                get: |entity: &Threat| FieldValue::Text(entity.description.clone()),
            },
            FieldSpec {
                name: "severity",
                mode: CompareMode::Identity,
                get: |entity: &Threat| FieldValue::Int(entity.severity),
            },
            FieldSpec {
                name: "labels",
                mode: CompareMode::UnorderedTextSet,
                get: |entity: &Threat| FieldValue::TextSet(entity.labels.clone()),
            },
        ];
        FIELDS
    }
}

impl Diffable for SecurityRequirement {
    const ENTITY: &'static str = "security-requirement";

    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<SecurityRequirement>] = &[
            FieldSpec {
                name: "id",
                mode: CompareMode::Identity,
                get: |entity: &SecurityRequirement| FieldValue::Id(*entity.id.as_uuid()),
            },
            FieldSpec {
                name: "name",
                mode: CompareMode::TextCaseInsensitive,
                get: |entity: &SecurityRequirement| FieldValue::Text(entity.name.clone()),
            },
            FieldSpec {
                name: "description",
                mode: CompareMode::TextExact,
                get: |entity: &SecurityRequirement| FieldValue::Text(entity.description.clone()),
            },
            FieldSpec {
                name: "labels",
                mode: CompareMode::UnorderedTextSet,
                get: |entity: &SecurityRequirement| FieldValue::TextSet(entity.labels.clone()),
            },
        ];
        FIELDS
    }
}

impl Diffable for Property {
    const ENTITY: &'static str = "property";

    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<Property>] = &[
            FieldSpec {
                name: "id",
                mode: CompareMode::Identity,
                get: |entity: &Property| FieldValue::Id(*entity.id.as_uuid()),
            },
            FieldSpec {
                name: "name",
                mode: CompareMode::TextCaseInsensitive,
                get: |entity: &Property| FieldValue::Text(entity.name.clone()),
            },
            FieldSpec {
                name: "description",
                mode: CompareMode::TextExact,
                get: |entity: &Property| FieldValue::Text(entity.description.clone()),
            },
            FieldSpec {
                name: "property_type",
                mode: CompareMode::Identity,
                get: |entity: &Property| {
                    FieldValue::OptionalId(entity.property_type.map(|id| *id.as_uuid()))
                },
            },
        ];
        FIELDS
    }
}

impl Diffable for PropertyOption {
    const ENTITY: &'static str = "property-option";

    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<PropertyOption>] = &[
            FieldSpec {
                name: "id",
                mode: CompareMode::Identity,
                get: |entity: &PropertyOption| FieldValue::Id(*entity.id.as_uuid()),
            },
            FieldSpec {
                name: "property",
                mode: CompareMode::Identity,
                get: |entity: &PropertyOption| FieldValue::Id(*entity.property_id.as_uuid()),
            },
            FieldSpec {
                name: "name",
                mode: CompareMode::TextCaseInsensitive,
                get: |entity: &PropertyOption| FieldValue::Text(entity.name.clone()),
            },
            FieldSpec {
                name: "description",
                mode: CompareMode::TextExact,
                get: |entity: &PropertyOption| FieldValue::Text(entity.description.clone()),
            },
        ];
        FIELDS
    }
}

impl Diffable for TestCase {
    const ENTITY: &'static str = "test-case";

    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<TestCase>] = &[
            FieldSpec {
                name: "id",
                mode: CompareMode::Identity,
                get: |entity: &TestCase| FieldValue::Id(*entity.id.as_uuid()),
            },
            FieldSpec {
                name: "name",
                mode: CompareMode::TextCaseInsensitive,
                get: |entity: &TestCase| FieldValue::Text(entity.name.clone()),
            },
            FieldSpec {
                name: "description",
                mode: CompareMode::TextExact,
                get: |entity: &TestCase| FieldValue::Text(entity.description.clone()),
            },
            FieldSpec {
                name: "labels",
                mode: CompareMode::UnorderedTextSet,
                get: |entity: &TestCase| FieldValue::TextSet(entity.labels.clone()),
            },
        ];
        FIELDS
    }
}

impl Diffable for ComponentType {
    const ENTITY: &'static str = "component-type";

    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<ComponentType>] = &[
            FieldSpec {
                name: "id",
                mode: CompareMode::Identity,
                get: |entity: &ComponentType| FieldValue::Id(*entity.id.as_uuid()),
            },
            FieldSpec {
                name: "name",
                mode: CompareMode::TextCaseInsensitive,
                get: |entity: &ComponentType| FieldValue::Text(entity.name.clone()),
            },
            FieldSpec {
                name: "description",
                mode: CompareMode::TextExact,
                get: |entity: &ComponentType| FieldValue::Text(entity.description.clone()),
            },
        ];
        FIELDS
    }
}

impl Diffable for PropertyType {
    const ENTITY: &'static str = "property-type";

    fn fields() -> &'static [FieldSpec<Self>] {
        const FIELDS: &[FieldSpec<PropertyType>] = &[
            FieldSpec {
                name: "id",
                mode: CompareMode::Identity,
                get: |entity: &PropertyType| FieldValue::Id(*entity.id.as_uuid()),
            },
            FieldSpec {
                name: "name",
                mode: CompareMode::TextCaseInsensitive,
                get: |entity: &PropertyType| FieldValue::Text(entity.name.clone()),
            },
            FieldSpec {
                name: "description",
                mode: CompareMode::TextExact,
                get: |entity: &PropertyType| FieldValue::Text(entity.description.clone()),
            },
        ];
        FIELDS
    }
}
