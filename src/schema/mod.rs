//! Attribute and relationship schemas.
//!
//! Schemas are ordered maps keyed by property name, in declaration order.
//! The [`SchemaDefinitionService`] resolves and memoizes them per canonical
//! type name.

mod inverse;
mod service;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub use inverse::InverseDefinition;
pub use service::SchemaDefinitionService;

/// Attribute name -> metadata, in declaration order.
pub type AttributesSchema = IndexMap<String, AttributeMeta>;

/// Relationship name -> metadata, in declaration order.
pub type RelationshipsSchema = IndexMap<String, RelationshipMeta>;

/// Metadata for a declared attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeMeta {
    pub name: String,
    /// Transform name (`string`, `number`, `date`, ...). `None` means untyped.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, Value>,
}

impl AttributeMeta {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some(type_name.into()),
            options: IndexMap::new(),
        }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
            options: IndexMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }
}

/// Cardinality of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationshipKind {
    BelongsTo,
    HasMany,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::BelongsTo => "belongsTo",
            RelationshipKind::HasMany => "hasMany",
        }
    }
}

/// Options declared alongside a relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipOptions {
    /// `None`: infer the inverse. `Some(None)`: explicitly no inverse.
    /// `Some(Some(name))`: explicit inverse on the related type.
    #[serde(
        default,
        deserialize_with = "explicit_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub inverse: Option<Option<String>>,
    /// The related type may be a mixin; any model carrying it can sit on
    /// the other side.
    #[serde(default)]
    pub polymorphic: bool,
}

/// Metadata for a declared relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipMeta {
    pub name: String,
    pub kind: RelationshipKind,
    /// The related type, as declared (not necessarily normalized).
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub options: RelationshipOptions,
}

impl RelationshipMeta {
    pub fn belongs_to(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(RelationshipKind::BelongsTo, name, type_name)
    }

    pub fn has_many(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(RelationshipKind::HasMany, name, type_name)
    }

    fn new(kind: RelationshipKind, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            type_name: type_name.into(),
            options: RelationshipOptions::default(),
        }
    }

    pub fn with_inverse(mut self, inverse: impl Into<String>) -> Self {
        self.options.inverse = Some(Some(inverse.into()));
        self
    }

    pub fn without_inverse(mut self) -> Self {
        self.options.inverse = Some(None);
        self
    }

    pub fn polymorphic(mut self) -> Self {
        self.options.polymorphic = true;
        self
    }
}

// Distinguishes an explicit `null` from a missing field.
fn explicit_option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
