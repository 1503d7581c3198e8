//! Record identifiers and type references.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::name::NameNormalizer;

/// Stable handle for a record: its type, its remote id (if known) and a
/// local id that is unique within a store.
///
/// Only `type` is consulted for schema resolution; uniqueness of `lid` is the
/// store's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordIdentifier {
    pub lid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl RecordIdentifier {
    pub fn new(type_name: impl Into<String>, id: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let id = id.into();
        Self {
            lid: format!("@lid:{}-{}", type_name, id),
            id: Some(id),
            type_name,
        }
    }

    /// Identifier for a record that has no remote id yet.
    pub fn local(type_name: impl Into<String>, lid: impl Into<String>) -> Self {
        Self {
            lid: lid.into(),
            id: None,
            type_name: type_name.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

impl fmt::Display for RecordIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}:{}", self.type_name, id),
            None => write!(f, "{}:{}", self.type_name, self.lid),
        }
    }
}

/// Either a bare type name or a full identifier. Schema lookups accept
/// anything convertible into this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Name(String),
    Identifier(RecordIdentifier),
}

impl TypeRef {
    /// The raw (not yet normalized) type name.
    pub fn raw_name(&self) -> &str {
        match self {
            TypeRef::Name(name) => name,
            TypeRef::Identifier(identifier) => &identifier.type_name,
        }
    }

    /// The canonical type name, used as the cache key.
    pub fn canonical_name(&self, normalizer: &dyn NameNormalizer) -> String {
        normalizer.normalize(self.raw_name())
    }
}

impl From<&str> for TypeRef {
    fn from(name: &str) -> Self {
        TypeRef::Name(name.to_string())
    }
}

impl From<String> for TypeRef {
    fn from(name: String) -> Self {
        TypeRef::Name(name)
    }
}

impl From<&String> for TypeRef {
    fn from(name: &String) -> Self {
        TypeRef::Name(name.clone())
    }
}

impl From<RecordIdentifier> for TypeRef {
    fn from(identifier: RecordIdentifier) -> Self {
        TypeRef::Identifier(identifier)
    }
}

impl From<&RecordIdentifier> for TypeRef {
    fn from(identifier: &RecordIdentifier) -> Self {
        TypeRef::Identifier(identifier.clone())
    }
}
