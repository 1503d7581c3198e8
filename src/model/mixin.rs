//! Mixin - a named capability set that is not a model on its own.

use serde::Deserialize;

use crate::error::Result;
use crate::schema::{AttributeMeta, AttributesSchema, RelationshipMeta, RelationshipsSchema};

/// Attributes and relationships shared by several models.
///
/// Polymorphic relationships may point at a mixin name (`commentable`)
/// instead of a concrete model; the factory cache then synthesizes a model
/// class exposing the mixin's declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixin {
    name: String,
    attributes: AttributesSchema,
    relationships: RelationshipsSchema,
}

#[derive(Deserialize)]
struct MixinDefinition {
    name: String,
    #[serde(default)]
    attributes: Vec<AttributeMeta>,
    #[serde(default)]
    relationships: Vec<RelationshipMeta>,
}

impl Mixin {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: AttributesSchema::new(),
            relationships: RelationshipsSchema::new(),
        }
    }

    /// Parse a mixin declared as JSON:
    /// `{ "name": "...", "attributes": [...], "relationships": [...] }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let def: MixinDefinition = serde_json::from_str(json)?;
        let mut mixin = Mixin::new(def.name);
        for attribute in def.attributes {
            mixin = mixin.attribute(attribute);
        }
        for relationship in def.relationships {
            mixin = mixin.relationship(relationship);
        }
        Ok(mixin)
    }

    pub fn attribute(mut self, meta: AttributeMeta) -> Self {
        self.attributes.insert(meta.name.clone(), meta);
        self
    }

    pub fn relationship(mut self, meta: RelationshipMeta) -> Self {
        self.relationships.insert(meta.name.clone(), meta);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &AttributesSchema {
        &self.attributes
    }

    pub fn relationships(&self) -> &RelationshipsSchema {
        &self.relationships
    }
}
