//! ModelClass - the schema-bearing descriptor an owner hands out for `model:<name>`.

use std::sync::{Arc, OnceLock};

use serde::Deserialize;

use super::Mixin;
use crate::error::Result;
use crate::schema::{AttributeMeta, AttributesSchema, RelationshipMeta, RelationshipsSchema};

/// A model class: declared attributes and relationships plus identity markers.
///
/// Classes are immutable once registered, except for the model name, which
/// is stamped at most once when the class is first resolved without one.
#[derive(Debug, Clone)]
pub struct ModelClass {
    model_name: OnceLock<String>,
    is_model: bool,
    attributes: AttributesSchema,
    relationships: RelationshipsSchema,
    mixin: Option<Arc<Mixin>>,
}

#[derive(Deserialize)]
struct ModelDefinition {
    #[serde(default, rename = "modelName")]
    model_name: Option<String>,
    #[serde(default)]
    attributes: Vec<AttributeMeta>,
    #[serde(default)]
    relationships: Vec<RelationshipMeta>,
}

impl Default for ModelClass {
    fn default() -> Self {
        Self::model()
    }
}

impl ModelClass {
    /// An empty model class with no name of its own.
    pub fn model() -> Self {
        Self {
            model_name: OnceLock::new(),
            is_model: true,
            attributes: AttributesSchema::new(),
            relationships: RelationshipsSchema::new(),
            mixin: None,
        }
    }

    /// A model class that carries its own model name. Resolution never
    /// overwrites it.
    pub fn named(model_name: impl Into<String>) -> Self {
        let class = Self::model();
        let _ = class.model_name.set(model_name.into());
        class
    }

    /// A class registered under `model:` that does not identify as a model.
    pub fn plain() -> Self {
        Self {
            is_model: false,
            ..Self::model()
        }
    }

    /// Parse a model declared as JSON:
    /// `{ "modelName": "...", "attributes": [...], "relationships": [...] }`.
    pub fn from_json(json: &str) -> Result<Self> {
        let def: ModelDefinition = serde_json::from_str(json)?;
        let mut class = match def.model_name {
            Some(name) => Self::named(name),
            None => Self::model(),
        };
        for attribute in def.attributes {
            class = class.attribute(attribute);
        }
        for relationship in def.relationships {
            class = class.relationship(relationship);
        }
        Ok(class)
    }

    /// Compose `base` with `mixin` into a model-shaped class. Mixin
    /// declarations win over base declarations of the same name.
    pub fn for_mixin(base: &ModelClass, mixin: Arc<Mixin>) -> Self {
        let mut attributes = base.attributes.clone();
        for (name, meta) in mixin.attributes() {
            attributes.insert(name.clone(), meta.clone());
        }

        let mut relationships = base.relationships.clone();
        for (name, meta) in mixin.relationships() {
            relationships.insert(name.clone(), meta.clone());
        }

        Self {
            model_name: OnceLock::new(),
            is_model: base.is_model,
            attributes,
            relationships,
            mixin: Some(mixin),
        }
    }

    pub fn attribute(mut self, meta: AttributeMeta) -> Self {
        self.attributes.insert(meta.name.clone(), meta);
        self
    }

    pub fn relationship(mut self, meta: RelationshipMeta) -> Self {
        self.relationships.insert(meta.name.clone(), meta);
        self
    }

    pub fn is_model(&self) -> bool {
        self.is_model
    }

    /// The model name set on this class, declared or stamped.
    pub fn model_name(&self) -> Option<&str> {
        self.model_name.get().map(String::as_str)
    }

    /// Set the model name if the class has none. Returns whether it was set.
    pub(crate) fn stamp_model_name(&self, model_name: &str) -> bool {
        self.model_name.set(model_name.to_string()).is_ok()
    }

    /// Declared attributes as `(name, meta)` pairs, in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeMeta)> {
        self.attributes.iter().map(|(name, meta)| (name.as_str(), meta))
    }

    /// Declared relationships, or `None` when the class declares none.
    pub fn relationships_object(&self) -> Option<&RelationshipsSchema> {
        if self.relationships.is_empty() {
            None
        } else {
            Some(&self.relationships)
        }
    }

    pub fn is_mixin(&self) -> bool {
        self.mixin.is_some()
    }

    /// The mixin this class was synthesized from, if any.
    pub fn mixin(&self) -> Option<&Arc<Mixin>> {
        self.mixin.as_ref()
    }
}
