//! SchemaDefinitionService - per-type attribute and relationship schema lookup.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, trace};

use super::{AttributesSchema, RelationshipMeta, RelationshipsSchema};
use crate::config::SchemaConfig;
use crate::error::{Result, SchemaError};
use crate::identifier::TypeRef;
use crate::model::{ModelClass, ModelFactory, ModelFactoryCache};
use crate::name::{Dasherize, NameNormalizer};
use crate::owner::Owner;

/// Resolves schemas for model types through an injected [`Owner`].
///
/// One instance per store. Three caches live here for the lifetime of the
/// service: model factories, attribute schemas and relationship schemas.
/// Schema entries are permanent once computed; model definitions are
/// assumed immutable after first use.
pub struct SchemaDefinitionService<O> {
    owner: O,
    normalizer: Box<dyn NameNormalizer>,
    model_factories: ModelFactoryCache,
    attributes: RwLock<HashMap<String, Arc<AttributesSchema>>>,
    // `None` is a cached "declares no relationships", distinct from a missing key.
    relationships: RwLock<HashMap<String, Option<Arc<RelationshipsSchema>>>>,
}

impl<O: Owner> SchemaDefinitionService<O> {
    pub fn new(owner: O) -> Self {
        Self::with_config(owner, SchemaConfig::default())
    }

    pub fn with_config(owner: O, config: SchemaConfig) -> Self {
        Self {
            owner,
            normalizer: Box::new(Dasherize),
            model_factories: ModelFactoryCache::new(config),
            attributes: RwLock::new(HashMap::new()),
            relationships: RwLock::new(HashMap::new()),
        }
    }

    /// Replace the default dasherizing normalizer.
    pub fn with_normalizer(mut self, normalizer: impl NameNormalizer + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    /// Use `base` as the class mixins are composed onto.
    pub fn with_base_model(mut self, base: ModelClass) -> Self {
        self.model_factories = self.model_factories.with_base_model(base);
        self
    }

    pub fn owner(&self) -> &O {
        &self.owner
    }

    pub fn model_factories(&self) -> &ModelFactoryCache {
        &self.model_factories
    }

    /// Canonical name for a type reference.
    pub fn normalize(&self, type_ref: impl Into<TypeRef>) -> String {
        type_ref.into().canonical_name(self.normalizer.as_ref())
    }

    /// Attribute schema for a type, in declaration order.
    ///
    /// Returns the same `Arc` on every call for a given type. A type without
    /// attributes yields an empty schema.
    pub fn attributes_definition_for(
        &self,
        type_ref: impl Into<TypeRef>,
    ) -> Result<Arc<AttributesSchema>> {
        let model_name = self.normalize(type_ref);

        {
            let cache = self
                .attributes
                .read()
                .map_err(|_| SchemaError::LockPoisoned("attributes cache read"))?;
            if let Some(attributes) = cache.get(&model_name) {
                trace!(model_name = %model_name, "attributes cache hit");
                return Ok(attributes.clone());
            }
        }

        let factory = self.resolve_model(&model_name)?;
        let attributes: AttributesSchema = factory
            .class()
            .attributes()
            .map(|(name, meta)| (name.to_string(), meta.clone()))
            .collect();
        debug!(model_name = %model_name, count = attributes.len(), "computed attributes schema");

        let mut cache = self
            .attributes
            .write()
            .map_err(|_| SchemaError::LockPoisoned("attributes cache write"))?;
        Ok(cache
            .entry(model_name)
            .or_insert_with(|| Arc::new(attributes))
            .clone())
    }

    /// Relationship schema for a type, or `None` when it declares none.
    ///
    /// Both outcomes are cached; the same `Arc` comes back on every call.
    pub fn relationships_definition_for(
        &self,
        type_ref: impl Into<TypeRef>,
    ) -> Result<Option<Arc<RelationshipsSchema>>> {
        let model_name = self.normalize(type_ref);

        {
            let cache = self
                .relationships
                .read()
                .map_err(|_| SchemaError::LockPoisoned("relationships cache read"))?;
            if let Some(relationships) = cache.get(&model_name) {
                trace!(model_name = %model_name, "relationships cache hit");
                return Ok(relationships.clone());
            }
        }

        let factory = self.resolve_model(&model_name)?;
        let relationships = factory
            .class()
            .relationships_object()
            .filter(|relationships| !relationships.is_empty())
            .map(|relationships| Arc::new(relationships.clone()));
        debug!(
            model_name = %model_name,
            count = relationships.as_ref().map_or(0, |r| r.len()),
            "computed relationships schema"
        );

        let mut cache = self
            .relationships
            .write()
            .map_err(|_| SchemaError::LockPoisoned("relationships cache write"))?;
        Ok(cache.entry(model_name).or_insert(relationships).clone())
    }

    /// A single relationship declared on a type.
    pub fn relationship_definition_for(
        &self,
        type_ref: impl Into<TypeRef>,
        relationship: &str,
    ) -> Result<Option<RelationshipMeta>> {
        Ok(self
            .relationships_definition_for(type_ref)?
            .and_then(|relationships| relationships.get(relationship).cloned()))
    }

    /// Whether `model_name` resolves to a model, directly or through a mixin.
    ///
    /// May populate the factory cache and, for a mixin, register a synthetic
    /// model with the owner.
    pub fn does_type_exist(&self, model_name: &str) -> Result<bool> {
        Ok(self.model_factory_for(model_name)?.is_some())
    }

    /// Resolve a type name to its model factory, or `None` if it does not exist.
    pub fn model_factory_for(&self, model_name: &str) -> Result<Option<ModelFactory>> {
        let model_name = self.normalizer.normalize(model_name);
        self.model_factories.resolve(&self.owner, &model_name)
    }

    /// Resolve a type to its model factory, failing if it does not exist.
    pub fn model_for(&self, type_ref: impl Into<TypeRef>) -> Result<ModelFactory> {
        let model_name = self.normalize(type_ref);
        self.resolve_model(&model_name)
    }

    fn resolve_model(&self, model_name: &str) -> Result<ModelFactory> {
        self.model_factories
            .resolve(&self.owner, model_name)?
            .ok_or_else(|| SchemaError::NoModelFound(model_name.to_string()))
    }
}
