//! ModelFactoryCache - memoized `model:<name>` resolution with mixin fallback.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, trace};

use super::{ModelClass, ModelFactory};
use crate::config::SchemaConfig;
use crate::error::{Result, SchemaError};
use crate::owner::{Factory, FactoryKind, Owner, QualifiedName};

/// Canonical type name -> resolved model factory.
///
/// Only successful resolutions are stored. A name that resolves to nothing
/// is looked up again on the next call, so a type registered later becomes
/// visible without any invalidation.
pub struct ModelFactoryCache {
    entries: RwLock<HashMap<String, ModelFactory>>,
    base_model: Arc<ModelClass>,
    config: SchemaConfig,
}

impl Default for ModelFactoryCache {
    fn default() -> Self {
        Self::new(SchemaConfig::default())
    }
}

impl ModelFactoryCache {
    pub fn new(config: SchemaConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            base_model: Arc::new(ModelClass::model()),
            config,
        }
    }

    /// Use `base` as the class that mixins are composed onto.
    pub fn with_base_model(mut self, base: ModelClass) -> Self {
        self.base_model = Arc::new(base);
        self
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Cached factory for `model_name`, without consulting the owner.
    pub fn get(&self, model_name: &str) -> Result<Option<ModelFactory>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SchemaError::LockPoisoned("model factory cache read"))?;
        Ok(entries.get(model_name).cloned())
    }

    pub fn len(&self) -> Result<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|_| SchemaError::LockPoisoned("model factory cache read"))?;
        Ok(entries.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Resolve `model_name` (already normalized) to a model factory.
    ///
    /// Order: cache, `model:<name>`, then `mixin:<name>` composed onto the
    /// base model and registered back as `model:<name>`.
    pub fn resolve<O: Owner + ?Sized>(
        &self,
        owner: &O,
        model_name: &str,
    ) -> Result<Option<ModelFactory>> {
        if let Some(factory) = self.get(model_name)? {
            trace!(model_name, "model factory cache hit");
            return Ok(Some(factory));
        }

        let mut factory = lookup_model_factory(owner, model_name)?;
        if factory.is_none() && self.config.mixin_fallback {
            factory = self.model_for_mixin(owner, model_name)?;
        }

        let Some(factory) = factory else {
            debug!(model_name, "no model or mixin registered; miss not cached");
            return Ok(None);
        };

        let class = factory.class();
        if self.config.stamp_model_names
            && class.is_model()
            && class.model_name().is_none()
            && class.stamp_model_name(model_name)
        {
            debug!(model_name, "stamped model name onto class");
        }

        let mut entries = self
            .entries
            .write()
            .map_err(|_| SchemaError::LockPoisoned("model factory cache write"))?;
        let cached = entries
            .entry(model_name.to_string())
            .or_insert(factory)
            .clone();
        Ok(Some(cached))
    }

    fn model_for_mixin<O: Owner + ?Sized>(
        &self,
        owner: &O,
        model_name: &str,
    ) -> Result<Option<ModelFactory>> {
        let name = QualifiedName::mixin(model_name);
        let mixin = match owner.factory_for(&name)? {
            Some(Factory::Mixin(mixin)) => mixin,
            Some(other) => {
                return Err(SchemaError::UnexpectedFactory {
                    name: name.to_string(),
                    expected: FactoryKind::Mixin.as_str(),
                    found: other.kind().as_str(),
                })
            }
            None => return Ok(None),
        };

        debug!(model_name, "synthesizing model class from mixin");
        let class = ModelClass::for_mixin(&self.base_model, mixin);
        owner.register(QualifiedName::model(model_name), Factory::Model(Arc::new(class)))?;

        lookup_model_factory(owner, model_name)
    }
}

/// Ask the owner for `model:<model_name>` directly.
pub fn lookup_model_factory<O: Owner + ?Sized>(
    owner: &O,
    model_name: &str,
) -> Result<Option<ModelFactory>> {
    let name = QualifiedName::model(model_name);
    match owner.factory_for(&name)? {
        Some(Factory::Model(class)) => Ok(Some(ModelFactory::from_class(class))),
        Some(other) => Err(SchemaError::UnexpectedFactory {
            name: name.to_string(),
            expected: FactoryKind::Model.as_str(),
            found: other.kind().as_str(),
        }),
        None => Ok(None),
    }
}
