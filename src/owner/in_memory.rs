//! InMemoryOwner - HashMap-backed owner for testing and embedding.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::{Factory, Owner, QualifiedName};
use crate::error::{Result, SchemaError};
use crate::model::{Mixin, ModelClass};

/// In-memory owner keyed by qualified name.
///
/// Clone-friendly (cloning shares the same underlying registrations), so a
/// test can keep a handle and register more types after the schema service
/// has been built.
#[derive(Clone, Default)]
pub struct InMemoryOwner {
    registrations: Arc<RwLock<HashMap<QualifiedName, Factory>>>,
}

impl InMemoryOwner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model class under `model:<name>`.
    pub fn register_model(&self, name: &str, class: ModelClass) -> Result<()> {
        self.register(QualifiedName::model(name), Factory::Model(Arc::new(class)))
    }

    /// Register a mixin under `mixin:<name>`.
    pub fn register_mixin(&self, name: &str, mixin: Mixin) -> Result<()> {
        self.register(QualifiedName::mixin(name), Factory::Mixin(Arc::new(mixin)))
    }

    /// Remove a registration. Returns true if it existed.
    pub fn unregister(&self, name: &QualifiedName) -> Result<bool> {
        let mut registrations = self
            .registrations
            .write()
            .map_err(|_| SchemaError::LockPoisoned("owner write"))?;
        Ok(registrations.remove(name).is_some())
    }

    pub fn is_registered(&self, name: &QualifiedName) -> Result<bool> {
        let registrations = self
            .registrations
            .read()
            .map_err(|_| SchemaError::LockPoisoned("owner read"))?;
        Ok(registrations.contains_key(name))
    }
}

impl Owner for InMemoryOwner {
    fn factory_for(&self, name: &QualifiedName) -> Result<Option<Factory>> {
        let registrations = self
            .registrations
            .read()
            .map_err(|_| SchemaError::LockPoisoned("owner read"))?;
        Ok(registrations.get(name).cloned())
    }

    fn register(&self, name: QualifiedName, factory: Factory) -> Result<()> {
        let mut registrations = self
            .registrations
            .write()
            .map_err(|_| SchemaError::LockPoisoned("owner write"))?;
        debug!(name = %name, "registering factory");
        registrations.insert(name, factory);
        Ok(())
    }
}
