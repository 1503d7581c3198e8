//! Owner - the host-controlled registry that resolves qualified names to factories.
//!
//! The schema service never reaches for a global registry; an owner is
//! injected at construction. [`InMemoryOwner`] is a HashMap-backed owner
//! for tests and embedding.
//!
//! ## Example
//!
//! ```ignore
//! use record_schema::{InMemoryOwner, ModelClass, RelationshipMeta, SchemaDefinitionService};
//!
//! let owner = InMemoryOwner::new();
//! owner.register_model("post", ModelClass::model()
//!     .relationship(RelationshipMeta::has_many("comments", "comment")))?;
//!
//! let schema = SchemaDefinitionService::new(owner);
//! assert!(schema.does_type_exist("post")?);
//! ```

mod in_memory;
mod qualified_name;

use std::sync::Arc;

use crate::error::Result;
use crate::model::{Mixin, ModelClass};

pub use in_memory::InMemoryOwner;
pub use qualified_name::{FactoryKind, QualifiedName};

/// What an owner hands back for a qualified name.
#[derive(Debug, Clone)]
pub enum Factory {
    Model(Arc<ModelClass>),
    Mixin(Arc<Mixin>),
}

impl Factory {
    pub fn kind(&self) -> FactoryKind {
        match self {
            Factory::Model(_) => FactoryKind::Model,
            Factory::Mixin(_) => FactoryKind::Mixin,
        }
    }
}

/// Resolves and registers factories by qualified name.
pub trait Owner: Send + Sync {
    /// Look up a factory. `Ok(None)` when nothing is registered.
    fn factory_for(&self, name: &QualifiedName) -> Result<Option<Factory>>;

    /// Register (or replace) a factory under `name`.
    fn register(&self, name: QualifiedName, factory: Factory) -> Result<()>;
}

impl<O: Owner + ?Sized> Owner for Arc<O> {
    fn factory_for(&self, name: &QualifiedName) -> Result<Option<Factory>> {
        (**self).factory_for(name)
    }

    fn register(&self, name: QualifiedName, factory: Factory) -> Result<()> {
        (**self).register(name, factory)
    }
}
