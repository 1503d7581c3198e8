//! Models - schema-bearing classes, mixins, and resolved model factories.
//!
//! An owner registers [`ModelClass`]es under `model:<name>` and [`Mixin`]s
//! under `mixin:<name>`. The [`ModelFactoryCache`] resolves a canonical type
//! name to a [`ModelFactory`], falling back to a mixin when no model exists,
//! so polymorphic relationships can target a capability instead of a
//! concrete type.
//!
//! ## Example
//!
//! ```ignore
//! let owner = InMemoryOwner::new();
//! owner.register_mixin("commentable", Mixin::new("commentable")
//!     .relationship(RelationshipMeta::has_many("comments", "comment")))?;
//!
//! let cache = ModelFactoryCache::default();
//! let factory = cache.resolve(&owner, "commentable")?.unwrap();
//! assert!(factory.is_mixin());
//! ```

mod cache;
mod class;
mod factory;
mod mixin;

pub use cache::{lookup_model_factory, ModelFactoryCache};
pub use class::ModelClass;
pub use factory::ModelFactory;
pub use mixin::Mixin;
