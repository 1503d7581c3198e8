use std::sync::Arc;

use super::{Mixin, ModelClass};

/// A resolved model factory, as stored in the model factory cache.
#[derive(Debug, Clone)]
pub enum ModelFactory {
    /// Registered directly under `model:<name>`.
    Direct(Arc<ModelClass>),
    /// Synthesized from `mixin:<name>` and registered back as a model.
    MixinSynthesized {
        class: Arc<ModelClass>,
        mixin: Arc<Mixin>,
    },
}

impl ModelFactory {
    pub(crate) fn from_class(class: Arc<ModelClass>) -> Self {
        let mixin = class.mixin().cloned();
        match mixin {
            Some(mixin) => ModelFactory::MixinSynthesized { class, mixin },
            None => ModelFactory::Direct(class),
        }
    }

    pub fn class(&self) -> &Arc<ModelClass> {
        match self {
            ModelFactory::Direct(class) => class,
            ModelFactory::MixinSynthesized { class, .. } => class,
        }
    }

    pub fn mixin(&self) -> Option<&Arc<Mixin>> {
        match self {
            ModelFactory::Direct(_) => None,
            ModelFactory::MixinSynthesized { mixin, .. } => Some(mixin),
        }
    }

    pub fn is_mixin(&self) -> bool {
        matches!(self, ModelFactory::MixinSynthesized { .. })
    }

    pub fn model_name(&self) -> Option<&str> {
        self.class().model_name()
    }

    /// Whether both factories wrap the same class instance.
    pub fn same_class(&self, other: &ModelFactory) -> bool {
        Arc::ptr_eq(self.class(), other.class())
    }
}
