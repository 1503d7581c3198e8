//! Configuration for the schema definition service.
//!
//! ## Example
//!
//! ```ignore
//! let config = SchemaConfig::from_json(r#"{ "mixin_fallback": false }"#)?;
//! let service = SchemaDefinitionService::with_config(owner, config);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunables for model factory resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Look up `mixin:<name>` and synthesize a model when `model:<name>` is
    /// missing. Disable when no base model class is available to extend.
    pub mixin_fallback: bool,

    /// Stamp the canonical name onto resolved model classes that have no
    /// model name of their own.
    pub stamp_model_names: bool,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            mixin_fallback: true,
            stamp_model_names: true,
        }
    }
}

impl SchemaConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_mixin_fallback(mut self, enabled: bool) -> Self {
        self.mixin_fallback = enabled;
        self
    }

    pub fn with_stamp_model_names(mut self, enabled: bool) -> Self {
        self.stamp_model_names = enabled;
        self
    }
}
