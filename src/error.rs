use thiserror::Error;

/// Error type for schema and relationship-state resolution.
///
/// A type that simply does not exist is not an error at the factory level:
/// resolution reports it as `Ok(None)` and `does_type_exist` as `Ok(false)`.
/// These variants cover the unexpected cases that propagate to the caller.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// An internal lock was poisoned (a thread panicked while holding it).
    #[error("schema lock poisoned during {0}")]
    LockPoisoned(&'static str),

    /// A schema lookup named a type that resolves to neither a model nor a mixin.
    #[error("no model was found for '{0}'")]
    NoModelFound(String),

    /// The owner returned a factory of the wrong kind for a qualified name.
    #[error("expected a {expected} factory for '{name}', found a {found} factory")]
    UnexpectedFactory {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Several relationships on the related type could be the inverse.
    #[error("multiple possible inverses for '{type_name}.{relationship}': {candidates:?}")]
    AmbiguousInverse {
        type_name: String,
        relationship: String,
        candidates: Vec<String>,
    },

    /// A qualified name could not be parsed.
    #[error("invalid qualified name '{0}' (expected 'model:<name>' or 'mixin:<name>')")]
    InvalidQualifiedName(String),

    /// Failure reported by an owner implementation, passed through unchanged.
    #[error("owner error: {0}")]
    Owner(String),

    /// Configuration or schema JSON could not be decoded.
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result alias for schema resolution operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
