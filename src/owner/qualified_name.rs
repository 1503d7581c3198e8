use std::fmt;
use std::str::FromStr;

use crate::error::SchemaError;

/// Namespace of a registered factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactoryKind {
    Model,
    Mixin,
}

impl FactoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactoryKind::Model => "model",
            FactoryKind::Mixin => "mixin",
        }
    }
}

impl fmt::Display for FactoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `model:<name>` or `mixin:<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    pub kind: FactoryKind,
    pub name: String,
}

impl QualifiedName {
    pub fn model(name: impl Into<String>) -> Self {
        Self {
            kind: FactoryKind::Model,
            name: name.into(),
        }
    }

    pub fn mixin(name: impl Into<String>) -> Self {
        Self {
            kind: FactoryKind::Mixin,
            name: name.into(),
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.name)
    }
}

impl FromStr for QualifiedName {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SchemaError::InvalidQualifiedName(s.to_string());
        let (kind, name) = s.split_once(':').ok_or_else(invalid)?;
        if name.is_empty() {
            return Err(invalid());
        }

        match kind {
            "model" => Ok(QualifiedName::model(name)),
            "mixin" => Ok(QualifiedName::mixin(name)),
            _ => Err(invalid()),
        }
    }
}
