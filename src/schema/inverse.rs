//! Inverse relationship lookup.
//!
//! A relationship with no inverse on the related type still needs somewhere
//! to record the reverse membership; that is the implicit namespace kept by
//! record data.

use super::{RelationshipKind, RelationshipMeta, SchemaDefinitionService};
use crate::error::{Result, SchemaError};
use crate::identifier::TypeRef;
use crate::owner::Owner;

/// The relationship on the related type that points back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InverseDefinition {
    /// Canonical name of the type declaring the inverse.
    pub type_name: String,
    pub name: String,
    pub kind: RelationshipKind,
}

impl<O: Owner> SchemaDefinitionService<O> {
    /// Inverse of `relationship` declared on `type_ref`.
    ///
    /// An explicit `inverse` option wins (an explicit `null` means none).
    /// Otherwise the related type is searched for the single relationship
    /// pointing back at the declaring type, either directly or, when
    /// polymorphic, through a mixin that declares this same relationship.
    /// `Ok(None)` when there is no inverse, the relationship itself is not
    /// declared, or the related type is not registered yet.
    pub fn inverse_for(
        &self,
        type_ref: impl Into<TypeRef>,
        relationship: &str,
    ) -> Result<Option<InverseDefinition>> {
        let model_name = self.normalize(type_ref);
        let Some(meta) = self.relationship_definition_for(model_name.as_str(), relationship)? else {
            return Ok(None);
        };
        if matches!(meta.options.inverse, Some(None)) {
            return Ok(None);
        }

        let related_type = self.normalize(meta.type_name.as_str());
        if self.model_factory_for(&related_type)?.is_none() {
            return Ok(None);
        }
        let Some(related) = self.relationships_definition_for(related_type.as_str())? else {
            return Ok(None);
        };

        let inverse = match &meta.options.inverse {
            Some(Some(name)) => related.get(name),
            _ => {
                let mut candidates = Vec::new();
                for candidate in related.values() {
                    if related_type == model_name && candidate.name == meta.name {
                        continue;
                    }
                    if self.points_back(candidate, &model_name, &meta, &related_type)? {
                        candidates.push(candidate);
                    }
                }

                if candidates.len() > 1 {
                    return Err(SchemaError::AmbiguousInverse {
                        type_name: model_name,
                        relationship: relationship.to_string(),
                        candidates: candidates.iter().map(|c| c.name.clone()).collect(),
                    });
                }
                candidates.into_iter().next()
            }
        };

        Ok(inverse.map(|inverse| InverseDefinition {
            type_name: related_type,
            name: inverse.name.clone(),
            kind: inverse.kind,
        }))
    }

    // `candidate` lives on `related_type`; `meta` is declared on `model_name`.
    fn points_back(
        &self,
        candidate: &RelationshipMeta,
        model_name: &str,
        meta: &RelationshipMeta,
        related_type: &str,
    ) -> Result<bool> {
        let target = self.normalize(candidate.type_name.as_str());
        if target == model_name {
            return Ok(true);
        }
        if !candidate.options.polymorphic || self.model_factory_for(&target)?.is_none() {
            return Ok(false);
        }
        Ok(self
            .relationship_definition_for(target.as_str(), &meta.name)?
            .is_some_and(|shared| self.normalize(shared.type_name.as_str()) == related_type))
    }
}
