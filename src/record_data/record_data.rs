use tracing::debug;

use super::state::{implicit_relationship_key, RelationshipState, RelationshipStates};
use crate::error::Result;
use crate::identifier::RecordIdentifier;
use crate::owner::Owner;
use crate::schema::SchemaDefinitionService;

/// Capability: owns a relationship-state container and an implicit one.
pub trait HasRelationshipState {
    fn relationships(&self) -> &RelationshipStates;
    fn implicit_relationships(&self) -> &RelationshipStates;
}

/// Anything that carries a record identity and may hold relationship state
/// itself. The accessor falls back to the instance's own state when the
/// provider has no distinct record data for it.
pub trait RecordInstance: HasRelationshipState {
    fn identifier(&self) -> &RecordIdentifier;
}

/// Mutable per-record relationship state.
#[derive(Debug, Clone)]
pub struct RecordData {
    identifier: RecordIdentifier,
    relationships: RelationshipStates,
    implicit_relationships: RelationshipStates,
}

impl RecordData {
    pub fn new(identifier: RecordIdentifier) -> Self {
        Self {
            identifier,
            relationships: RelationshipStates::new(),
            implicit_relationships: RelationshipStates::new(),
        }
    }

    /// Record data with one empty state per relationship declared on the
    /// identifier's type.
    pub fn from_schema<O: Owner>(
        identifier: RecordIdentifier,
        schema: &SchemaDefinitionService<O>,
    ) -> Result<Self> {
        let record_data = Self::new(identifier);
        let Some(definitions) = schema.relationships_definition_for(&record_data.identifier)? else {
            return Ok(record_data);
        };

        for (name, meta) in definitions.iter() {
            let inverse = schema
                .inverse_for(&record_data.identifier, name)?
                .map(|inverse| inverse.name);
            record_data
                .relationships
                .insert(RelationshipState::for_definition(meta, inverse))?;
        }

        Ok(record_data)
    }

    pub fn identifier(&self) -> &RecordIdentifier {
        &self.identifier
    }

    /// Record that `source` points at this record through `source_key`, a
    /// relationship with no declared inverse. Returns false if already known.
    pub fn add_implicit_inverse(&self, source: &RecordIdentifier, source_key: &str) -> Result<bool> {
        let key = implicit_relationship_key(source.type_name(), source_key);
        debug!(record = %self.identifier, key = %key, "tracking implicit inverse");
        self.implicit_relationships.upsert(
            &key,
            || RelationshipState::implicit(source.type_name(), source_key),
            |state| state.add_member(source.clone()),
        )
    }

    /// Drop `source` from the implicit inverse of `source_key`.
    pub fn remove_implicit_inverse(
        &self,
        source: &RecordIdentifier,
        source_key: &str,
    ) -> Result<bool> {
        let key = implicit_relationship_key(source.type_name(), source_key);
        Ok(self
            .implicit_relationships
            .update(&key, |state| state.remove_member(source))?
            .unwrap_or(false))
    }
}

impl HasRelationshipState for RecordData {
    fn relationships(&self) -> &RelationshipStates {
        &self.relationships
    }

    fn implicit_relationships(&self) -> &RelationshipStates {
        &self.implicit_relationships
    }
}

impl RecordInstance for RecordData {
    fn identifier(&self) -> &RecordIdentifier {
        &self.identifier
    }
}

/// A record instance that keeps its own relationship state.
///
/// Used as-is when no distinct record data has been registered for it.
#[derive(Debug, Clone)]
pub struct Record {
    identifier: RecordIdentifier,
    relationships: RelationshipStates,
    implicit_relationships: RelationshipStates,
}

impl Record {
    pub fn new(identifier: RecordIdentifier) -> Self {
        Self {
            identifier,
            relationships: RelationshipStates::new(),
            implicit_relationships: RelationshipStates::new(),
        }
    }
}

impl HasRelationshipState for Record {
    fn relationships(&self) -> &RelationshipStates {
        &self.relationships
    }

    fn implicit_relationships(&self) -> &RelationshipStates {
        &self.implicit_relationships
    }
}

impl RecordInstance for Record {
    fn identifier(&self) -> &RecordIdentifier {
        &self.identifier
    }
}
