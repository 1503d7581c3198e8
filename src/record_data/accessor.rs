use super::{
    HasRelationshipState, RecordDataProvider, RecordInstance, RelationshipState,
    RelationshipStates,
};
use crate::error::Result;

/// Finds the relationship state backing a record instance.
///
/// Stateless: it owns no state and caches nothing. Each call asks the
/// provider for the record data behind the instance and falls back to the
/// instance itself when there is none.
pub struct RecordDataAccessor<P> {
    provider: P,
}

impl<P: RecordDataProvider> RecordDataAccessor<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The declared-relationship container, by handle.
    pub fn relationships_for<I: RecordInstance + ?Sized>(
        &self,
        instance: &I,
    ) -> Result<RelationshipStates> {
        Ok(match self.provider.record_data_for(instance.identifier())? {
            Some(record_data) => record_data.relationships().clone(),
            None => instance.relationships().clone(),
        })
    }

    pub fn relationship_state_for<I: RecordInstance + ?Sized>(
        &self,
        instance: &I,
        property_name: &str,
    ) -> Result<Option<RelationshipState>> {
        self.relationships_for(instance)?.get(property_name)
    }

    /// The implicit-relationship container, by handle.
    pub fn implicit_relationships_for<I: RecordInstance + ?Sized>(
        &self,
        instance: &I,
    ) -> Result<RelationshipStates> {
        Ok(match self.provider.record_data_for(instance.identifier())? {
            Some(record_data) => record_data.implicit_relationships().clone(),
            None => instance.implicit_relationships().clone(),
        })
    }

    pub fn implicit_relationship_state_for<I: RecordInstance + ?Sized>(
        &self,
        instance: &I,
        property_name: &str,
    ) -> Result<Option<RelationshipState>> {
        self.implicit_relationships_for(instance)?.get(property_name)
    }
}
