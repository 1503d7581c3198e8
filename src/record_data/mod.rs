//! Record data - per-record relationship state and the accessor that finds it.
//!
//! Relationship state lives on a [`RecordData`] (or on an instance acting as
//! its own record data). The [`RecordDataAccessor`] asks a
//! [`RecordDataProvider`] which object backs an instance and returns that
//! object's containers by handle.
//!
//! Two namespaces are kept per record: declared relationships, keyed by
//! property name, and implicit relationships, keyed by
//! [`implicit_relationship_key`], for inverses that neither schema declares.
//!
//! ## Example
//!
//! ```ignore
//! let store = InMemoryRecordDataStore::new();
//! store.insert(RecordData::from_schema(RecordIdentifier::new("post", "1"), &schema)?)?;
//!
//! let accessor = RecordDataAccessor::new(store);
//! let comments = accessor.relationship_state_for(&record, "comments")?;
//! ```

mod accessor;
mod in_memory;
mod record_data;
mod state;

use std::sync::Arc;

use crate::error::Result;
use crate::identifier::RecordIdentifier;

pub use accessor::RecordDataAccessor;
pub use in_memory::InMemoryRecordDataStore;
pub use record_data::{HasRelationshipState, Record, RecordData, RecordInstance};
pub use state::{implicit_relationship_key, RelationshipState, RelationshipStates};

/// Source of truth for which record data backs an instance.
pub trait RecordDataProvider {
    fn record_data_for(&self, identifier: &RecordIdentifier) -> Result<Option<Arc<RecordData>>>;
}

/// Provider with no record data at all; every instance is its own backing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecordData;

impl RecordDataProvider for NoRecordData {
    fn record_data_for(&self, _identifier: &RecordIdentifier) -> Result<Option<Arc<RecordData>>> {
        Ok(None)
    }
}

impl<P: RecordDataProvider + ?Sized> RecordDataProvider for Arc<P> {
    fn record_data_for(&self, identifier: &RecordIdentifier) -> Result<Option<Arc<RecordData>>> {
        (**self).record_data_for(identifier)
    }
}
