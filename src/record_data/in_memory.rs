//! InMemoryRecordDataStore - HashMap-backed record data provider.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{RecordData, RecordDataProvider};
use crate::error::{Result, SchemaError};
use crate::identifier::RecordIdentifier;

/// Record data keyed by local id.
///
/// Clone-friendly (cloning shares the same underlying storage).
#[derive(Clone, Default)]
pub struct InMemoryRecordDataStore {
    storage: Arc<RwLock<HashMap<String, Arc<RecordData>>>>,
}

impl InMemoryRecordDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record_data`, replacing any entry for the same identifier.
    pub fn insert(&self, record_data: RecordData) -> Result<Arc<RecordData>> {
        let record_data = Arc::new(record_data);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| SchemaError::LockPoisoned("record data write"))?;
        storage.insert(record_data.identifier().lid.clone(), record_data.clone());
        Ok(record_data)
    }

    pub fn remove(&self, identifier: &RecordIdentifier) -> Result<bool> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| SchemaError::LockPoisoned("record data write"))?;
        Ok(storage.remove(&identifier.lid).is_some())
    }

    pub fn len(&self) -> Result<usize> {
        let storage = self
            .storage
            .read()
            .map_err(|_| SchemaError::LockPoisoned("record data read"))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl RecordDataProvider for InMemoryRecordDataStore {
    fn record_data_for(&self, identifier: &RecordIdentifier) -> Result<Option<Arc<RecordData>>> {
        let storage = self
            .storage
            .read()
            .map_err(|_| SchemaError::LockPoisoned("record data read"))?;
        Ok(storage.get(&identifier.lid).cloned())
    }
}
