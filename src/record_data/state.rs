//! Relationship state and the shared containers that hold it.

use std::sync::{Arc, RwLock};

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::error::{Result, SchemaError};
use crate::identifier::RecordIdentifier;
use crate::name::normalize_model_name;
use crate::schema::{RelationshipKind, RelationshipMeta};

/// Key under which the inverse side of `source_type.source_key` is stored
/// when the related type declares no inverse. The source type is
/// normalized, so `BlogPost` and `blog-post` share a key.
pub fn implicit_relationship_key(source_type: &str, source_key: &str) -> String {
    format!("implicit-{}:{}", normalize_model_name(source_type), source_key)
}

/// Membership of one relationship on one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipState {
    key: String,
    kind: RelationshipKind,
    related_type: String,
    inverse_key: Option<String>,
    implicit: bool,
    members: IndexSet<RecordIdentifier>,
}

impl RelationshipState {
    /// Empty state for a declared relationship.
    pub fn for_definition(meta: &RelationshipMeta, inverse_key: Option<String>) -> Self {
        Self {
            key: meta.name.clone(),
            kind: meta.kind,
            related_type: meta.type_name.clone(),
            inverse_key,
            implicit: false,
            members: IndexSet::new(),
        }
    }

    /// Empty implicit state: the undeclared inverse of `source_type.source_key`.
    pub fn implicit(source_type: &str, source_key: &str) -> Self {
        Self {
            key: implicit_relationship_key(source_type, source_key),
            kind: RelationshipKind::HasMany,
            related_type: normalize_model_name(source_type),
            inverse_key: Some(source_key.to_string()),
            implicit: true,
            members: IndexSet::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> RelationshipKind {
        self.kind
    }

    pub fn related_type(&self) -> &str {
        &self.related_type
    }

    pub fn inverse_key(&self) -> Option<&str> {
        self.inverse_key.as_deref()
    }

    pub fn is_implicit(&self) -> bool {
        self.implicit
    }

    /// Add a member. A belongs-to relationship holds at most one member, so
    /// adding replaces the current one. Returns false if already present.
    pub fn add_member(&mut self, member: RecordIdentifier) -> bool {
        if self.members.contains(&member) {
            return false;
        }
        if self.kind == RelationshipKind::BelongsTo {
            self.members.clear();
        }
        self.members.insert(member)
    }

    pub fn remove_member(&mut self, member: &RecordIdentifier) -> bool {
        self.members.shift_remove(member)
    }

    pub fn contains(&self, member: &RecordIdentifier) -> bool {
        self.members.contains(member)
    }

    pub fn members(&self) -> impl Iterator<Item = &RecordIdentifier> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Relationship name -> state, shared by handle.
///
/// Clone-friendly (cloning shares the same underlying map). The accessor
/// hands these out by handle so callers mutate the record's own state, not
/// a copy.
#[derive(Debug, Clone, Default)]
pub struct RelationshipStates {
    states: Arc<RwLock<IndexMap<String, RelationshipState>>>,
}

impl RelationshipStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether both handles point at the same container.
    pub fn ptr_eq(&self, other: &RelationshipStates) -> bool {
        Arc::ptr_eq(&self.states, &other.states)
    }

    pub fn get(&self, key: &str) -> Result<Option<RelationshipState>> {
        let states = self
            .states
            .read()
            .map_err(|_| SchemaError::LockPoisoned("relationship state read"))?;
        Ok(states.get(key).cloned())
    }

    pub fn contains(&self, key: &str) -> Result<bool> {
        let states = self
            .states
            .read()
            .map_err(|_| SchemaError::LockPoisoned("relationship state read"))?;
        Ok(states.contains_key(key))
    }

    /// Insert or replace the state stored under its key.
    pub fn insert(&self, state: RelationshipState) -> Result<Option<RelationshipState>> {
        let mut states = self
            .states
            .write()
            .map_err(|_| SchemaError::LockPoisoned("relationship state write"))?;
        Ok(states.insert(state.key.clone(), state))
    }

    /// Mutate the state under `key` in place. `Ok(None)` if there is none.
    pub fn update<R>(
        &self,
        key: &str,
        f: impl FnOnce(&mut RelationshipState) -> R,
    ) -> Result<Option<R>> {
        let mut states = self
            .states
            .write()
            .map_err(|_| SchemaError::LockPoisoned("relationship state write"))?;
        Ok(states.get_mut(key).map(f))
    }

    /// Mutate the state under `key`, creating it with `init` first if missing.
    pub fn upsert<R>(
        &self,
        key: &str,
        init: impl FnOnce() -> RelationshipState,
        f: impl FnOnce(&mut RelationshipState) -> R,
    ) -> Result<R> {
        let mut states = self
            .states
            .write()
            .map_err(|_| SchemaError::LockPoisoned("relationship state write"))?;
        let state = states.entry(key.to_string()).or_insert_with(init);
        Ok(f(state))
    }

    pub fn remove(&self, key: &str) -> Result<Option<RelationshipState>> {
        let mut states = self
            .states
            .write()
            .map_err(|_| SchemaError::LockPoisoned("relationship state write"))?;
        Ok(states.shift_remove(key))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let states = self
            .states
            .read()
            .map_err(|_| SchemaError::LockPoisoned("relationship state read"))?;
        Ok(states.keys().cloned().collect())
    }

    pub fn len(&self) -> Result<usize> {
        let states = self
            .states
            .read()
            .map_err(|_| SchemaError::LockPoisoned("relationship state read"))?;
        Ok(states.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
