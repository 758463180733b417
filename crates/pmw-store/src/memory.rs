//! In-memory store backend.
//!
//! State lives from process start to process exit; nothing is written
//! to disk. [`Store::clear`] is the only reset point.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use crate::record::{AuditAction, AuditEvent, Entity, EntityPatch, NewEntity};
use crate::store::{Store, StoreError};

const BACKEND: &str = "Memory";

/// Process-lifetime store backed by locked maps.
///
/// # Example
///
/// ```
/// use pmw_store::{MemoryStore, NewEntity, Store};
///
/// let store = MemoryStore::new();
/// let entity = store
///     .insert(NewEntity {
///         kind: "icp".to_owned(),
///         name: "Acme".to_owned(),
///         data: serde_json::json!({"segment": "smb"}),
///     })
///     .unwrap();
/// assert_eq!(store.get(entity.id).unwrap().name, "Acme");
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    entities: RwLock<HashMap<Uuid, Entity>>,
    audit: RwLock<Vec<AuditEvent>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
            audit: RwLock::new(Vec::new()),
        }
    }
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity directly, for test setup.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned or the input is invalid.
    #[must_use]
    pub fn with_entity(
        self,
        kind: impl Into<String>,
        name: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        self.insert(NewEntity {
            kind: kind.into(),
            name: name.into(),
            data,
        })
        .unwrap();
        self
    }

    fn record(&self, action: AuditAction, entity_id: Option<Uuid>, detail: String) {
        self.audit.write().unwrap().push(AuditEvent {
            id: Uuid::new_v4(),
            action,
            entity_id,
            detail,
            at: Utc::now(),
        });
    }
}

impl Store for MemoryStore {
    fn insert(&self, new: NewEntity) -> Result<Entity, StoreError> {
        if new.kind.trim().is_empty() {
            return Err(StoreError::invalid_input("entity kind must not be empty")
                .with_backend(BACKEND));
        }
        if new.name.trim().is_empty() {
            return Err(StoreError::invalid_input("entity name must not be empty")
                .with_backend(BACKEND));
        }

        let now = Utc::now();
        let entity = Entity {
            id: Uuid::new_v4(),
            kind: new.kind,
            name: new.name,
            data: new.data,
            created_at: now,
            updated_at: now,
        };

        self.entities
            .write()
            .unwrap()
            .insert(entity.id, entity.clone());
        self.record(
            AuditAction::Created,
            Some(entity.id),
            format!("created {} \"{}\"", entity.kind, entity.name),
        );
        tracing::debug!(id = %entity.id, kind = %entity.kind, "Entity created");

        Ok(entity)
    }

    fn get(&self, id: Uuid) -> Result<Entity, StoreError> {
        self.entities
            .read()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id).with_backend(BACKEND))
    }

    fn list(&self, kind: Option<&str>) -> Result<Vec<Entity>, StoreError> {
        let entities = self.entities.read().unwrap();
        let mut listed: Vec<Entity> = entities
            .values()
            .filter(|e| kind.is_none_or(|k| e.kind == k))
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary; creation order is the
        // contract.
        listed.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(listed)
    }

    fn update(&self, id: Uuid, patch: EntityPatch) -> Result<Entity, StoreError> {
        if patch.is_empty() {
            return Err(StoreError::invalid_input("empty patch")
                .with_backend(BACKEND)
                .with_entity(id));
        }

        let mut entities = self.entities.write().unwrap();
        let entity = entities
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(id).with_backend(BACKEND))?;

        if let Some(name) = patch.name {
            entity.name = name;
        }
        if let Some(data) = patch.data {
            entity.data = data;
        }
        entity.updated_at = Utc::now();
        let updated = entity.clone();
        drop(entities);

        self.record(
            AuditAction::Updated,
            Some(id),
            format!("updated {} \"{}\"", updated.kind, updated.name),
        );

        Ok(updated)
    }

    fn remove(&self, id: Uuid) -> Result<Entity, StoreError> {
        let removed = self
            .entities
            .write()
            .unwrap()
            .remove(&id)
            .ok_or_else(|| StoreError::not_found(id).with_backend(BACKEND))?;

        self.record(
            AuditAction::Deleted,
            Some(id),
            format!("deleted {} \"{}\"", removed.kind, removed.name),
        );

        Ok(removed)
    }

    fn audit_log(&self) -> Result<Vec<AuditEvent>, StoreError> {
        Ok(self.audit.read().unwrap().clone())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.entities.write().unwrap().clear();
        self.audit.write().unwrap().clear();
        tracing::debug!("Store cleared");
        Ok(())
    }
}
