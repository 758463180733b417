//! Store trait and error types.
//!
//! Provides the core [`Store`] trait for abstracting entity and audit
//! persistence, along with [`StoreError`] for unified error handling
//! across backends.

use uuid::Uuid;

use crate::record::{AuditEvent, Entity, EntityPatch, NewEntity};

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreErrorKind {
    /// Entity does not exist.
    NotFound,
    /// Operation conflicts with existing state.
    Conflict,
    /// Rejected input (empty kind/name, empty patch).
    InvalidInput,
    /// Other/unknown error category.
    Other,
}

/// Retry guidance for store failures.
#[derive(Debug, PartialEq, Eq, Default)]
pub enum ErrorStatus {
    /// Don't retry (not found, invalid input).
    #[default]
    Permanent,
    /// Retry immediately.
    Temporary,
    /// Retry with backoff.
    Persistent,
}

/// Store error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StoreError {
    /// Semantic error category.
    pub kind: StoreErrorKind,
    /// Retry guidance.
    pub status: ErrorStatus,
    /// Entity context (if applicable).
    pub entity: Option<Uuid>,
    /// Backend identifier (e.g. "Memory").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a new store error.
    #[must_use]
    pub fn new(kind: StoreErrorKind) -> Self {
        Self {
            kind,
            status: ErrorStatus::Permanent,
            entity: None,
            backend: None,
            source: None,
        }
    }

    /// Attach entity context.
    #[must_use]
    pub fn with_entity(mut self, id: Uuid) -> Self {
        self.entity = Some(id);
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set retry status.
    #[must_use]
    pub fn with_status(mut self, status: ErrorStatus) -> Self {
        self.status = status;
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error for an entity.
    #[must_use]
    pub fn not_found(id: Uuid) -> Self {
        Self::new(StoreErrorKind::NotFound).with_entity(id)
    }

    /// Create an invalid input error with a message.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::InvalidInput).with_source(InputError(message.into()))
    }
}

/// Message-only source for [`StoreErrorKind::InvalidInput`].
#[derive(Debug)]
struct InputError(String);

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InputError {}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (entity: id)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StoreErrorKind::NotFound => "Not found",
            StoreErrorKind::Conflict => "Conflict",
            StoreErrorKind::InvalidInput => "Invalid input",
            StoreErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(entity) = &self.entity {
            write!(f, " (entity: {entity})")?;
        }

        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Store abstraction for workbench entities and the audit trail.
///
/// Implementations decide the lifetime of the data; the bundled
/// [`MemoryStore`](crate::MemoryStore) keeps everything for the
/// process lifetime only. Every mutation appends an audit event.
pub trait Store: Send + Sync {
    /// Create an entity, assigning a fresh unique id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::InvalidInput`] for an empty kind or name.
    fn insert(&self, new: NewEntity) -> Result<Entity, StoreError>;

    /// Fetch one entity by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::NotFound`] if the id is unknown.
    fn get(&self, id: Uuid) -> Result<Entity, StoreError>;

    /// List entities, optionally restricted to one kind.
    ///
    /// Entities are ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn list(&self, kind: Option<&str>) -> Result<Vec<Entity>, StoreError>;

    /// Apply a partial update and bump `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::NotFound`] for an unknown id and
    /// [`StoreErrorKind::InvalidInput`] for an empty patch.
    fn update(&self, id: Uuid, patch: EntityPatch) -> Result<Entity, StoreError>;

    /// Remove an entity, returning its final state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreErrorKind::NotFound`] if the id is unknown.
    fn remove(&self, id: Uuid) -> Result<Entity, StoreError>;

    /// The audit trail, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be read.
    fn audit_log(&self) -> Result<Vec<AuditEvent>, StoreError>;

    /// Reset the store: drop all entities and the audit trail.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be written.
    fn clear(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_new() {
        let err = StoreError::new(StoreErrorKind::NotFound);

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert_eq!(err.status, ErrorStatus::Permanent);
        assert!(err.entity.is_none());
        assert!(err.backend.is_none());
    }

    #[test]
    fn test_store_error_display_simple() {
        let err = StoreError::new(StoreErrorKind::NotFound);
        assert_eq!(err.to_string(), "Not found");
    }

    #[test]
    fn test_store_error_display_full() {
        let id = Uuid::nil();
        let err = StoreError::invalid_input("empty name")
            .with_backend("Memory")
            .with_entity(id);

        assert_eq!(
            err.to_string(),
            format!("[Memory] Invalid input: empty name (entity: {id})")
        );
    }

    #[test]
    fn test_store_error_not_found_carries_entity() {
        let id = Uuid::new_v4();
        let err = StoreError::not_found(id);

        assert_eq!(err.kind, StoreErrorKind::NotFound);
        assert_eq!(err.entity, Some(id));
    }

    #[test]
    fn test_store_error_with_status() {
        let err = StoreError::new(StoreErrorKind::Other).with_status(ErrorStatus::Temporary);
        assert_eq!(err.status, ErrorStatus::Temporary);
    }

    #[test]
    fn test_store_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StoreError>();
    }
}
