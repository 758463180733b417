//! Entity and audit store for the PMW workbench.
//!
//! The workbench keeps its working set (entities created from the UI
//! and the audit trail of mutations) behind the [`Store`] trait instead
//! of module-level mutable globals. The bundled backend is
//! [`MemoryStore`], whose lifetime policy is explicit: state lives from
//! process start to process exit, with no persistence guarantee, and
//! [`Store::clear`] is the one reset point.
//!
//! Identifiers are generated UUIDs and unique within a store's
//! lifetime. Every mutation appends an [`AuditEvent`].

mod memory;
mod record;
mod store;

pub use memory::MemoryStore;
pub use record::{AuditAction, AuditEvent, Entity, EntityPatch, NewEntity};
pub use store::{ErrorStatus, Store, StoreError, StoreErrorKind};
