//! Store record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A workbench entity (ICP, brief, schedule draft, ...).
///
/// The payload is opaque JSON; the store only interprets `kind` (for
/// filtering) and `name` (for display).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Generated identifier, unique for the store's lifetime.
    pub id: Uuid,
    /// Entity category (e.g. "icp", "brief").
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Opaque payload.
    pub data: serde_json::Value,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Last mutation time (UTC).
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an entity; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntity {
    /// Entity category.
    pub kind: String,
    /// Display name.
    pub name: String,
    /// Opaque payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityPatch {
    /// New display name.
    pub name: Option<String>,
    /// New payload.
    pub data: Option<serde_json::Value>,
}

impl EntityPatch {
    /// True when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.data.is_none()
    }
}

/// Mutation kind recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// Entity created.
    Created,
    /// Entity updated.
    Updated,
    /// Entity removed.
    Deleted,
    /// Store reset.
    Cleared,
}

/// One entry of the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Generated identifier.
    pub id: Uuid,
    /// What happened.
    pub action: AuditAction,
    /// Affected entity, if any ([`AuditAction::Cleared`] has none).
    pub entity_id: Option<Uuid>,
    /// Human-readable summary.
    pub detail: String,
    /// When it happened (UTC).
    pub at: DateTime<Utc>,
}
