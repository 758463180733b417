//! Entity and audit API endpoints.
//!
//! Thin JSON layer over the [`Store`] trait. Entity ids are parsed
//! here so a malformed id is a 400 rather than a 404.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use pmw_store::{AuditEvent, Entity, EntityPatch, NewEntity};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ServerError;
use crate::state::AppState;

/// Query parameters for GET /api/entities.
#[derive(Deserialize)]
pub(crate) struct ListParams {
    /// Restrict the listing to one entity kind.
    kind: Option<String>,
}

/// Handle GET /api/entities.
pub(crate) async fn list_entities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Entity>>, ServerError> {
    let entities = state.store.list(params.kind.as_deref())?;
    Ok(Json(entities))
}

/// Handle POST /api/entities.
pub(crate) async fn create_entity(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewEntity>,
) -> Result<(StatusCode, Json<Entity>), ServerError> {
    let entity = state.store.insert(new)?;
    Ok((StatusCode::CREATED, Json(entity)))
}

/// Handle GET /api/entities/{id}.
pub(crate) async fn get_entity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Entity>, ServerError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.get(id)?))
}

/// Handle PUT /api/entities/{id}.
pub(crate) async fn update_entity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<EntityPatch>,
) -> Result<Json<Entity>, ServerError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.update(id, patch)?))
}

/// Handle DELETE /api/entities/{id}.
///
/// Returns the entity's final state.
pub(crate) async fn delete_entity(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Entity>, ServerError> {
    let id = parse_id(&id)?;
    Ok(Json(state.store.remove(id)?))
}

/// Handle GET /api/audit.
pub(crate) async fn get_audit(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AuditEvent>>, ServerError> {
    Ok(Json(state.store.audit_log()?))
}

/// Parse a path segment as an entity id.
fn parse_id(raw: &str) -> Result<Uuid, ServerError> {
    Uuid::parse_str(raw).map_err(|_| ServerError::InvalidId(raw.to_owned()))
}
