//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        .route("/api/health", get(handlers::health::get_health))
        .route("/api/render", post(handlers::render::render_fragment))
        .route("/api/generate", post(handlers::generate::generate))
        .route(
            "/api/entities",
            get(handlers::entities::list_entities).post(handlers::entities::create_entity),
        )
        .route(
            "/api/entities/{id}",
            get(handlers::entities::get_entity)
                .put(handlers::entities::update_entity)
                .delete(handlers::entities::delete_entity),
        )
        .route("/api/audit", get(handlers::entities::get_audit));

    Router::new()
        .merge(api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(security::csp_layer())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
