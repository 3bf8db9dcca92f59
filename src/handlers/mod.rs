use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::store::Registry;

pub mod entities;
pub mod hierarchy;

/// Assemble the full application router over a registry.
pub fn app(registry: Registry) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Hierarchy (static segment wins over :collection)
        .route("/api/hierarchy/tree", get(hierarchy::tree))
        .route("/api/hierarchy/:id/path", get(hierarchy::path))
        .route("/api/hierarchy/:id/ancestors", get(hierarchy::ancestors))
        .route("/api/hierarchy/:id/descendants", get(hierarchy::descendants))
        .route("/api/hierarchy/:id/accessible", get(hierarchy::accessible))
        // Entity collections
        .route(
            "/api/:collection",
            get(entities::collection_list).post(entities::collection_create),
        )
        .route(
            "/api/:collection/:id",
            get(entities::entity_get)
                .patch(entities::entity_update)
                .delete(entities::entity_delete),
        )
        .with_state(registry);

    // Global middleware
    if config::config().api.permissive_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if config::config().api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "church-admin-api",
        "description": "Administrative API for unions, conferences, and churches",
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": { "status": "healthy" }
    }))
}
