//! Collection handlers for the three entity kinds, routed generically by
//! collection name (`/api/unions`, `/api/conferences`, `/api/churches`).

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::hierarchy::{Entity, EntityDraft, EntityKind};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::store::{EntityPatch, Registry};

fn collection_kind(collection: &str) -> Result<EntityKind, ApiError> {
    match collection {
        "unions" => Ok(EntityKind::Union),
        "conferences" => Ok(EntityKind::Conference),
        "churches" => Ok(EntityKind::Church),
        other => Err(ApiError::not_found(format!(
            "Unknown collection: {}",
            other
        ))),
    }
}

/// Fetch an entity and make sure it belongs to the collection named in
/// the URL, so `/api/unions/:id` cannot address a church.
fn get_in_collection(registry: &Registry, collection: &str, id: &str) -> Result<Entity, ApiError> {
    let kind = collection_kind(collection)?;
    let entity = registry.get(id)?;
    if entity.kind() != kind {
        return Err(ApiError::not_found(format!("Entity not found: {}", id)));
    }
    Ok(entity)
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/:collection - list entities of one kind, sorted by name
pub async fn collection_list(
    State(registry): State<Registry>,
    Path(collection): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Entity>> {
    let kind = collection_kind(&collection)?;
    Ok(ApiResponse::success(
        registry.list(kind, query.include_inactive),
    ))
}

/// POST /api/:collection - validate and create an entity
pub async fn collection_create(
    State(registry): State<Registry>,
    Path(collection): Path<String>,
    Json(draft): Json<EntityDraft>,
) -> ApiResult<Entity> {
    let kind = collection_kind(&collection)?;
    let created = registry.create(kind, draft)?;
    Ok(ApiResponse::created(created))
}

/// GET /api/:collection/:id - fetch a single entity
pub async fn entity_get(
    State(registry): State<Registry>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Entity> {
    let entity = get_in_collection(&registry, &collection, &id)?;
    Ok(ApiResponse::success(entity))
}

/// PATCH /api/:collection/:id - update name, active flag, or metadata
pub async fn entity_update(
    State(registry): State<Registry>,
    Path((collection, id)): Path<(String, String)>,
    Json(patch): Json<EntityPatch>,
) -> ApiResult<Entity> {
    get_in_collection(&registry, &collection, &id)?;
    let updated = registry.update(&id, patch)?;
    Ok(ApiResponse::success(updated))
}

/// DELETE /api/:collection/:id - soft delete (deactivate)
pub async fn entity_delete(
    State(registry): State<Registry>,
    Path((collection, id)): Path<(String, String)>,
) -> ApiResult<Entity> {
    get_in_collection(&registry, &collection, &id)?;
    let deactivated = registry.deactivate(&id)?;
    Ok(ApiResponse::success(deactivated).with_message("Entity deactivated"))
}
