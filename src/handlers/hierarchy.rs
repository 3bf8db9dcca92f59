//! Read-only hierarchy endpoints over the current snapshot: forest
//! assembly, paths, ancestry, and subtree visibility.

use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::config;
use crate::error::ApiError;
use crate::hierarchy::{
    build_entity_tree, entity_ancestors, entity_descendants, filter_entities_by_access,
    hierarchy_path, Entity, EntityNode, HierarchyPath,
};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::store::Registry;

/// GET /api/hierarchy/tree - forest of active entities
pub async fn tree(State(registry): State<Registry>) -> ApiResult<Vec<EntityNode>> {
    let entities: Vec<Entity> = registry
        .snapshot()
        .into_iter()
        .filter(|e| e.is_active())
        .collect();

    let forest = build_entity_tree(entities);

    if config::config().hierarchy.warn_on_orphans {
        for root in forest.iter().filter(|n| n.level > 0) {
            tracing::warn!(
                id = %root.entity.id(),
                kind = %root.entity.kind(),
                "adopted entity with dangling parent reference as tree root"
            );
        }
    }

    Ok(ApiResponse::success(forest))
}

/// GET /api/hierarchy/:id/path - root-to-self id sequence
pub async fn path(
    State(registry): State<Registry>,
    Path(id): Path<String>,
) -> ApiResult<HierarchyPath> {
    let entity = registry.get(&id)?;
    Ok(ApiResponse::success(hierarchy_path(&entity)))
}

/// GET /api/hierarchy/:id/ancestors - resolved ancestors, root first
pub async fn ancestors(
    State(registry): State<Registry>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Entity>> {
    let map = registry.entity_map();
    let entity = map
        .get(&id)
        .cloned()
        .ok_or_else(|| ApiError::not_found(format!("Entity not found: {}", id)))?;

    let resolved: Vec<Entity> = entity_ancestors(&entity, &map)
        .into_iter()
        .cloned()
        .collect();
    Ok(ApiResponse::success(resolved))
}

/// GET /api/hierarchy/:id/descendants - flat subtree below the entity
pub async fn descendants(
    State(registry): State<Registry>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Entity>> {
    let entity = registry.get(&id)?;
    let mut all = registry.snapshot();
    all.sort_by(|a, b| a.name().cmp(b.name()));

    let resolved: Vec<Entity> = entity_descendants(&entity, &all)
        .into_iter()
        .cloned()
        .collect();
    Ok(ApiResponse::success(resolved))
}

#[derive(Debug, Deserialize)]
pub struct AccessibleQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/hierarchy/:id/accessible - entities the given entity manages
pub async fn accessible(
    State(registry): State<Registry>,
    Path(id): Path<String>,
    Query(query): Query<AccessibleQuery>,
) -> ApiResult<Vec<Entity>> {
    let manager = registry.get(&id)?;
    let mut candidates: Vec<Entity> = registry
        .snapshot()
        .into_iter()
        .filter(|e| query.include_inactive || e.is_active())
        .collect();
    candidates.sort_by(|a, b| a.name().cmp(b.name()));

    Ok(ApiResponse::success(filter_entities_by_access(
        &manager, candidates,
    )))
}
