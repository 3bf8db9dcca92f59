//! In-memory entity registry.
//!
//! The platform operates on request-scoped snapshots rather than a
//! database; this registry is the in-process source of those snapshots.
//! Creation runs the hierarchy validation rules against the current
//! contents, deletes are soft (`is_active` is cleared), and timestamps
//! are assigned here the way the original backend assigned them
//! server-side.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::hierarchy::{
    creation_issues, Church, Conference, Entity, EntityDraft, EntityKind, EntityMap, Union,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    #[error("Validation failed: {}", errors.join("; "))]
    Validation { errors: Vec<String> },
}

/// Partial update payload for PATCH. Parent references are fixed at
/// creation and cannot be changed here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntityPatch {
    pub name: Option<String>,
    pub is_active: Option<bool>,
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    inner: Arc<RwLock<EntityMap>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a registry from already-formed entities, bypassing creation
    /// validation. Fixture and test path.
    pub fn with_entities(entities: Vec<Entity>) -> Self {
        let registry = Self::new();
        {
            let mut map = registry.write();
            for entity in entities {
                map.insert(entity.id().to_string(), entity);
            }
        }
        registry
    }

    fn read(&self) -> RwLockReadGuard<'_, EntityMap> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, EntityMap> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Validate and insert a new entity. The id is caller-chosen when the
    /// draft carries one, otherwise assigned as a UUID v4.
    pub fn create(&self, kind: EntityKind, draft: EntityDraft) -> Result<Entity, StoreError> {
        let mut map = self.write();

        let mut issues = creation_issues(kind, &draft, &map);
        if !config::config().hierarchy.strict_references {
            issues.retain(|issue| !issue.is_reference());
        }
        if !issues.is_empty() {
            return Err(StoreError::Validation {
                errors: issues.iter().map(ToString::to_string).collect(),
            });
        }

        let id = draft
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        if map.contains_key(&id) {
            return Err(StoreError::AlreadyExists(id));
        }

        let now = Utc::now();
        let name = draft.name.trim().to_string();
        let is_active = draft.is_active.unwrap_or(true);
        let metadata = draft.metadata.clone().unwrap_or(Value::Null);

        let entity = match kind {
            EntityKind::Union => Entity::Union(Union {
                id: id.clone(),
                name,
                is_active,
                created_at: now,
                updated_at: now,
                metadata,
            }),
            EntityKind::Conference => Entity::Conference(Conference {
                id: id.clone(),
                name,
                union_id: require_field(draft.union_id, "union_id")?,
                is_active,
                created_at: now,
                updated_at: now,
                metadata,
            }),
            EntityKind::Church => {
                let conference_id = require_field(draft.conference_id, "conference_id")?;
                // Backfill the redundant union_id from the parent when the
                // caller left it out
                let union_id = match draft.union_id {
                    Some(uid) => uid,
                    None => match map.get(&conference_id) {
                        Some(Entity::Conference(parent)) => parent.union_id.clone(),
                        _ => String::new(),
                    },
                };
                Entity::Church(Church {
                    id: id.clone(),
                    name,
                    conference_id,
                    union_id,
                    is_active,
                    created_at: now,
                    updated_at: now,
                    metadata,
                })
            }
        };

        tracing::info!(kind = %kind, id = %id, "created entity");
        map.insert(id, entity.clone());
        Ok(entity)
    }

    pub fn get(&self, id: &str) -> Result<Entity, StoreError> {
        self.read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Entities of one kind, sorted by name. Deactivated entities are
    /// hidden unless asked for.
    pub fn list(&self, kind: EntityKind, include_inactive: bool) -> Vec<Entity> {
        let map = self.read();
        let mut entities: Vec<Entity> = map
            .values()
            .filter(|e| e.kind() == kind && (include_inactive || e.is_active()))
            .cloned()
            .collect();
        entities.sort_by(|a, b| a.name().cmp(b.name()));
        entities
    }

    pub fn update(&self, id: &str, patch: EntityPatch) -> Result<Entity, StoreError> {
        let mut map = self.write();
        let entity = map
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(StoreError::Validation {
                    errors: vec!["Name is required".to_string()],
                });
            }
            entity.set_name(name);
        }
        if let Some(active) = patch.is_active {
            entity.set_active(active);
        }
        if let Some(metadata) = patch.metadata {
            entity.set_metadata(metadata);
        }
        entity.touch(Utc::now());

        Ok(entity.clone())
    }

    /// Soft delete: clears `is_active` and leaves the record in place.
    pub fn deactivate(&self, id: &str) -> Result<Entity, StoreError> {
        let mut map = self.write();
        let entity = map
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        entity.set_active(false);
        entity.touch(Utc::now());
        tracing::info!(id = %id, "deactivated entity");
        Ok(entity.clone())
    }

    /// Full snapshot, inactive entities included.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.read().values().cloned().collect()
    }

    /// The `id -> entity` lookup the hierarchy functions take.
    pub fn entity_map(&self) -> EntityMap {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}

fn require_field(value: Option<String>, field: &str) -> Result<String, StoreError> {
    value.ok_or_else(|| StoreError::Validation {
        errors: vec![format!("{} is required", field)],
    })
}
