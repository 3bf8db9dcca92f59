//! The organizational hierarchy model: a fixed three-level strict tree
//! (Union -> Conference -> Church) plus the pure traversal, assembly,
//! access, and validation functions the rest of the service is built on.
//!
//! Everything here is synchronous and side-effect free; callers supply
//! the entity snapshot.

pub mod access;
pub mod entity;
pub mod error;
pub mod path;
pub mod tree;
pub mod validate;

#[cfg(test)]
pub(crate) mod testing;

pub use access::{accessible_entities, can_manage_entity, filter_entities_by_access};
pub use entity::{level_info, Church, Conference, Entity, EntityKind, LevelInfo, Union, LEVELS};
pub use error::HierarchyError;
pub use path::{entity_ancestors, entity_descendants, hierarchy_path, EntityMap, HierarchyPath};
pub use tree::{build_entity_tree, node_count, EntityNode};
pub use validate::{
    creation_issues, validate_entity_creation, EntityDraft, ValidationIssue, ValidationReport,
};
