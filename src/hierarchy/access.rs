//! Subtree visibility: who can manage whom.

use super::entity::Entity;
use super::path::hierarchy_path;

/// True if `manager` is `target` itself or an ancestor of it, tested by
/// structural path prefix (id sequences compared element-wise).
pub fn can_manage_entity(manager: &Entity, target: &Entity) -> bool {
    if manager.id() == target.id() {
        return true;
    }
    hierarchy_path(manager).is_prefix_of(&hierarchy_path(target))
}

/// Borrowing filter over a candidate slice.
pub fn accessible_entities<'a>(manager: &Entity, candidates: &'a [Entity]) -> Vec<&'a Entity> {
    candidates
        .iter()
        .filter(|target| can_manage_entity(manager, target))
        .collect()
}

/// Owning variant for callers that already hold the list by value.
pub fn filter_entities_by_access(manager: &Entity, candidates: Vec<Entity>) -> Vec<Entity> {
    candidates
        .into_iter()
        .filter(|target| can_manage_entity(manager, target))
        .collect()
}
