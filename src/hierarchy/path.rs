//! Hierarchy paths and ancestor/descendant resolution.
//!
//! A hierarchy path is the ordered id sequence from root ancestor down to
//! the entity itself, derived solely from the entity's own fields. Subtree
//! membership is an element-wise prefix test over id sequences, so an id
//! that happens to be a string prefix of another id never collides.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind};

/// Caller-supplied `id -> entity` lookup used for ancestor resolution.
pub type EntityMap = HashMap<String, Entity>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HierarchyPath {
    segments: Vec<String>,
}

impl HierarchyPath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last segment: the entity's own id.
    pub fn leaf(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// True if `other` lies at or below this path (exact match included).
    /// Compared segment by segment, never as joined strings.
    pub fn is_prefix_of(&self, other: &HierarchyPath) -> bool {
        self.segments.len() <= other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|(a, b)| a == b)
    }

    /// Shallow cycle guard: does this path already contain the given id?
    /// A parent whose own path contains a child's id is cyclically linked.
    pub fn contains(&self, id: &str) -> bool {
        self.segments.iter().any(|s| s == id)
    }
}

impl fmt::Display for HierarchyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Root-to-self id sequence for an entity. Pure: built from the entity's
/// own parent reference fields, no lookups performed.
pub fn hierarchy_path(entity: &Entity) -> HierarchyPath {
    let segments = match entity {
        Entity::Union(u) => vec![u.id.clone()],
        Entity::Conference(c) => vec![c.union_id.clone(), c.id.clone()],
        Entity::Church(c) => vec![c.union_id.clone(), c.conference_id.clone(), c.id.clone()],
    };
    HierarchyPath::new(segments)
}

/// Ancestors of an entity in root-first order, resolved through the
/// supplied map. A parent id missing from the map silently truncates the
/// walk; the data is expected to be a single consistent snapshot.
pub fn entity_ancestors<'a>(entity: &Entity, map: &'a EntityMap) -> Vec<&'a Entity> {
    let mut ancestors = Vec::new();
    let mut parent_ref = entity.parent_id().map(str::to_owned);

    while let Some(pid) = parent_ref {
        match map.get(&pid) {
            Some(parent) => {
                parent_ref = parent.parent_id().map(str::to_owned);
                ancestors.push(parent);
            }
            None => break,
        }
    }

    ancestors.reverse();
    ancestors
}

/// Every entity strictly below `entity` in the tree, as a flat list:
/// for a Union its conferences followed by their churches, for a
/// Conference its churches, nothing for a Church. Linear scans over the
/// candidate slice; entity counts are expected in the hundreds.
pub fn entity_descendants<'a>(entity: &Entity, all: &'a [Entity]) -> Vec<&'a Entity> {
    let mut descendants: Vec<&Entity> = Vec::new();

    match entity.kind() {
        EntityKind::Union => {
            let conferences: Vec<&Entity> = all
                .iter()
                .filter(|e| matches!(e, Entity::Conference(c) if c.union_id == entity.id()))
                .collect();
            let conference_ids: Vec<&str> = conferences.iter().map(|e| e.id()).collect();
            descendants.extend(conferences.iter());
            descendants.extend(all.iter().filter(
                |e| matches!(e, Entity::Church(c) if conference_ids.contains(&c.conference_id.as_str())),
            ));
        }
        EntityKind::Conference => {
            descendants.extend(all.iter().filter(
                |e| matches!(e, Entity::Church(c) if c.conference_id == entity.id()),
            ));
        }
        EntityKind::Church => {}
    }

    descendants
}
