//! Forest assembly from a flat entity list.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::entity::Entity;

/// One node of the assembled forest: the entity, its static level, and
/// its (possibly empty) children.
#[derive(Debug, Clone, Serialize)]
pub struct EntityNode {
    pub entity: Entity,
    pub level: u8,
    pub children: Vec<EntityNode>,
}

/// Build a forest from a flat list. Two passes: index children by parent
/// id, then attach recursively. An entity whose parent id is not in the
/// input becomes a root rather than an error, so partial snapshots still
/// render; entities whose parent references form a cycle are promoted to
/// roots the same way. Every child list and the root list is sorted by
/// name.
///
/// The result contains exactly one node per input entity; each entity is
/// attached at most once.
pub fn build_entity_tree(entities: Vec<Entity>) -> Vec<EntityNode> {
    let ids: HashSet<String> = entities.iter().map(|e| e.id().to_string()).collect();

    let mut children_of: HashMap<String, Vec<Entity>> = HashMap::new();
    let mut roots: Vec<Entity> = Vec::new();

    for entity in entities {
        match entity.parent_id() {
            Some(pid) if ids.contains(pid) => {
                children_of.entry(pid.to_string()).or_default().push(entity);
            }
            _ => roots.push(entity),
        }
    }

    let mut forest: Vec<EntityNode> = roots
        .into_iter()
        .map(|root| attach(root, &mut children_of))
        .collect();

    // Mutually-referencing parents never reach the root list, so anything
    // still indexed here was never attached. Promote those entries to
    // roots rather than dropping them.
    while let Some(pid) = children_of.keys().next().cloned() {
        let mut stranded = children_of.remove(&pid).unwrap_or_default();
        stranded.sort_by(|a, b| a.name().cmp(b.name()));
        for entity in stranded {
            forest.push(attach(entity, &mut children_of));
        }
    }

    forest.sort_by(|a, b| a.entity.name().cmp(b.entity.name()));
    forest
}

fn attach(entity: Entity, children_of: &mut HashMap<String, Vec<Entity>>) -> EntityNode {
    let mut kids = children_of.remove(entity.id()).unwrap_or_default();
    kids.sort_by(|a, b| a.name().cmp(b.name()));

    let children = kids.into_iter().map(|k| attach(k, children_of)).collect();

    EntityNode {
        level: entity.level(),
        entity,
        children,
    }
}

/// Recursive node count over a forest.
pub fn node_count(nodes: &[EntityNode]) -> usize {
    nodes.iter().map(|n| 1 + node_count(&n.children)).sum()
}
