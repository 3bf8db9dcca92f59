use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::HierarchyError;

/// The three organizational levels, root to leaf:
/// Union (0) -> Conference (1) -> Church (2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Union,
    Conference,
    Church,
}

/// One row of the static level table: depth plus adjacent kinds.
#[derive(Debug, Clone, Copy)]
pub struct LevelInfo {
    pub kind: EntityKind,
    pub level: u8,
    pub parent_kind: Option<EntityKind>,
    pub child_kind: Option<EntityKind>,
}

pub const LEVELS: [LevelInfo; 3] = [
    LevelInfo {
        kind: EntityKind::Union,
        level: 0,
        parent_kind: None,
        child_kind: Some(EntityKind::Conference),
    },
    LevelInfo {
        kind: EntityKind::Conference,
        level: 1,
        parent_kind: Some(EntityKind::Union),
        child_kind: Some(EntityKind::Church),
    },
    LevelInfo {
        kind: EntityKind::Church,
        level: 2,
        parent_kind: Some(EntityKind::Conference),
        child_kind: None,
    },
];

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Union => "union",
            EntityKind::Conference => "conference",
            EntityKind::Church => "church",
        }
    }

    pub fn info(&self) -> &'static LevelInfo {
        &LEVELS[self.level() as usize]
    }

    pub fn level(&self) -> u8 {
        match self {
            EntityKind::Union => 0,
            EntityKind::Conference => 1,
            EntityKind::Church => 2,
        }
    }

    pub fn parent_kind(&self) -> Option<EntityKind> {
        self.info().parent_kind
    }

    pub fn child_kind(&self) -> Option<EntityKind> {
        self.info().child_kind
    }
}

/// Look up level metadata by wire tag. Unknown tags are the one hard
/// error this module produces.
pub fn level_info(tag: &str) -> Result<&'static LevelInfo, HierarchyError> {
    let kind = tag.parse::<EntityKind>()?;
    Ok(kind.info())
}

impl FromStr for EntityKind {
    type Err = HierarchyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "union" => Ok(EntityKind::Union),
            "conference" => Ok(EntityKind::Conference),
            "church" => Ok(EntityKind::Church),
            other => Err(HierarchyError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Union {
    pub id: String,
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conference {
    pub id: String,
    pub name: String,
    pub union_id: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Church {
    pub id: String,
    pub name: String,
    pub conference_id: String,
    /// Redundant with the parent conference's union_id; consistency is
    /// checked at creation time only.
    pub union_id: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub metadata: Value,
}

/// An organizational entity, discriminated on the wire by its `type` tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entity {
    Union(Union),
    Conference(Conference),
    Church(Church),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Union(_) => EntityKind::Union,
            Entity::Conference(_) => EntityKind::Conference,
            Entity::Church(_) => EntityKind::Church,
        }
    }

    pub fn level(&self) -> u8 {
        self.kind().level()
    }

    pub fn id(&self) -> &str {
        match self {
            Entity::Union(u) => &u.id,
            Entity::Conference(c) => &c.id,
            Entity::Church(c) => &c.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Entity::Union(u) => &u.name,
            Entity::Conference(c) => &c.name,
            Entity::Church(c) => &c.name,
        }
    }

    pub fn is_active(&self) -> bool {
        match self {
            Entity::Union(u) => u.is_active,
            Entity::Conference(c) => c.is_active,
            Entity::Church(c) => c.is_active,
        }
    }

    /// Immediate parent reference: Conference -> union_id,
    /// Church -> conference_id. Unions are roots.
    pub fn parent_id(&self) -> Option<&str> {
        match self {
            Entity::Union(_) => None,
            Entity::Conference(c) => Some(&c.union_id),
            Entity::Church(c) => Some(&c.conference_id),
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Entity::Union(_))
    }

    pub fn is_conference(&self) -> bool {
        matches!(self, Entity::Conference(_))
    }

    pub fn is_church(&self) -> bool {
        matches!(self, Entity::Church(_))
    }

    pub fn set_name(&mut self, name: String) {
        match self {
            Entity::Union(u) => u.name = name,
            Entity::Conference(c) => c.name = name,
            Entity::Church(c) => c.name = name,
        }
    }

    pub fn set_active(&mut self, active: bool) {
        match self {
            Entity::Union(u) => u.is_active = active,
            Entity::Conference(c) => c.is_active = active,
            Entity::Church(c) => c.is_active = active,
        }
    }

    pub fn set_metadata(&mut self, metadata: Value) {
        match self {
            Entity::Union(u) => u.metadata = metadata,
            Entity::Conference(c) => c.metadata = metadata,
            Entity::Church(c) => c.metadata = metadata,
        }
    }

    pub fn touch(&mut self, at: DateTime<Utc>) {
        match self {
            Entity::Union(u) => u.updated_at = at,
            Entity::Conference(c) => c.updated_at = at,
            Entity::Church(c) => c.updated_at = at,
        }
    }
}
