//! Fixture constructors shared by the hierarchy unit tests.

use chrono::{TimeZone, Utc};
use serde_json::Value;

use super::entity::{Church, Conference, Entity, Union};

fn ts() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

pub fn union(id: &str, name: &str) -> Entity {
    Entity::Union(Union {
        id: id.to_string(),
        name: name.to_string(),
        is_active: true,
        created_at: ts(),
        updated_at: ts(),
        metadata: Value::Null,
    })
}

pub fn conference(id: &str, name: &str, union_id: &str) -> Entity {
    Entity::Conference(Conference {
        id: id.to_string(),
        name: name.to_string(),
        union_id: union_id.to_string(),
        is_active: true,
        created_at: ts(),
        updated_at: ts(),
        metadata: Value::Null,
    })
}

pub fn church(id: &str, name: &str, conference_id: &str, union_id: &str) -> Entity {
    Entity::Church(Church {
        id: id.to_string(),
        name: name.to_string(),
        conference_id: conference_id.to_string(),
        union_id: union_id.to_string(),
        is_active: true,
        created_at: ts(),
        updated_at: ts(),
        metadata: Value::Null,
    })
}
