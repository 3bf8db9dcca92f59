//! Pre-creation validation. Every violated rule is accumulated so the
//! caller can show all of them at once; nothing here fails fast or
//! returns an error type.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::{Entity, EntityKind};
use super::path::EntityMap;

/// Incoming creation payload before ids and timestamps are assigned.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDraft {
    /// Optional caller-chosen id; normally server-assigned.
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub union_id: Option<String>,
    pub conference_id: Option<String>,
    pub is_active: Option<bool>,
    pub metadata: Option<Value>,
}

/// A single violated creation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingName,
    MissingParent { field: &'static str },
    UnknownParent { field: &'static str, id: String },
    WrongParentKind { field: &'static str, id: String, expected: EntityKind },
    UnionMismatch { supplied: String, expected: String },
}

impl ValidationIssue {
    /// Issues that only arise from resolving parent references against
    /// the snapshot, as opposed to the payload being incomplete.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            ValidationIssue::UnknownParent { .. }
                | ValidationIssue::WrongParentKind { .. }
                | ValidationIssue::UnionMismatch { .. }
        )
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::MissingName => write!(f, "Name is required"),
            ValidationIssue::MissingParent { field } => write!(f, "{} is required", field),
            ValidationIssue::UnknownParent { field, id } => {
                write!(f, "{} '{}' does not reference a known entity", field, id)
            }
            ValidationIssue::WrongParentKind { field, id, expected } => {
                write!(f, "{} '{}' does not reference a {}", field, id, expected)
            }
            ValidationIssue::UnionMismatch { supplied, expected } => write!(
                f,
                "union_id '{}' does not match the parent conference's union '{}'",
                supplied, expected
            ),
        }
    }
}

/// Validation outcome as data. `errors` holds one human-readable string
/// per violated rule.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        Self {
            is_valid: issues.is_empty(),
            errors: issues.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Collect every rule the draft violates for the given kind against the
/// supplied snapshot map.
pub fn creation_issues(
    kind: EntityKind,
    draft: &EntityDraft,
    map: &EntityMap,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if draft.name.trim().is_empty() {
        issues.push(ValidationIssue::MissingName);
    }

    match kind {
        EntityKind::Union => {}
        EntityKind::Conference => match &draft.union_id {
            None => issues.push(ValidationIssue::MissingParent { field: "union_id" }),
            Some(id) => match map.get(id) {
                Some(Entity::Union(_)) => {}
                Some(_) => issues.push(ValidationIssue::WrongParentKind {
                    field: "union_id",
                    id: id.clone(),
                    expected: EntityKind::Union,
                }),
                None => issues.push(ValidationIssue::UnknownParent {
                    field: "union_id",
                    id: id.clone(),
                }),
            },
        },
        EntityKind::Church => match &draft.conference_id {
            None => issues.push(ValidationIssue::MissingParent {
                field: "conference_id",
            }),
            Some(id) => match map.get(id) {
                Some(Entity::Conference(conference)) => {
                    if let Some(union_id) = &draft.union_id {
                        if *union_id != conference.union_id {
                            issues.push(ValidationIssue::UnionMismatch {
                                supplied: union_id.clone(),
                                expected: conference.union_id.clone(),
                            });
                        }
                    }
                }
                Some(_) => issues.push(ValidationIssue::WrongParentKind {
                    field: "conference_id",
                    id: id.clone(),
                    expected: EntityKind::Conference,
                }),
                None => issues.push(ValidationIssue::UnknownParent {
                    field: "conference_id",
                    id: id.clone(),
                }),
            },
        },
    }

    issues
}

/// Accumulated creation validation, as the dashboard renders it.
pub fn validate_entity_creation(
    kind: EntityKind,
    draft: &EntityDraft,
    map: &EntityMap,
) -> ValidationReport {
    ValidationReport::from_issues(&creation_issues(kind, draft, map))
}
