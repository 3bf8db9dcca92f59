use thiserror::Error;

#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error("Invalid entity level/type: {0}")]
    InvalidKind(String),
}
