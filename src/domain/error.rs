//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree's preconditions.
/// These are independent of how the tree was sourced or displayed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid rectangle: width and height must differ (got {width}x{height})")]
    InvalidRectangle { width: u32, height: u32 },

    #[error("leaf not found: {0}")]
    LeafNotFound(String),

    #[error("node is already empty")]
    AlreadyEmpty,

    #[error("not a leaf: {0}")]
    NotALeaf(String),

    #[error("invalid parent: {0}")]
    InvalidParent(String),
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
