use thiserror::Error;

/// Errors reported by tree queries.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The query needs at least one key but the tree holds none.
    #[error("container is empty")]
    EmptyContainer,
}

pub type Result<T> = std::result::Result<T, TreeError>;
