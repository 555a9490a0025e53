//! Error types for gridnav

use crate::grid::Cell;
use thiserror::Error;

/// gridnav error type
#[derive(Error, Debug)]
pub enum NavError {
    /// The world, the endpoints or the navigator tunables are unusable.
    /// Raised before any step executes.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A planned move is not a single up/left/right/down step.
    /// This is a broken invariant, not an environment condition.
    #[error("Invalid adjacency: {from} -> {to} is not a single-cell move")]
    AdjacencyViolation { from: Cell, to: Cell },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NavError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        NavError::Configuration(msg.into())
    }

    /// True for errors that signal a broken internal invariant.
    pub fn is_fatal(&self) -> bool {
        matches!(self, NavError::AdjacencyViolation { .. })
    }
}

pub type Result<T> = std::result::Result<T, NavError>;
