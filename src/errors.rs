//! The core error taxonomy for twig.
//!
//! A small `thiserror` enum shared across the object store, refs, index
//! and command layers, plus a `Result` alias and a couple of
//! classification helpers. The command layer wraps these in `anyhow`
//! with `.context(...)`.

use thiserror::Error;

/// The typed error type for twig's core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No object matched the requested digest or prefix.
    #[error("object not found: {prefix}")]
    NotFound { prefix: String },

    /// More than one object matched the requested prefix.
    #[error("ambiguous object prefix '{prefix}' ({candidates} candidates)")]
    AmbiguousReference { prefix: String, candidates: usize },

    /// A commit was requested but nothing is staged.
    #[error("nothing staged for commit")]
    NothingStaged,

    /// A stored object (or ref/index record) is malformed or truncated.
    #[error("corrupt object: {0}")]
    CorruptObject(String),

    /// The caller named a target that is not valid in this context.
    #[error("invalid target: {0}")]
    InvalidTarget(String),

    /// An underlying filesystem error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a [`Error::CorruptObject`] from any message.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Error::CorruptObject(message.into())
    }

    /// Whether this error indicates a missing object.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

/// Result alias over the twig [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
