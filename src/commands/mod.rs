//! Command implementations
//!
//! Commands come in two flavors, following git's architecture:
//!
//! - `plumbing`: low-level object manipulation (hash-object, cat-file)
//! - `porcelain`: user-facing workflows (init, add, commit, checkout, log)
//!
//! Each command is a method on [`crate::areas::repository::Repository`];
//! output goes through the repository's injected writer so tests can
//! capture it.

pub mod plumbing;
pub mod porcelain;
