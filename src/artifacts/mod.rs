//! Core data structures and algorithms
//!
//! - `branch`: branch names and HEAD state
//! - `checkout`: working tree restoration
//! - `index`: staging area entry types
//! - `log`: commit history traversal
//! - `objects`: object types (blob, tree, commit) and identifiers

pub mod branch;
pub mod checkout;
pub mod index;
pub mod log;
pub mod objects;
