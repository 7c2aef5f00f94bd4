//! twig — a minimal content-addressable version control engine
//!
//! A blob/tree/commit object store with zlib compression and SHA-1
//! addressing, a text staging area, branch refs plus a symbolic-or-
//! detached HEAD, and the checkout/log walks over the resulting graph.
//!
//! ## Known limitation
//!
//! Execution is single-threaded and synchronous, and there is no
//! locking or transactional discipline: two processes operating on the
//! same repository concurrently can corrupt the index or clobber a ref.
//! A crash mid-write can leave a truncated object, which is detected on
//! the next read and surfaced as a corruption error.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;
