//! Staging area (index)
//!
//! The index tracks which files go into the next commit. It is a flat,
//! path-unique set of `(digest, path)` records persisted as newline
//! delimited text at `.twig/index`.
//!
//! Staging is additive: re-adding a path replaces its record, and
//! records for paths outside the current staging round are retained.
//! The index is cleared only after a successful commit (or a checkout).

use crate::artifacts::index::index_entry::IndexEntry;
use crate::errors::Result;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Pending-commit set of path to digest mappings
#[derive(Debug)]
pub struct Index {
    /// Path to the index file (typically `.twig/index`)
    path: Box<Path>,
    /// Staged entries, unique by path and ordered deterministically
    entries: BTreeMap<PathBuf, IndexEntry>,
    /// Whether the in-memory set diverged from the persisted file
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted staging file
    ///
    /// A missing or empty file yields an empty index.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)?;
        for line in content.lines().filter(|line| !line.is_empty()) {
            let entry = IndexEntry::try_parse_line(line)?;
            self.entries.insert(entry.path.clone(), entry);
        }

        Ok(())
    }

    /// Upsert an entry; re-adding a path replaces, never duplicates
    pub fn add(&mut self, entry: IndexEntry) {
        self.entries.insert(entry.path.clone(), entry);
        self.changed = true;
    }

    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persist the merged entry set, overwriting the staging file
    pub fn write_updates(&mut self) -> Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut file = std::fs::File::create(&self.path)?;
        for entry in self.entries.values() {
            writeln!(file, "{}", entry.to_line()?)?;
        }

        self.changed = false;
        Ok(())
    }

    /// Truncate the staging file; called after a successful commit
    pub fn clear(&mut self) -> Result<()> {
        self.entries.clear();
        self.changed = false;
        std::fs::write(&self.path, b"")?;

        Ok(())
    }
}
