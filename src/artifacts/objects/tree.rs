//! Tree object
//!
//! Trees are directory snapshots. A tree node carries two maps keyed by
//! single path segments: `files` (blob digests) and `subtrees` (nested
//! trees). Both are `BTreeMap`s so serialization order is always
//! lexicographic by segment, never insertion order.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<records>` where each record is one line
//! `<digest> <segment> <kind>` and `kind` is `blob` or `tree`. Files are
//! listed before subdirectories. A stored tree lists its immediate
//! children only; a subdirectory record points at the digest of that
//! subdirectory's own serialized tree.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::{Object, Packable, pack};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;

/// One parsed record of a stored tree level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeRecord {
    pub oid: ObjectId,
    pub segment: String,
    pub kind: ObjectType,
}

/// In-memory directory snapshot
///
/// Built from the index plus the parent commit's tree before a commit,
/// or materialized from the database during checkout. Ownership is
/// strictly top-down; there are no back-edges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    files: BTreeMap<String, ObjectId>,
    subtrees: BTreeMap<String, Tree>,
}

impl Tree {
    /// Build a tree from index entries on top of a base tree
    ///
    /// The base is the parent commit's materialized tree (empty for a
    /// root commit), so files untouched by the current staging round are
    /// carried forward into the new snapshot.
    pub fn build<'e>(
        base: Tree,
        entries: impl Iterator<Item = &'e IndexEntry>,
    ) -> Result<Self> {
        let mut root = base;

        for entry in entries {
            let segments = entry.segments()?;
            root.insert(&segments, entry.oid.clone());
        }

        Ok(root)
    }

    /// Insert a blob digest at the nested position named by `segments`,
    /// creating intermediate directory nodes as needed
    fn insert(&mut self, segments: &[String], oid: ObjectId) {
        match segments {
            [] => {}
            [leaf] => {
                // re-adding a path replaces its entry
                self.files.insert(leaf.clone(), oid);
            }
            [dir, rest @ ..] => {
                self.subtrees.entry(dir.clone()).or_default().insert(rest, oid);
            }
        }
    }

    pub fn add_file(&mut self, segment: String, oid: ObjectId) {
        self.files.insert(segment, oid);
    }

    pub fn add_subtree(&mut self, segment: String, subtree: Tree) {
        self.subtrees.insert(segment, subtree);
    }

    pub fn files(&self) -> impl Iterator<Item = (&String, &ObjectId)> {
        self.files.iter()
    }

    pub fn subtrees(&self) -> impl Iterator<Item = (&String, &Tree)> {
        self.subtrees.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subtrees.is_empty()
    }

    /// Visit every node, children before parents
    ///
    /// Postorder is what the commit path needs: each level must be
    /// persisted before the parent listing that references its digest.
    pub fn traverse<F>(&self, func: &F) -> Result<()>
    where
        F: Fn(&Tree) -> Result<()>,
    {
        for subtree in self.subtrees.values() {
            subtree.traverse(func)?;
        }
        func(self)
    }

    /// Parse the records of a single stored tree level
    ///
    /// An empty payload is a valid, empty directory.
    pub fn parse_entries(reader: impl BufRead) -> Result<Vec<TreeRecord>> {
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let (oid, rest) = line
                .split_once(' ')
                .ok_or_else(|| Error::corrupt(format!("malformed tree record: '{line}'")))?;
            let (segment, kind) = rest
                .rsplit_once(' ')
                .ok_or_else(|| Error::corrupt(format!("malformed tree record: '{line}'")))?;

            let kind = match ObjectType::try_from(kind)? {
                ObjectType::Commit => {
                    return Err(Error::corrupt(format!(
                        "tree record references a commit: '{line}'"
                    )));
                }
                kind => kind,
            };

            records.push(TreeRecord {
                oid: ObjectId::try_parse(oid.to_string())?,
                segment: segment.to_string(),
                kind,
            });
        }

        Ok(records)
    }

    fn listing(&self) -> Result<String> {
        let mut lines = Vec::with_capacity(self.files.len() + self.subtrees.len());

        for (segment, oid) in &self.files {
            lines.push(format!("{} {} {}\n", oid, segment, ObjectType::Blob));
        }
        for (segment, subtree) in &self.subtrees {
            lines.push(format!(
                "{} {} {}\n",
                subtree.object_id()?,
                segment,
                ObjectType::Tree
            ));
        }

        Ok(lines.concat())
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let listing = self.listing()?;
        Ok(pack(self.object_type(), listing.as_bytes()))
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.listing().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(40)).unwrap()
    }

    fn entry(path: &str, fill: char) -> IndexEntry {
        IndexEntry::new(oid(fill), PathBuf::from(path))
    }

    #[test]
    fn builds_nested_structure_from_flat_entries() {
        let tree = Tree::build(
            Tree::default(),
            [entry("a.txt", 'a'), entry("dir/b.txt", 'b'), entry("dir/sub/c.txt", 'c')].iter(),
        )
        .unwrap();

        assert_eq!(tree.files().count(), 1);
        let (_, dir) = tree.subtrees().next().unwrap();
        assert!(dir.files().any(|(name, _)| name == "b.txt"));
        let (_, sub) = dir.subtrees().next().unwrap();
        assert!(sub.files().any(|(name, _)| name == "c.txt"));
    }

    #[test]
    fn base_tree_entries_are_carried_forward() {
        let base = Tree::build(Tree::default(), [entry("a.txt", 'a')].iter()).unwrap();
        let tree = Tree::build(base, [entry("b.txt", 'b')].iter()).unwrap();

        let names: Vec<_> = tree.files().map(|(name, _)| name.clone()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn restaging_a_path_replaces_its_digest() {
        let base = Tree::build(Tree::default(), [entry("a.txt", 'a')].iter()).unwrap();
        let tree = Tree::build(base, [entry("a.txt", 'b')].iter()).unwrap();

        assert_eq!(tree.files().count(), 1);
        assert_eq!(tree.files().next().unwrap().1, &oid('b'));
    }

    #[test]
    fn listing_emits_files_before_subtrees_sorted_by_segment() {
        let tree = Tree::build(
            Tree::default(),
            [entry("zeta.txt", 'a'), entry("alpha.txt", 'b'), entry("dir/c.txt", 'c')].iter(),
        )
        .unwrap();

        let listing = tree.display();
        let segments: Vec<_> = listing
            .lines()
            .map(|line| line.split(' ').nth(1).unwrap())
            .collect();
        assert_eq!(segments, vec!["alpha.txt", "zeta.txt", "dir"]);
    }

    #[test]
    fn parses_empty_listing() {
        let records = Tree::parse_entries(std::io::Cursor::new(Vec::new())).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn rejects_tree_record_referencing_a_commit() {
        let payload = format!("{} name commit\n", "a".repeat(40));
        assert!(Tree::parse_entries(std::io::Cursor::new(payload.into_bytes())).is_err());
    }

    proptest! {
        /// Two trees holding the same (path, digest) set hash identically
        /// regardless of the order entries were inserted in.
        #[test]
        fn digest_is_insertion_order_independent(
            raw in proptest::collection::vec(
                (proptest::collection::vec("[a-z]{1,4}", 0..3), "[0-9a-f]{40}"),
                1..8,
            )
        ) {
            let entries: Vec<IndexEntry> = raw
                .iter()
                .enumerate()
                .map(|(i, (dirs, hex))| {
                    let mut path = PathBuf::new();
                    for dir in dirs {
                        path.push(dir);
                    }
                    path.push(format!("f{i}.txt"));
                    IndexEntry::new(ObjectId::try_parse(hex.clone()).unwrap(), path)
                })
                .collect();

            let forward = Tree::build(Tree::default(), entries.iter()).unwrap();
            let backward = Tree::build(Tree::default(), entries.iter().rev()).unwrap();

            prop_assert_eq!(
                forward.object_id().unwrap(),
                backward.object_id().unwrap()
            );
        }
    }
}
