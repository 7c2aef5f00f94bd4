//! References (branches and HEAD)
//!
//! A ref is a named pointer to a commit digest, stored as a plain text
//! file under `refs/heads/<branch>`. HEAD is either symbolic
//! (`ref: refs/heads/<branch>`) or a raw digest (detached); see
//! [`Head`].
//!
//! Reading an absent branch ref lazily creates an empty ref file and
//! yields no digest — an empty branch, not an error.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use derive_new::new;
use std::path::Path;

#[derive(Debug, new)]
pub struct Refs {
    /// Path to the metadata directory (typically `.twig`)
    path: Box<Path>,
}

impl Refs {
    /// Read the current HEAD state
    ///
    /// A missing or empty HEAD file resolves to the default branch, the
    /// state `init` establishes.
    pub fn read_head(&self) -> Result<Head> {
        let head_path = self.head_path();

        if !head_path.exists() {
            return Ok(Head::Branch(BranchName::default_branch()));
        }

        let content = std::fs::read_to_string(&head_path)?;
        if content.trim().is_empty() {
            return Ok(Head::Branch(BranchName::default_branch()));
        }

        Head::try_parse(&content)
    }

    pub fn write_head(&self, head: &Head) -> Result<()> {
        std::fs::write(self.head_path(), head.to_content())?;

        Ok(())
    }

    /// Resolve HEAD to the digest of the current tip commit
    ///
    /// `None` when HEAD names a branch with no commits yet.
    pub fn head_commit(&self) -> Result<Option<ObjectId>> {
        match self.read_head()? {
            Head::Branch(branch) => self.read_ref(&branch),
            Head::Detached(oid) => Ok(Some(oid)),
        }
    }

    /// Read a branch ref, lazily creating an empty ref file if absent
    pub fn read_ref(&self, branch: &BranchName) -> Result<Option<ObjectId>> {
        let ref_path = self.heads_path().join(branch.as_ref());

        if !ref_path.exists() {
            std::fs::create_dir_all(
                ref_path
                    .parent()
                    .ok_or_else(|| Error::corrupt(format!("invalid ref path for {branch}")))?,
            )?;
            std::fs::write(&ref_path, b"")?;
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let oid = ObjectId::try_parse(content.to_string())
            .map_err(|_| Error::corrupt(format!("unparseable ref for branch {branch}")))?;
        Ok(Some(oid))
    }

    /// Point a branch ref at a new commit digest
    pub fn update_ref(&self, branch: &BranchName, oid: &ObjectId) -> Result<()> {
        let ref_path = self.heads_path().join(branch.as_ref());

        std::fs::create_dir_all(
            ref_path
                .parent()
                .ok_or_else(|| Error::corrupt(format!("invalid ref path for {branch}")))?,
        )?;
        std::fs::write(&ref_path, oid.as_ref())?;

        Ok(())
    }

    /// Whether a ref file for this branch exists on disk
    pub fn branch_exists(&self, branch: &BranchName) -> bool {
        self.heads_path().join(branch.as_ref()).exists()
    }

    pub fn head_path(&self) -> std::path::PathBuf {
        self.path.join("HEAD")
    }

    pub fn refs_path(&self) -> std::path::PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> std::path::PathBuf {
        self.refs_path().join("heads")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;

    fn refs() -> (TempDir, Refs) {
        let dir = TempDir::new().unwrap();
        let refs = Refs::new(dir.path().to_path_buf().into_boxed_path());
        (dir, refs)
    }

    fn oid(fill: char) -> ObjectId {
        ObjectId::try_parse(fill.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn missing_head_resolves_to_default_branch() {
        let (_dir, refs) = refs();
        assert_eq!(
            refs.read_head().unwrap(),
            Head::Branch(BranchName::default_branch())
        );
    }

    #[test]
    fn head_round_trips_both_states() {
        let (_dir, refs) = refs();

        let on_branch = Head::Branch(BranchName::try_parse("topic").unwrap());
        refs.write_head(&on_branch).unwrap();
        assert_eq!(refs.read_head().unwrap(), on_branch);

        let detached = Head::Detached(oid('d'));
        refs.write_head(&detached).unwrap();
        assert_eq!(refs.read_head().unwrap(), detached);
    }

    #[test]
    fn reading_an_absent_ref_lazily_creates_it() {
        let (_dir, refs) = refs();
        let branch = BranchName::default_branch();

        assert_eq!(refs.read_ref(&branch).unwrap(), None);
        assert!(refs.branch_exists(&branch));
        // idempotent: a second read still yields nothing
        assert_eq!(refs.read_ref(&branch).unwrap(), None);
    }

    #[test]
    fn update_then_read_ref() {
        let (_dir, refs) = refs();
        let branch = BranchName::try_parse("topic").unwrap();

        refs.update_ref(&branch, &oid('a')).unwrap();
        assert_eq!(refs.read_ref(&branch).unwrap(), Some(oid('a')));
    }

    #[test]
    fn head_commit_follows_the_current_branch() {
        let (_dir, refs) = refs();
        let branch = BranchName::default_branch();

        refs.write_head(&Head::Branch(branch.clone())).unwrap();
        assert_eq!(refs.head_commit().unwrap(), None);

        refs.update_ref(&branch, &oid('c')).unwrap();
        assert_eq!(refs.head_commit().unwrap(), Some(oid('c')));
    }

    #[test]
    fn corrupt_head_content_is_surfaced() {
        let (dir, refs) = refs();
        std::fs::write(dir.path().join("HEAD"), "gibberish").unwrap();

        assert!(matches!(
            refs.read_head(),
            Err(Error::CorruptObject { .. })
        ));
    }
}
