//! Commit history traversal
//!
//! `History` lazily walks parent links from a starting commit to the
//! root, newest first. The walk ends silently when a commit has no
//! parent or a parent cannot be loaded; it is not restartable without
//! re-resolving HEAD.

use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

#[derive(new)]
pub struct History<'r> {
    database: &'r Database,
    current_commit_oid: Option<ObjectId>,
}

impl Iterator for History<'_> {
    type Item = (ObjectId, Commit);

    fn next(&mut self) -> Option<Self::Item> {
        let commit_oid = self.current_commit_oid.take()?;

        match self.database.parse_object_as_commit(&commit_oid) {
            Ok(Some(commit)) => {
                self.current_commit_oid = commit.parent().cloned();
                Some((commit_oid, commit))
            }
            // unreadable or non-commit object ends the walk
            _ => None,
        }
    }
}
