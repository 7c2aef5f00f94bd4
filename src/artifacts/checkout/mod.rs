//! Working tree restoration
//!
//! Given a materialized tree, `Restore` recreates every file and
//! directory it describes inside the workspace. The caller is expected
//! to have wiped the workspace first; restore itself only writes.

use crate::areas::database::Database;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use derive_new::new;
use std::path::Path;

#[derive(new)]
pub struct Restore<'r> {
    database: &'r Database,
    workspace: &'r Workspace,
}

impl Restore<'_> {
    /// Recreate the whole tree at the workspace root
    pub fn materialize(&self, tree: &Tree) -> Result<()> {
        self.materialize_at(tree, Path::new(""))
    }

    fn materialize_at(&self, tree: &Tree, prefix: &Path) -> Result<()> {
        for (segment, oid) in tree.files() {
            let blob = self.database.parse_object_as_blob(oid)?.ok_or_else(|| {
                Error::corrupt(format!("tree references {oid} which is not a blob"))
            })?;

            self.workspace
                .write_file(&prefix.join(segment), blob.content())?;
        }

        for (segment, subtree) in tree.subtrees() {
            let dir_path = prefix.join(segment);
            // empty directories still materialize
            self.workspace.make_dir(&dir_path)?;
            self.materialize_at(subtree, &dir_path)?;
        }

        Ok(())
    }
}
