use crate::areas::repository::Repository;
use crate::artifacts::branch::head::Head;
use crate::artifacts::objects::commit::{Author, Commit};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Error;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Record the staged snapshot as a new commit
    ///
    /// The new tree is built on top of the parent commit's tree, so
    /// files untouched by this staging round carry forward. The current
    /// branch ref (or a detached HEAD) is advanced and the index is
    /// cleared only after everything else succeeded.
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate().context("failed to load the index")?;

        if index.is_empty() {
            return Err(Error::NothingStaged.into());
        }

        let head = self.refs().read_head()?;
        let parent = self.refs().head_commit()?;

        let base_tree = match &parent {
            Some(parent_oid) => {
                let parent_commit = self
                    .database()
                    .parse_object_as_commit(parent_oid)?
                    .ok_or_else(|| anyhow::anyhow!("HEAD does not point at a commit"))?;
                self.database().load_tree(parent_commit.tree_oid())?
            }
            None => Tree::default(),
        };

        let tree = Tree::build(base_tree, index.entries())?;
        let store_level = |level: &Tree| self.database().store(level).map(|_| ());
        tree.traverse(&store_level)?;
        let tree_oid = tree.object_id()?;

        let author = Author::load_from_env();
        let commit = Commit::new(parent.clone(), tree_oid, author, message.trim().to_string());
        let commit_id = self.database().store(&commit)?;

        match &head {
            Head::Branch(branch) => self.refs().update_ref(branch, &commit_id)?,
            Head::Detached(_) => self.refs().write_head(&Head::Detached(commit_id.clone()))?,
        }

        index.clear().context("failed to clear the index")?;

        let root_marker = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };
        writeln!(
            self.writer(),
            "[{}{}] {}",
            root_marker,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(())
    }
}
