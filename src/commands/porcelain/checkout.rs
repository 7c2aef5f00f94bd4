use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use crate::artifacts::checkout::Restore;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Error;
use std::io::Write;

impl Repository {
    /// Move HEAD to a branch or commit and rebuild the working tree
    ///
    /// Destructive by contract: all tracked working-directory content is
    /// removed and rematerialized from the target commit's tree, and any
    /// unstaged local modification is lost.
    pub fn checkout(&self, target: &str) -> anyhow::Result<()> {
        let (new_head, commit_oid) = self.resolve_checkout_target(target)?;

        let commit = self
            .database()
            .parse_object_as_commit(&commit_oid)?
            .ok_or_else(|| Error::InvalidTarget(format!("{target} is not a commit")))?;
        let tree = self.database().load_tree(commit.tree_oid())?;

        self.workspace().wipe()?;
        Restore::new(self.database(), self.workspace()).materialize(&tree)?;

        self.index().clear()?;

        self.refs().write_head(&new_head)?;

        match &new_head {
            Head::Branch(branch) => {
                writeln!(self.writer(), "Switched to branch '{branch}'")?;
            }
            Head::Detached(oid) => {
                writeln!(
                    self.writer(),
                    "HEAD is now at {} {}",
                    oid.to_short_oid(),
                    commit.short_message()
                )?;
            }
        }

        Ok(())
    }

    /// Resolve a checkout target to its destination HEAD state and commit
    ///
    /// A name matching an existing branch ref wins; anything else is
    /// treated as a digest prefix and yields a detached HEAD.
    fn resolve_checkout_target(&self, target: &str) -> Result<(Head, ObjectId), Error> {
        if let Ok(branch) = BranchName::try_parse(target)
            && self.refs().branch_exists(&branch)
        {
            return match self.refs().read_ref(&branch)? {
                Some(oid) => Ok((Head::Branch(branch), oid)),
                None => Err(Error::InvalidTarget(format!(
                    "branch '{target}' has no commits"
                ))),
            };
        }

        match self.database().resolve_prefix(target) {
            Ok(oid) => Ok((Head::Detached(oid.clone()), oid)),
            Err(Error::NotFound { .. }) => Err(Error::InvalidTarget(format!(
                "'{target}' is neither a branch nor a commit"
            ))),
            Err(err) => Err(err),
        }
    }
}
