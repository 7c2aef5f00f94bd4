use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::branch::head::Head;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("failed to create objects directory")?;

        fs::create_dir_all(self.refs().heads_path())
            .context("failed to create refs/heads directory")?;

        let head_path = self.refs().head_path();
        if !head_path.exists() {
            self.refs()
                .write_head(&Head::Branch(BranchName::default_branch()))
                .context("failed to create initial HEAD reference")?;
        }

        // make sure the default branch ref file exists
        let default_ref_path = self.refs().heads_path().join(BranchName::default_branch().as_ref());
        if !default_ref_path.exists() {
            fs::write(&default_ref_path, b"").context("failed to create default branch file")?;
        }

        let index = self.index();
        if !index.path().exists() {
            fs::write(index.path(), b"").context("failed to create index file")?;
        }

        writeln!(
            self.writer(),
            "Initialized empty Twig repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
