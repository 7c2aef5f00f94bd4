use crate::areas::repository::Repository;
use crate::artifacts::log::History;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print the commit history reachable from HEAD, newest first
    ///
    /// An empty repository (branch with no commits) prints nothing.
    pub fn log(&self) -> anyhow::Result<()> {
        let start = self.refs().head_commit()?;

        for (commit_oid, commit) in History::new(self.database(), start) {
            writeln!(
                self.writer(),
                "{}",
                format!("commit {commit_oid}").yellow()
            )?;
            writeln!(self.writer(), "Author: {}", commit.author().display_name())?;
            writeln!(self.writer(), "Date:   {}", commit.author().readable_timestamp())?;
            writeln!(self.writer())?;
            for message_line in commit.message().lines() {
                writeln!(self.writer(), "    {message_line}")?;
            }
            writeln!(self.writer())?;
        }

        Ok(())
    }
}
