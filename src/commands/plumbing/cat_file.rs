use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Print the content of the object named by a digest or unique prefix
    pub fn cat_file(&self, target: &str) -> anyhow::Result<()> {
        let object_id = self.database().resolve_prefix(target)?;
        let object = self.database().parse_object(&object_id)?;

        write!(self.writer(), "{}", object.display())?;

        Ok(())
    }
}
