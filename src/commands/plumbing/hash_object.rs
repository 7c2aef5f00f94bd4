use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use anyhow::Context;
use std::io::Write;
use std::path::Path;

impl Repository {
    pub fn hash_object(&self, file: &str, write: bool) -> anyhow::Result<()> {
        let data = self
            .workspace()
            .read_file(Path::new(file))
            .with_context(|| format!("failed to read {file}"))?;
        let blob = Blob::new(data);

        let object_id = blob.object_id()?;

        writeln!(self.writer(), "{object_id}")?;

        if write {
            self.database()
                .store(&blob)
                .context("failed to write blob to the object database")?;
        }

        Ok(())
    }
}
