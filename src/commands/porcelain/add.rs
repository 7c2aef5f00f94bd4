use crate::areas::repository::Repository;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use std::path::Path;

impl Repository {
    /// Stage files for the next commit
    ///
    /// Directories are expanded recursively. Every resolved file is
    /// stored as a blob and upserted into the index; entries for paths
    /// outside the given set are retained unchanged.
    pub fn add(&self, paths: &[String]) -> anyhow::Result<()> {
        let mut index = self.index();
        index.rehydrate().context("failed to load the index")?;

        let paths = paths
            .iter()
            .map(|path| {
                let absolute_path = self.path().join(Path::new(path));
                self.workspace()
                    .list_files(Some(absolute_path))
                    .with_context(|| format!("failed to resolve '{path}'"))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .flatten();

        for path in paths {
            let data = self.workspace().read_file(&path)?;
            let blob = Blob::new(data);

            let blob_id = self.database().store(&blob)?;
            index.add(IndexEntry::new(blob_id, path));
        }

        index.write_updates().context("failed to persist the index")?;

        Ok(())
    }
}
