//! Working directory file system operations
//!
//! The workspace is everything under the repository root except the
//! `.twig` metadata directory. All paths handed out or accepted here are
//! relative to that root; the repository root itself is threaded in
//! explicitly so multiple repositories can coexist in one process.

use crate::errors::{Error, Result};
use bytes::Bytes;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [".twig", ".", ".."];

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Enumerate candidate files under a path, relative to the root
    ///
    /// Directories are walked recursively; the metadata directory is
    /// excluded. A plain file yields itself.
    pub fn list_files(&self, root_file_path: Option<PathBuf>) -> Result<Vec<PathBuf>> {
        let root_file_path = match root_file_path {
            Some(p) => std::fs::canonicalize(p)?,
            None => self.path.clone().into(),
        };

        if !root_file_path.exists() {
            return Err(Error::InvalidTarget(format!(
                "path does not exist: {}",
                root_file_path.display()
            )));
        }

        if root_file_path.is_dir() {
            Ok(WalkDir::new(&root_file_path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| self.relative_if_tracked_file(entry.path()))
                .collect())
        } else {
            Ok(vec![
                root_file_path
                    .strip_prefix(self.path.as_ref())
                    .map(PathBuf::from)
                    .unwrap_or_default(),
            ])
        }
    }

    fn is_ignored(path: &Path) -> bool {
        path.components().any(|component| {
            if let std::path::Component::Normal(name) = component {
                IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
            } else {
                false
            }
        })
    }

    fn relative_if_tracked_file(&self, path: &Path) -> Option<PathBuf> {
        if path.is_file() && !Self::is_ignored(path) {
            Some(path.strip_prefix(self.path.as_ref()).ok()?.to_path_buf())
        } else {
            None
        }
    }

    pub fn read_file(&self, file_path: &Path) -> Result<Bytes> {
        let content = std::fs::read(self.path.join(file_path))?;

        Ok(content.into())
    }

    /// Write a file, creating any missing parent directories
    pub fn write_file(&self, file_path: &Path, data: &[u8]) -> Result<()> {
        let absolute = self.path.join(file_path);

        if let Some(parent) = absolute.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&absolute, data)?;

        Ok(())
    }

    pub fn make_dir(&self, dir_path: &Path) -> Result<()> {
        std::fs::create_dir_all(self.path.join(dir_path))?;

        Ok(())
    }

    /// Remove every top-level workspace entry except the metadata
    /// directory
    ///
    /// This is the destructive half of checkout: unstaged local
    /// modifications are lost by contract, not by accident.
    pub fn wipe(&self) -> Result<()> {
        for entry in std::fs::read_dir(self.path.as_ref())? {
            let entry = entry?;
            let path = entry.path();

            if Self::is_ignored(&path) {
                continue;
            }

            if entry.file_type()?.is_dir() {
                std::fs::remove_dir_all(&path)?;
            } else {
                std::fs::remove_file(&path)?;
            }
        }

        Ok(())
    }
}
