//! Index entry representation
//!
//! Each entry in the staging area pairs a file path (relative to the
//! repository root) with the digest of the blob holding that file's
//! staged content.
//!
//! ## Entry Format
//!
//! One line per entry in the index file: `<digest> <path>\n`, paths
//! normalized to forward slashes.

use crate::errors::{Error, Result};
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::path::{Component, Path, PathBuf};

/// A staged file: content digest plus repository-relative path
#[derive(Debug, Clone, Eq, new)]
pub struct IndexEntry {
    pub oid: ObjectId,
    pub path: PathBuf,
}

impl IndexEntry {
    /// Path split into its normal components, rejecting anything that
    /// escapes the repository root (`..`, absolute paths)
    pub fn segments(&self) -> Result<Vec<String>> {
        let mut segments = Vec::new();
        for component in self.path.components() {
            match component {
                Component::Normal(segment) => {
                    let segment = segment
                        .to_str()
                        .ok_or_else(|| Error::corrupt("non-utf8 path in index entry"))?;
                    segments.push(segment.to_string());
                }
                Component::CurDir => {}
                _ => {
                    return Err(Error::corrupt(format!(
                        "index entry path escapes repository root: {}",
                        self.path.display()
                    )));
                }
            }
        }

        if segments.is_empty() {
            return Err(Error::corrupt("empty path in index entry"));
        }

        Ok(segments)
    }

    /// Slash-separated form used in the persisted index file
    pub fn normalized_path(&self) -> Result<String> {
        Ok(self.segments()?.join("/"))
    }

    pub fn to_line(&self) -> Result<String> {
        Ok(format!("{} {}", self.oid, self.normalized_path()?))
    }

    /// Parse one `<digest> <path>` record from the index file
    pub fn try_parse_line(line: &str) -> Result<Self> {
        let (oid, path) = line
            .split_once(' ')
            .ok_or_else(|| Error::corrupt(format!("malformed index record: '{line}'")))?;

        if path.is_empty() {
            return Err(Error::corrupt(format!("malformed index record: '{line}'")));
        }

        Ok(IndexEntry::new(
            ObjectId::try_parse(oid.to_string())?,
            Path::new(path).to_path_buf(),
        ))
    }
}

// Entries are unique by path; the digest is payload, not identity.
impl PartialEq for IndexEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}
