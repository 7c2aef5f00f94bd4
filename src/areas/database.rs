//! Content-addressed object database
//!
//! Objects are stored zlib-compressed under
//! `objects/<first-2-hex-chars>/<remaining-hex-chars>`, keyed by the
//! SHA-1 of their framed form. Writes are idempotent: storing content
//! that already exists is a no-op. There is no locking and no
//! temp-file-then-rename discipline; a crash mid-write can leave a
//! truncated object, which surfaces as `CorruptObject` on the next read.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, ObjectBox, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::{Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::Path;

/// Shortest accepted abbreviated digest
pub const MIN_PREFIX_LENGTH: usize = 2;

#[derive(Debug, new)]
pub struct Database {
    /// Path to the objects directory (typically `.twig/objects`)
    path: Box<Path>,
}

impl Database {
    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist an object, returning its digest
    ///
    /// The write is skipped when an object with this digest already
    /// exists (content dedup).
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let object_id = object.object_id()?;
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            let parent = object_path
                .parent()
                .ok_or_else(|| Error::corrupt(format!("invalid object path {object_id}")))?;
            std::fs::create_dir_all(parent)?;

            let compressed = Self::compress(object.serialize()?)?;
            std::fs::write(&object_path, &compressed)?;
        }

        Ok(object_id)
    }

    /// Resolve a possibly-abbreviated digest prefix to a unique object
    pub fn resolve_prefix(&self, prefix: &str) -> Result<ObjectId> {
        if prefix.len() < MIN_PREFIX_LENGTH {
            return Err(Error::InvalidTarget(format!(
                "object prefix '{prefix}' is shorter than {MIN_PREFIX_LENGTH} characters"
            )));
        }

        if !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::NotFound {
                prefix: prefix.to_string(),
            });
        }

        let mut matches = self.find_objects_by_prefix(prefix)?;

        match matches.len() {
            0 => Err(Error::NotFound {
                prefix: prefix.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            candidates => Err(Error::AmbiguousReference {
                prefix: prefix.to_string(),
                candidates,
            }),
        }
    }

    /// List every stored object whose digest starts with `prefix`
    ///
    /// Only the fan-out directory named by the first two characters is
    /// scanned, so lookups stay cheap even with many objects.
    fn find_objects_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        let (dir_name, file_prefix) = prefix.split_at(2);
        let dir_path = self.path.join(dir_name);
        let mut matches = Vec::new();

        if !dir_path.is_dir() {
            return Ok(matches);
        }

        for entry in std::fs::read_dir(&dir_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(file_prefix)
                && let Ok(oid) = ObjectId::try_parse(format!("{dir_name}{file_name}"))
            {
                matches.push(oid);
            }
        }

        Ok(matches)
    }

    /// Parse a stored object into its typed form
    pub fn parse_object(&self, object_id: &ObjectId) -> Result<ObjectBox> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(ObjectBox::Blob(Box::new(Blob::deserialize(object_reader)?))),
            // a tree's display form needs its children expanded
            ObjectType::Tree => Ok(ObjectBox::Tree(Box::new(self.load_tree(object_id)?))),
            ObjectType::Commit => Ok(ObjectBox::Commit(Box::new(Commit::deserialize(
                object_reader,
            )?))),
        }
    }

    pub fn parse_object_as_blob(&self, object_id: &ObjectId) -> Result<Option<Blob>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Ok(Some(Blob::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    pub fn parse_object_as_commit(&self, object_id: &ObjectId) -> Result<Option<Commit>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Ok(Some(Commit::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    /// Recursively materialize a stored tree into a nested [`Tree`]
    ///
    /// Inverse of the commit path's postorder store: each `tree` record
    /// is expanded by loading the referenced level, depth-first.
    pub fn load_tree(&self, object_id: &ObjectId) -> Result<Tree> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        if object_type != ObjectType::Tree {
            return Err(Error::corrupt(format!(
                "object {object_id} is a {object_type}, expected a tree"
            )));
        }

        let mut tree = Tree::default();
        for record in Tree::parse_entries(object_reader)? {
            match record.kind {
                ObjectType::Blob => tree.add_file(record.segment, record.oid),
                ObjectType::Tree => {
                    tree.add_subtree(record.segment, self.load_tree(&record.oid)?);
                }
                ObjectType::Commit => unreachable!("rejected by parse_entries"),
            }
        }

        Ok(tree)
    }

    fn parse_object_as_bytes(&self, object_id: &ObjectId) -> Result<(ObjectType, impl BufRead)> {
        let object_content = self.read_object(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());
        let object_content = std::fs::read(&object_path)?;

        Self::decompress(object_content.into(), object_id)
    }

    fn compress(data: Bytes) -> Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&data)?;

        Ok(encoder.finish()?.into())
    }

    fn decompress(data: Bytes, object_id: &ObjectId) -> Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .map_err(|err| {
                Error::corrupt(format!("unable to decompress object {object_id}: {err}"))
            })?;

        Ok(decompressed_content.into())
    }
}
