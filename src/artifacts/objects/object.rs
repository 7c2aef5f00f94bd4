use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use crate::errors::Result;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::BufRead;
use std::path::PathBuf;

pub trait Packable {
    /// Serialize into the framed on-disk form: `<type> <size>\0<payload>`
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Parse the payload; the framing header has already been consumed
    fn deserialize(reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        let oid = hasher.finalize();
        ObjectId::try_parse(format!("{oid:x}"))
    }

    fn object_path(&self) -> Result<PathBuf> {
        Ok(self.object_id()?.to_path())
    }
}

/// Frame a payload as `<type> <size>\0<payload>`
///
/// The digest of an object is the SHA-1 of exactly these bytes, so every
/// object type funnels through this single framing routine.
pub fn pack(object_type: ObjectType, payload: &[u8]) -> Bytes {
    let mut framed = Vec::with_capacity(payload.len() + 16);
    framed.extend_from_slice(format!("{} {}\0", object_type.as_str(), payload.len()).as_bytes());
    framed.extend_from_slice(payload);
    Bytes::from(framed)
}

pub enum ObjectBox {
    Blob(Box<Blob>),
    Tree(Box<Tree>),
    Commit(Box<Commit>),
}

impl ObjectBox {
    pub fn display(&self) -> String {
        match self {
            ObjectBox::Blob(blob) => blob.display(),
            ObjectBox::Tree(tree) => tree.display(),
            ObjectBox::Commit(commit) => commit.display(),
        }
    }
}
