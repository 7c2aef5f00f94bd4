//! HEAD state
//!
//! HEAD is either symbolic (pointing at a branch) or detached (pointing
//! at a raw commit digest). Modeling the two states as an enum keeps
//! every consumer exhaustive; there is no string sniffing outside the
//! parse below.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};

const SYMREF_REGEX: &str = r"^ref: refs/heads/(.+)$";

/// The currently checked-out position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// Normal state: HEAD names a branch
    Branch(BranchName),
    /// Detached state: HEAD holds a raw commit digest
    Detached(ObjectId),
}

impl Head {
    pub fn is_detached(&self) -> bool {
        matches!(self, Head::Detached(_))
    }

    /// Parse the persisted HEAD file content
    pub fn try_parse(content: &str) -> Result<Self> {
        let content = content.trim();

        let re = regex::Regex::new(SYMREF_REGEX).expect("symref pattern is a constant");
        if let Some(captures) = re.captures(content) {
            let branch = BranchName::try_parse(&captures[1])
                .map_err(|err| Error::corrupt(format!("HEAD names a bad branch: {err}")))?;
            return Ok(Head::Branch(branch));
        }

        let oid = ObjectId::try_parse(content.to_string())
            .map_err(|_| Error::corrupt(format!("unparseable HEAD content: '{content}'")))?;
        Ok(Head::Detached(oid))
    }

    /// The persisted form: `ref: refs/heads/<name>` or a raw digest
    pub fn to_content(&self) -> String {
        match self {
            Head::Branch(name) => format!("ref: refs/heads/{name}"),
            Head::Detached(oid) => oid.to_string(),
        }
    }
}
