//! Commit object
//!
//! Commits are snapshot pointers: a tree digest, an optional parent
//! commit digest, author/committer identity, and a message. The parent
//! links form a singly-linked chain walked by `log`.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-digest>
//! parent <parent-digest>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable, pack};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::io::BufRead;

const DEFAULT_AUTHOR_NAME: &str = "twig";
const DEFAULT_AUTHOR_EMAIL: &str = "twig@localhost";

/// Author or committer identity with timestamp
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::FixedOffset>,
}

impl Author {
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Local::now().fixed_offset(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::FixedOffset>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Identity from `TWIG_AUTHOR_NAME` / `TWIG_AUTHOR_EMAIL`, with fixed
    /// fallbacks so commits work on a bare environment
    pub fn load_from_env() -> Self {
        let name =
            std::env::var("TWIG_AUTHOR_NAME").unwrap_or_else(|_| DEFAULT_AUTHOR_NAME.to_string());
        let email =
            std::env::var("TWIG_AUTHOR_EMAIL").unwrap_or_else(|_| DEFAULT_AUTHOR_EMAIL.to_string());

        Author::new(name, email)
    }

    /// `Name <email>`
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// `Name <email> <unix-timestamp> <timezone>`, the serialized form
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        )
    }

    /// Human-readable timestamp for log output
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl TryFrom<&str> for Author {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        // "name <email> timestamp timezone"; split from the right so the
        // name may contain spaces
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(Error::corrupt(format!("invalid author record: '{value}'")));
        }

        let timestamp = chrono::DateTime::parse_from_str(
            &format!("{} {}", parts[1], parts[0]),
            "%s %z",
        )
        .map_err(|_| Error::corrupt(format!("invalid author timestamp: '{value}'")))?;
        let name_email = parts[2];

        let email_start = name_email
            .find('<')
            .ok_or_else(|| Error::corrupt(format!("author record missing '<': '{value}'")))?;
        let email_end = name_email
            .find('>')
            .ok_or_else(|| Error::corrupt(format!("author record missing '>': '{value}'")))?;

        let name = name_email[..email_start].trim().to_string();
        let email = name_email[email_start + 1..email_end].to_string();

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// Snapshot pointer plus lineage and metadata
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit digest, `None` for the root commit
    parent: Option<ObjectId>,
    tree_oid: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        tree_oid: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            parent,
            tree_oid,
            author: author.clone(),
            committer: author,
            message,
        }
    }

    /// First line of the message, for short-form display
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        Ok(pack(self.object_type(), self.display().as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(mut reader: impl BufRead) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .map_err(|_| Error::corrupt("non-utf8 commit payload"))?;

        let mut lines = content.lines();

        let tree_line = lines
            .next()
            .ok_or_else(|| Error::corrupt("commit missing tree line"))?;
        let tree_oid = tree_line
            .strip_prefix("tree ")
            .ok_or_else(|| Error::corrupt(format!("invalid commit tree line: '{tree_line}'")))?;
        let tree_oid = ObjectId::try_parse(tree_oid.to_string())?;

        let mut next_line = lines
            .next()
            .ok_or_else(|| Error::corrupt("commit missing author line"))?;

        let parent = match next_line.strip_prefix("parent ") {
            Some(parent_oid) => {
                next_line = lines
                    .next()
                    .ok_or_else(|| Error::corrupt("commit missing author line"))?;
                Some(ObjectId::try_parse(parent_oid.to_string())?)
            }
            None => None,
        };

        let author = next_line
            .strip_prefix("author ")
            .ok_or_else(|| Error::corrupt(format!("invalid commit author line: '{next_line}'")))?;
        let author = Author::try_from(author)?;

        let committer_line = lines
            .next()
            .ok_or_else(|| Error::corrupt("commit missing committer line"))?;
        committer_line
            .strip_prefix("committer ")
            .ok_or_else(|| {
                Error::corrupt(format!("invalid commit committer line: '{committer_line}'"))
            })?;

        // skip the blank separator line
        lines.next();

        let message = lines.collect::<Vec<&str>>().join("\n");
        Ok(Self::new(parent, tree_oid, author, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_oid.as_ref()));
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}
