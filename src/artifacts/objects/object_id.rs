//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character lowercase hexadecimal strings identifying
//! every object in the store (blobs, trees, commits).
//!
//! ## Storage
//!
//! Objects live under `.twig/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::{Error, Result};
use std::path::PathBuf;

/// Content digest of a stored object
///
/// A 40-character hexadecimal string that uniquely identifies an object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string
    pub fn try_parse(id: String) -> Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::corrupt(format!(
                "invalid object id length {} for '{}'",
                id.len(),
                id
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::corrupt(format!("invalid object id characters: {id}")));
        }
        Ok(Self(id.to_lowercase()))
    }

    /// Convert to the fan-out path used by the object store
    ///
    /// Splits the digest as `XX/YYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let (dir, file) = self.0.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// Abbreviated form (first 7 characters)
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(7).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_valid_hex_digest() {
        let id = "a".repeat(OBJECT_ID_LENGTH);
        let oid = ObjectId::try_parse(id.clone()).unwrap();
        assert_eq!(oid.as_ref(), id);
    }

    #[rstest]
    #[case("")]
    #[case("abc123")]
    #[case("zz")]
    fn rejects_wrong_length(#[case] id: &str) {
        assert!(ObjectId::try_parse(id.to_string()).is_err());
    }

    #[test]
    fn rejects_non_hex_characters() {
        let id = "g".repeat(OBJECT_ID_LENGTH);
        assert!(ObjectId::try_parse(id).is_err());
    }

    #[test]
    fn fan_out_path_splits_first_two_chars() {
        let oid = ObjectId::try_parse(format!("ab{}", "c".repeat(38))).unwrap();
        assert_eq!(oid.to_path(), PathBuf::from("ab").join("c".repeat(38)));
    }
}
