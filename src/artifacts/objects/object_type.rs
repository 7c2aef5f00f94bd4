use crate::errors::{Error, Result};
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Consume the `<type> <size>\0` header and return the parsed type
    pub fn parse_object_type(data_reader: &mut impl BufRead) -> Result<ObjectType> {
        let mut object_type = Vec::new();
        data_reader.read_until(b' ', &mut object_type)?;

        if object_type.pop() != Some(b' ') {
            return Err(Error::corrupt("truncated object header"));
        }

        let object_type = String::from_utf8(object_type)
            .map_err(|_| Error::corrupt("non-utf8 object type in header"))?;

        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;
        if size.pop() != Some(b'\0') {
            return Err(Error::corrupt("object header missing NUL terminator"));
        }

        std::str::from_utf8(&size)
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| Error::corrupt("invalid object size in header"))?;

        ObjectType::try_from(object_type.as_str())
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            other => Err(Error::corrupt(format!("invalid object type '{other}'"))),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[rstest]
    #[case(b"blob 5\0hello" as &[u8], ObjectType::Blob)]
    #[case(b"tree 0\0" as &[u8], ObjectType::Tree)]
    #[case(b"commit 9\0tree abc\n" as &[u8], ObjectType::Commit)]
    fn parses_framed_headers(#[case] data: &[u8], #[case] expected: ObjectType) {
        let mut reader = Cursor::new(data.to_vec());
        assert_eq!(ObjectType::parse_object_type(&mut reader).unwrap(), expected);
    }

    #[rstest]
    #[case(b"blob5\0" as &[u8])]
    #[case(b"blob 5" as &[u8])]
    #[case(b"branch 5\0" as &[u8])]
    fn rejects_malformed_headers(#[case] data: &[u8]) {
        let mut reader = Cursor::new(data.to_vec());
        assert!(ObjectType::parse_object_type(&mut reader).is_err());
    }
}
