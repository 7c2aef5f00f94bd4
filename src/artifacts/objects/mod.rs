pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Hex length of a SHA-1 object identifier
pub const OBJECT_ID_LENGTH: usize = 40;
