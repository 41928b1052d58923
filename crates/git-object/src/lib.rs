//! Tree object codec.
//!
//! A tree object is a flat concatenation of `<mode> <path>\0<20-byte id>`
//! records. [`TreeBuilder`] (or [`encode`]) produces that buffer from entries
//! in the order given, and [`TreeCursor`] walks a buffer one record at a time
//! without collecting it.

mod cursor;
mod tree;

pub use cursor::{decode, TreeCursor};
pub use tree::{encode, FileMode, TreeBuilder, TreeEntry, TreeEntryRef};

use bstr::BString;
use git_hash::hasher::Hasher;
use git_hash::{HashError, ObjectId};

/// Errors produced while encoding or decoding tree objects.
#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("malformed mode '{mode}' in tree record at offset {offset}")]
    MalformedMode { offset: usize, mode: BString },

    #[error("truncated tree record at offset {offset}: {reason}")]
    TruncatedRecord { offset: usize, reason: &'static str },

    #[error("invalid tree entry path '{path}': contains NUL byte")]
    InvalidPath { path: BString },

    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Object id of an encoded tree, as stored in a loose object database.
pub fn tree_id(content: &[u8]) -> Result<ObjectId, ObjectError> {
    Ok(Hasher::hash_object("tree", content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_tree_id() {
        assert_eq!(
            tree_id(b"").unwrap().to_hex(),
            "4b825dc642cb6eb9a060e54bf8d69288fbee4904"
        );
    }

    #[test]
    fn error_messages() {
        let err = ObjectError::MalformedMode {
            offset: 3,
            mode: BString::from("10x644"),
        };
        assert_eq!(
            err.to_string(),
            "malformed mode '10x644' in tree record at offset 3"
        );
        let err = ObjectError::TruncatedRecord {
            offset: 0,
            reason: "missing NUL after path",
        };
        assert_eq!(
            err.to_string(),
            "truncated tree record at offset 0: missing NUL after path"
        );
    }
}
