//! Index entry type.

use bstr::{BString, ByteSlice};
use git_hash::ObjectId;
use git_object::{FileMode, TreeEntry, TreeEntryRef};

use crate::IndexError;

/// A single entry in the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Path relative to the tree root; unique within one index.
    pub path: BString,
    /// File mode.
    pub mode: FileMode,
    /// Content fingerprint.
    pub oid: ObjectId,
}

impl IndexEntry {
    pub fn new(path: impl Into<BString>, mode: FileMode, oid: ObjectId) -> Self {
        Self {
            path: path.into(),
            mode,
            oid,
        }
    }

    /// Check the path is usable as an index key: non-empty, no NUL.
    pub fn validate(&self) -> Result<(), IndexError> {
        let reason = if self.path.is_empty() {
            "empty path"
        } else if self.path.contains(&0) {
            "path contains NUL byte"
        } else {
            return Ok(());
        };
        Err(IndexError::InvalidPath {
            path: self.path.clone(),
            reason,
        })
    }

    /// View as a tree record.
    pub fn as_tree_entry(&self) -> TreeEntryRef<'_> {
        TreeEntryRef {
            mode: self.mode,
            path: self.path.as_bstr(),
            oid: self.oid,
        }
    }
}

impl From<TreeEntry> for IndexEntry {
    fn from(entry: TreeEntry) -> Self {
        Self {
            path: entry.path,
            mode: entry.mode,
            oid: entry.oid,
        }
    }
}
