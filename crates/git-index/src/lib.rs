//! Sorted entry index.
//!
//! Holds (path, mode, object id) entries in ascending byte order of path,
//! with at most one entry per path. Walking the index in order gives exactly
//! the sequence the tree encoder expects, see [`Index::write_tree`].
//!
//! Ordering is plain byte comparison of the full path. Subtree entries are
//! not given an implicit trailing '/', so a path that is a prefix of another
//! always sorts first.

pub mod entry;

use bstr::{BStr, ByteSlice};
use git_object::TreeBuilder;

pub use entry::IndexEntry;
pub use error::IndexError;

mod error {
    use bstr::BString;

    #[derive(Debug, thiserror::Error)]
    pub enum IndexError {
        #[error("unable to add index entry: '{path}' already exists")]
        DuplicatePath { path: BString },

        #[error("invalid index path '{path}': {reason}")]
        InvalidPath { path: BString, reason: &'static str },

        #[error(transparent)]
        Object(#[from] git_object::ObjectError),
    }
}

/// Options for [`Index::add`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    /// Overwrite an entry with the same path instead of rejecting the add.
    pub ok_to_replace: bool,
}

/// An in-memory index of unique, sorted entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Index {
    /// Entries sorted by path; no two share a path.
    entries: Vec<IndexEntry>,
}

impl Index {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index by inserting every entry in turn.
    ///
    /// Stops at the first duplicate or invalid path.
    pub fn from_entries<I>(entries: I) -> Result<Self, IndexError>
    where
        I: IntoIterator<Item = IndexEntry>,
    {
        let mut index = Self::new();
        for entry in entries {
            index.insert(entry)?;
        }
        Ok(index)
    }

    /// Insert an entry at its sorted position.
    ///
    /// Fails with [`IndexError::DuplicatePath`] when the path is already
    /// present; the index is left untouched on any error.
    pub fn insert(&mut self, entry: IndexEntry) -> Result<(), IndexError> {
        self.add(entry, AddOptions::default())
    }

    /// Insert an entry, optionally replacing an existing one with the same path.
    pub fn add(&mut self, entry: IndexEntry, opts: AddOptions) -> Result<(), IndexError> {
        entry.validate()?;
        match self.position(entry.path.as_bstr()) {
            Ok(pos) if opts.ok_to_replace => self.entries[pos] = entry,
            Ok(_) => return Err(IndexError::DuplicatePath { path: entry.path }),
            Err(pos) => self.entries.insert(pos, entry),
        }
        Ok(())
    }

    /// Binary search for `path`: `Ok(pos)` if present, otherwise `Err(pos)`
    /// with the position it would be inserted at.
    pub fn position(&self, path: &BStr) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|e| e.path.as_bytes().cmp(path.as_bytes()))
    }

    /// Look up an entry by path.
    pub fn get(&self, path: &BStr) -> Option<&IndexEntry> {
        self.position(path).ok().map(|pos| &self.entries[pos])
    }

    pub fn contains(&self, path: &BStr) -> bool {
        self.position(path).is_ok()
    }

    /// Remove and return the entry for `path`, if any.
    pub fn remove(&mut self, path: &BStr) -> Option<IndexEntry> {
        let pos = self.position(path).ok()?;
        Some(self.entries.remove(pos))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in ascending path order.
    pub fn iter(&self) -> std::slice::Iter<'_, IndexEntry> {
        self.entries.iter()
    }

    /// Drop every entry. The index stays usable.
    pub fn discard(&mut self) {
        self.entries.clear();
    }

    /// Encode the entries, in index order, as a tree object buffer.
    pub fn write_tree(&self) -> Result<Vec<u8>, IndexError> {
        let mut builder = TreeBuilder::with_capacity(self.len());
        for entry in self.iter() {
            builder.push(entry.as_tree_entry())?;
        }
        Ok(builder.finish())
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a IndexEntry;
    type IntoIter = std::slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
