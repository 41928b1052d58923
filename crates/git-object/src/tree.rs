use bstr::{BStr, BString, ByteSlice};
use git_hash::{ObjectId, OID_LEN};

use crate::ObjectError;

/// File mode for tree entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileMode {
    /// Regular file (100644)
    Regular,
    /// Executable file (100755)
    Executable,
    /// Symbolic link (120000)
    Symlink,
    /// Submodule link (160000)
    Gitlink,
    /// Subtree (40000)
    Tree,
    /// Any other octal value, kept so it round-trips.
    Unknown(u32),
}

impl FileMode {
    /// Parse from octal ASCII bytes (e.g., `b"100644"`).
    pub fn from_bytes(s: &[u8]) -> Result<Self, ObjectError> {
        parse_octal(s)
            .map(Self::from_raw)
            .ok_or_else(|| ObjectError::MalformedMode {
                offset: 0,
                mode: BString::from(s),
            })
    }

    /// Create from the raw numeric value.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0o100644 => Self::Regular,
            0o100755 => Self::Executable,
            0o120000 => Self::Symlink,
            0o160000 => Self::Gitlink,
            0o040000 => Self::Tree,
            other => Self::Unknown(other),
        }
    }

    /// Minimal-width octal ASCII, as written into tree records.
    pub fn as_bytes(&self) -> BString {
        BString::from(format!("{:o}", self.raw()))
    }

    /// Get the raw numeric value.
    pub fn raw(&self) -> u32 {
        match self {
            Self::Regular => 0o100644,
            Self::Executable => 0o100755,
            Self::Symlink => 0o120000,
            Self::Gitlink => 0o160000,
            Self::Tree => 0o40000,
            Self::Unknown(v) => *v,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree)
    }

    /// Regular or executable file.
    pub fn is_blob(&self) -> bool {
        matches!(self, Self::Regular | Self::Executable)
    }

    pub fn is_symlink(&self) -> bool {
        matches!(self, Self::Symlink)
    }

    pub fn is_gitlink(&self) -> bool {
        matches!(self, Self::Gitlink)
    }
}

/// Parse a non-empty, minimal-width octal ASCII string to u32.
///
/// Zero padding (`0100644`) and overflow are rejected, so every accepted
/// mode re-encodes to the same bytes.
pub(crate) fn parse_octal(s: &[u8]) -> Option<u32> {
    if s.is_empty() || (s.len() > 1 && s[0] == b'0') {
        return None;
    }
    s.iter().try_fold(0u32, |val, &b| {
        if !(b'0'..=b'7').contains(&b) {
            return None;
        }
        val.checked_mul(8)?.checked_add(u32::from(b - b'0'))
    })
}

/// An owned tree entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: FileMode,
    pub path: BString,
    pub oid: ObjectId,
}

impl TreeEntry {
    pub fn new(mode: FileMode, path: impl Into<BString>, oid: ObjectId) -> Self {
        Self {
            mode,
            path: path.into(),
            oid,
        }
    }

    /// Borrow as a record ready for [`TreeBuilder::push`].
    pub fn to_ref(&self) -> TreeEntryRef<'_> {
        TreeEntryRef {
            mode: self.mode,
            path: self.path.as_bstr(),
            oid: self.oid,
        }
    }
}

/// A tree entry whose path borrows from an encoded buffer or another owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEntryRef<'a> {
    pub mode: FileMode,
    pub path: &'a BStr,
    pub oid: ObjectId,
}

impl TreeEntryRef<'_> {
    pub fn to_entry(&self) -> TreeEntry {
        TreeEntry {
            mode: self.mode,
            path: self.path.to_owned(),
            oid: self.oid,
        }
    }
}

impl PartialEq<TreeEntry> for TreeEntryRef<'_> {
    fn eq(&self, other: &TreeEntry) -> bool {
        self.mode == other.mode && self.path == other.path.as_bstr() && self.oid == other.oid
    }
}

/// Appends validated records to a tree buffer.
///
/// Records are written in push order; the builder never sorts. Feed it an
/// already ordered sequence such as an index walk.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    buf: Vec<u8>,
    count: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the output buffer for roughly `entries` records.
    pub fn with_capacity(entries: usize) -> Self {
        Self {
            // "100644 " + a short name + NUL + id
            buf: Vec::with_capacity(entries * (8 + 16 + OID_LEN)),
            count: 0,
        }
    }

    /// Append one record: `<mode> <path>\0<id>`.
    ///
    /// A path containing NUL would make the buffer undecodable, so it is
    /// rejected and nothing is appended.
    pub fn push(&mut self, entry: TreeEntryRef<'_>) -> Result<&mut Self, ObjectError> {
        if entry.path.contains(&0) {
            return Err(ObjectError::InvalidPath {
                path: entry.path.to_owned(),
            });
        }
        self.buf.extend_from_slice(&entry.mode.as_bytes());
        self.buf.push(b' ');
        self.buf.extend_from_slice(entry.path);
        self.buf.push(0);
        self.buf.extend_from_slice(entry.oid.as_bytes());
        self.count += 1;
        Ok(self)
    }

    /// Number of records appended so far.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Take the finished buffer.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}

/// Encode `entries` in the order given.
pub fn encode<'a, I>(entries: I) -> Result<Vec<u8>, ObjectError>
where
    I: IntoIterator<Item = TreeEntryRef<'a>>,
{
    let mut builder = TreeBuilder::new();
    for entry in entries {
        builder.push(entry)?;
    }
    Ok(builder.finish())
}
