//! Forward-only decoding of tree buffers.

use bstr::{BString, ByteSlice};
use git_hash::{ObjectId, OID_LEN};

use crate::tree::{parse_octal, FileMode, TreeEntry, TreeEntryRef};
use crate::ObjectError;

enum State<'a> {
    /// A parsed record; `next` is where the following record starts.
    Occupied { entry: TreeEntryRef<'a>, next: usize },
    Terminal,
}

/// Single-pass cursor over an encoded tree.
///
/// Opening the cursor parses the first record. Each [`advance`](Self::advance)
/// drops the current entry and parses the next one, until the buffer is used
/// up and [`current`](Self::current) returns `None`. Decoded paths borrow from
/// the buffer, so the buffer cannot change while the cursor is alive.
///
/// A decode error leaves the cursor terminal.
pub struct TreeCursor<'a> {
    buf: &'a [u8],
    state: State<'a>,
}

impl<'a> TreeCursor<'a> {
    /// Open a cursor and parse the first record. An empty buffer is
    /// immediately terminal.
    pub fn open(buf: &'a [u8]) -> Result<Self, ObjectError> {
        let mut cursor = Self {
            buf,
            state: State::Terminal,
        };
        cursor.load(0)?;
        Ok(cursor)
    }

    /// The entry under the cursor, or `None` once every record is consumed.
    pub fn current(&self) -> Option<&TreeEntryRef<'a>> {
        match &self.state {
            State::Occupied { entry, .. } => Some(entry),
            State::Terminal => None,
        }
    }

    /// Move to the next record. A no-op on a terminal cursor.
    pub fn advance(&mut self) -> Result<(), ObjectError> {
        let next = match self.state {
            State::Occupied { next, .. } => next,
            State::Terminal => return Ok(()),
        };
        self.state = State::Terminal;
        self.load(next)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, State::Terminal)
    }

    /// Bytes after the current record; empty once terminal.
    pub fn remaining(&self) -> &'a [u8] {
        match self.state {
            State::Occupied { next, .. } => &self.buf[next..],
            State::Terminal => &[],
        }
    }

    fn load(&mut self, pos: usize) -> Result<(), ObjectError> {
        if pos < self.buf.len() {
            let (entry, next) = parse_record(self.buf, pos)?;
            self.state = State::Occupied { entry, next };
        }
        Ok(())
    }
}

/// Parse the record starting at `start`, returning it and the offset of the
/// record after it.
fn parse_record(buf: &[u8], start: usize) -> Result<(TreeEntryRef<'_>, usize), ObjectError> {
    let rec = &buf[start..];

    let space = rec.find_byte(b' ').ok_or(ObjectError::TruncatedRecord {
        offset: start,
        reason: "missing space after mode",
    })?;
    let mode_bytes = &rec[..space];
    let mode = parse_octal(mode_bytes)
        .map(FileMode::from_raw)
        .ok_or_else(|| ObjectError::MalformedMode {
            offset: start,
            mode: BString::from(mode_bytes),
        })?;

    let path_start = space + 1;
    let nul = rec[path_start..]
        .find_byte(0)
        .ok_or(ObjectError::TruncatedRecord {
            offset: start + path_start,
            reason: "missing NUL after path",
        })?
        + path_start;

    let oid_start = nul + 1;
    let oid_bytes: [u8; OID_LEN] = rec
        .get(oid_start..oid_start + OID_LEN)
        .and_then(|b| b.try_into().ok())
        .ok_or(ObjectError::TruncatedRecord {
            offset: start + oid_start,
            reason: "object id shorter than 20 bytes",
        })?;
    let oid = ObjectId::new(oid_bytes);

    let entry = TreeEntryRef {
        mode,
        path: rec[path_start..nul].as_bstr(),
        oid,
    };
    Ok((entry, start + oid_start + OID_LEN))
}

/// Decode a whole buffer into owned entries.
pub fn decode(buf: &[u8]) -> Result<Vec<TreeEntry>, ObjectError> {
    let mut cursor = TreeCursor::open(buf)?;
    let mut entries = Vec::new();
    while let Some(entry) = cursor.current() {
        entries.push(entry.to_entry());
        cursor.advance()?;
    }
    Ok(entries)
}
