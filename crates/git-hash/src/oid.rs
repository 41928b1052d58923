use std::fmt;
use std::str::FromStr;

use crate::hex::{hex_decode, hex_to_string};
use crate::HashError;

/// Width of every fingerprint in bytes.
pub const OID_LEN: usize = 20;

/// The content fingerprint carried by every index and tree entry.
///
/// Always exactly [`OID_LEN`] bytes. The bytes are opaque here: they may be a
/// SHA-1 digest (see [`crate::hasher`]) or anything else a caller derives.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId([u8; OID_LEN]);

impl ObjectId {
    /// The all-zeros fingerprint.
    pub const NULL: Self = Self([0u8; OID_LEN]);

    /// Wrap an owned 20-byte array.
    pub const fn new(bytes: [u8; OID_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a byte slice, which must be exactly 20 bytes long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, HashError> {
        let arr: [u8; OID_LEN] = bytes
            .try_into()
            .map_err(|_| HashError::InvalidHashLength {
                expected: OID_LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }

    /// Create from a 40-digit hex string (either case).
    pub fn from_hex(hex: &str) -> Result<Self, HashError> {
        let mut bytes = [0u8; OID_LEN];
        hex_decode(hex, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Deterministic fingerprint for a sequence number.
    ///
    /// The little-endian bytes of `seq` fill the front of the id and the rest
    /// is zero, so distinct numbers always give distinct ids.
    pub fn from_sequence(seq: u32) -> Self {
        let mut bytes = [0u8; OID_LEN];
        bytes[..4].copy_from_slice(&seq.to_le_bytes());
        Self(bytes)
    }

    /// The raw fingerprint bytes.
    pub fn as_bytes(&self) -> &[u8; OID_LEN] {
        &self.0
    }

    /// Whether this is the all-zeros id.
    pub fn is_null(&self) -> bool {
        self.0 == [0u8; OID_LEN]
    }

    /// Lowercase hex representation.
    pub fn to_hex(&self) -> String {
        hex_to_string(&self.0)
    }
}

impl From<[u8; OID_LEN]> for ObjectId {
    fn from(bytes: [u8; OID_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for ObjectId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", &self.to_hex()[..8])
    }
}

impl FromStr for ObjectId {
    type Err = HashError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}
