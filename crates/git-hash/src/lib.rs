//! Object fingerprints for the tree index and codec.
//!
//! This crate provides the 20-byte `ObjectId` shared by the index and the
//! tree codec, hex encoding/decoding, and an optional SHA-1 fingerprint
//! provider. Nothing here is hashed implicitly: callers decide where their
//! fingerprints come from.

mod error;
pub mod hasher;
pub mod hex;
mod oid;

pub use error::HashError;
pub use oid::{ObjectId, OID_LEN};
