//! Lowercase hex rendering and case-insensitive parsing of fingerprint bytes.

use crate::HashError;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Value of a single hex digit, or `None` for anything else.
const fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Hex-encode `bytes` into `out`, two lowercase digits per byte.
///
/// # Panics
///
/// Panics if `out` is shorter than `bytes.len() * 2`.
pub fn hex_encode(bytes: &[u8], out: &mut [u8]) {
    assert!(out.len() >= bytes.len() * 2, "hex_encode: buffer too short");
    for (pair, &b) in out.chunks_exact_mut(2).zip(bytes) {
        pair[0] = DIGITS[usize::from(b >> 4)];
        pair[1] = DIGITS[usize::from(b & 0x0f)];
    }
}

/// Hex-encode `bytes` to a new `String`.
pub fn hex_to_string(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        s.push(char::from(DIGITS[usize::from(b >> 4)]));
        s.push(char::from(DIGITS[usize::from(b & 0x0f)]));
    }
    s
}

/// Decode `hex` into `out`. `hex` must be exactly `out.len() * 2` digits long.
pub fn hex_decode(hex: &str, out: &mut [u8]) -> Result<(), HashError> {
    let hex = hex.as_bytes();
    if hex.len() != out.len() * 2 {
        return Err(HashError::InvalidHexLength {
            expected: out.len() * 2,
            actual: hex.len(),
        });
    }
    for (i, pair) in hex.chunks_exact(2).enumerate() {
        let digit = |j: usize| {
            nibble(pair[j]).ok_or(HashError::InvalidHex {
                position: i * 2 + j,
                character: char::from(pair[j]),
            })
        };
        out[i] = (digit(0)? << 4) | digit(1)?;
    }
    Ok(())
}

/// Decode an even-length hex string to a new `Vec<u8>`.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, HashError> {
    if hex.len() % 2 != 0 {
        return Err(HashError::InvalidHexLength {
            expected: hex.len() + 1,
            actual: hex.len(),
        });
    }
    let mut out = vec![0u8; hex.len() / 2];
    hex_decode(hex, &mut out)?;
    Ok(out)
}

/// Whether `s` has even length and only hex digits.
pub fn is_valid_hex(s: &str) -> bool {
    s.len() % 2 == 0 && s.bytes().all(|b| nibble(b).is_some())
}
