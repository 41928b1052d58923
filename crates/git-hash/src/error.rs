/// Errors produced while building or computing an [`ObjectId`](crate::ObjectId).
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("object id hex has non-hex digit '{character}' at position {position}")]
    InvalidHex { position: usize, character: char },

    #[error("object id hex must be {expected} digits, got {actual}")]
    InvalidHexLength { expected: usize, actual: usize },

    #[error("object id must be {expected} bytes, got {actual}")]
    InvalidHashLength { expected: usize, actual: usize },

    #[error("SHA-1 collision detected while fingerprinting content")]
    Sha1Collision,
}
