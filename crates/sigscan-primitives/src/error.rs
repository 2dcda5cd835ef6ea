/// Unified error type for all primitives operations.
///
/// Covers errors from hex decoding, integer range checks, public key parsing,
/// signature parsing and public key recovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("value out of range: {0}")]
    InvalidRange(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("point not on curve")]
    PointNotOnCurve,

    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
