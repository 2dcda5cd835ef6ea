use sigscan_primitives::PrimitivesError;

use crate::report::FailureKind;

/// Error types for signature verification.
///
/// Every variant describes the failure of a single record; none of them is
/// meant to stop a batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifierError {
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid range: {0}")]
    InvalidRange(String),
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    #[error("curve order mismatch: {curve} has order {expected}, record has {actual}")]
    CurveOrderMismatch {
        curve: &'static str,
        expected: String,
        actual: String,
    },
    #[error("internal error: {0}")]
    Internal(String),
}

impl VerifierError {
    /// The failure class reported for this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            VerifierError::Decode(_) => FailureKind::Decode,
            VerifierError::InvalidRange(_) => FailureKind::InvalidRange,
            VerifierError::InvalidSignature(_) => FailureKind::InvalidSignature,
            VerifierError::CurveOrderMismatch { .. } => FailureKind::CurveOrderMismatch,
            VerifierError::Internal(_) => FailureKind::Internal,
        }
    }
}

impl From<PrimitivesError> for VerifierError {
    fn from(e: PrimitivesError) -> Self {
        match e {
            PrimitivesError::InvalidHex(msg) => VerifierError::Decode(msg),
            // Malformed DER or SEC1 encodings are input problems.
            PrimitivesError::InvalidSignature(msg) => VerifierError::Decode(msg),
            PrimitivesError::InvalidPublicKey(msg) => VerifierError::Decode(msg),
            PrimitivesError::PointNotOnCurve => {
                VerifierError::Decode("public key is not a point on the curve".to_string())
            }
            PrimitivesError::InvalidRange(msg) => VerifierError::InvalidRange(msg),
            PrimitivesError::RecoveryFailed(msg) => VerifierError::InvalidSignature(msg),
        }
    }
}
