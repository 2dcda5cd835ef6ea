//! Message digests for signature checking.
//!
//! The digest `z` of a signed message is SHA-256 over the raw bytes of the
//! message identifier, read as a big-endian 256-bit integer.

use sha2::{Digest, Sha256};

use crate::util::{decode_identifier, u256_from_be_slice};
use crate::{PrimitivesError, U256};

/// Compute SHA-256 hash of the input data.
///
/// # Arguments
/// * `data` - Byte slice to hash.
///
/// # Returns
/// A 32-byte SHA-256 digest.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive the digest `z` from a hex-encoded identifier.
///
/// Decodes the identifier to bytes, hashes them with SHA-256 and interprets
/// the digest as an unsigned big-endian integer. The result is not reduced
/// modulo the curve order; the verifier does that.
///
/// # Arguments
/// * `identifier` - Even-length hex string, e.g. a transaction id.
///
/// # Returns
/// `Ok(U256)` digest, or `PrimitivesError::InvalidHex` if the identifier is
/// not valid hex of even length.
pub fn digest_from_identifier(identifier: &str) -> Result<U256, PrimitivesError> {
    let bytes = decode_identifier(identifier)?;
    u256_from_be_slice(&sha256(&bytes))
}
