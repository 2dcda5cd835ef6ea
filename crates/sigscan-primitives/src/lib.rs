/// sigscan - secp256k1 primitives for signature checking.
///
/// This crate provides the building blocks used by the verifier:
/// - Hex parsing of 256-bit integers and identifiers
/// - SHA-256 message digests derived from identifiers
/// - secp256k1 curve parameters as an immutable value
/// - Public keys (SEC1 encoded points)
/// - ECDSA signatures with range checks, low-S handling, DER and key recovery

pub mod hash;
pub mod util;
pub mod ec;

mod error;
pub use error::PrimitivesError;

/// Unsigned 256-bit integer used for `r`, `s`, `z` and the curve constants.
pub use k256::U256;
