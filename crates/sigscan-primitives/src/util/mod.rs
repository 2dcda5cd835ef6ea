//! Hex helpers for 256-bit integers and raw identifiers.
//!
//! Integer fields (`r`, `s`, `z`, `n`) are written the way they usually appear
//! in block explorers and debug output: optionally `0x`-prefixed, possibly with
//! the leading zero digit dropped. Identifiers are raw byte strings and must be
//! strict, even-length hex.

use k256::elliptic_curve::bigint::Encoding;

use crate::{PrimitivesError, U256};

/// Size of a 256-bit integer in bytes.
pub const U256_BYTES: usize = 32;

/// Maximum number of significant hex digits in a 256-bit integer.
pub const U256_HEX_DIGITS: usize = U256_BYTES * 2;

/// Parse a big-endian hex string into a 256-bit unsigned integer.
///
/// Accepts an optional `0x`/`0X` prefix. Short strings, including odd digit
/// counts, are zero-padded on the high end. Leading zeros beyond 64 digits
/// are ignored.
///
/// # Arguments
/// * `hex_str` - The hex-encoded integer.
///
/// # Returns
/// `Ok(U256)` on success, or `PrimitivesError::InvalidHex` if the string is
/// empty, contains non-hex characters, or encodes a value wider than 256 bits.
pub fn parse_u256_hex(hex_str: &str) -> Result<U256, PrimitivesError> {
    let digits = hex_str
        .strip_prefix("0x")
        .or_else(|| hex_str.strip_prefix("0X"))
        .unwrap_or(hex_str);
    if digits.is_empty() {
        return Err(PrimitivesError::InvalidHex(format!(
            "empty integer literal {:?}",
            hex_str
        )));
    }

    let significant = digits.trim_start_matches('0');
    if significant.len() > U256_HEX_DIGITS {
        return Err(PrimitivesError::InvalidHex(format!(
            "integer has {} significant hex digits, max is {}",
            significant.len(),
            U256_HEX_DIGITS
        )));
    }

    let mut padded = String::with_capacity(U256_HEX_DIGITS);
    for _ in significant.len()..U256_HEX_DIGITS {
        padded.push('0');
    }
    padded.push_str(significant);

    let bytes = hex::decode(&padded)?;
    u256_from_be_slice(&bytes)
}

/// Build a 256-bit integer from big-endian bytes.
///
/// Inputs shorter than 32 bytes are left-padded with zeros.
///
/// # Arguments
/// * `bytes` - Big-endian integer bytes, at most 32 of them.
///
/// # Returns
/// `Ok(U256)` or `PrimitivesError::InvalidRange` for inputs over 32 bytes.
pub fn u256_from_be_slice(bytes: &[u8]) -> Result<U256, PrimitivesError> {
    if bytes.len() > U256_BYTES {
        return Err(PrimitivesError::InvalidRange(format!(
            "integer of {} bytes does not fit in 256 bits",
            bytes.len()
        )));
    }
    let mut buf = [0u8; U256_BYTES];
    buf[U256_BYTES - bytes.len()..].copy_from_slice(bytes);
    Ok(U256::from_be_bytes(buf))
}

/// Serialize a 256-bit integer as 32 big-endian bytes.
pub fn u256_to_be_bytes(value: &U256) -> [u8; U256_BYTES] {
    value.to_be_bytes()
}

/// Render a 256-bit integer as `0x`-prefixed, zero-padded lowercase hex.
pub fn u256_to_hex(value: &U256) -> String {
    format!("0x{}", hex::encode(u256_to_be_bytes(value)))
}

/// Decode a raw identifier (for example a transaction id) from hex.
///
/// Unlike [`parse_u256_hex`], no prefix or padding is accepted: the input
/// must be an even number of hex digits.
///
/// # Arguments
/// * `identifier` - The hex-encoded identifier.
///
/// # Returns
/// The decoded bytes, or `PrimitivesError::InvalidHex` on malformed input.
pub fn decode_identifier(identifier: &str) -> Result<Vec<u8>, PrimitivesError> {
    hex::decode(identifier).map_err(|e| {
        PrimitivesError::InvalidHex(format!("identifier {:?}: {}", identifier, e))
    })
}
