//! ECDSA signature with range checks, low-S handling and DER serialization.
//!
//! The signature is held as two plain 256-bit integers so that malformed
//! values (zero, or not below the curve order) can be represented and
//! reported instead of being rejected at construction time.

use k256::ecdsa::{self, RecoveryId, VerifyingKey};

use crate::ec::curve::CurveParams;
use crate::ec::public_key::PublicKey;
use crate::util::{parse_u256_hex, u256_from_be_slice, u256_to_be_bytes};
use crate::{PrimitivesError, U256};

/// Report whether `s` is in canonical low-S form for a group of order `n`.
///
/// Low-S means `s <= n / 2` (BIP-62, BIP-146).
///
/// # Arguments
/// * `s` - The S component of a signature.
/// * `n` - The group order.
///
/// # Returns
/// `Ok(bool)`, or `PrimitivesError::InvalidRange` unless `0 < s < n`.
pub fn is_low_s(s: &U256, n: &U256) -> Result<bool, PrimitivesError> {
    if *s == U256::ZERO {
        return Err(PrimitivesError::InvalidRange("s is zero".to_string()));
    }
    if s >= n {
        return Err(PrimitivesError::InvalidRange("s is >= curve order".to_string()));
    }
    Ok(*s <= n.shr_vartime(1))
}

/// An ECDSA signature with R and S components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    r: U256,
    s: U256,
}

impl Signature {
    /// Create a signature from raw R and S integers. No range check is made.
    pub fn new(r: U256, s: U256) -> Self {
        Signature { r, s }
    }

    /// Create a signature from hex-encoded R and S integers.
    ///
    /// Both values accept an optional `0x` prefix (see [`parse_u256_hex`]).
    ///
    /// # Returns
    /// `Ok(Signature)`, or `PrimitivesError::InvalidHex` on malformed input.
    pub fn from_hex(r_hex: &str, s_hex: &str) -> Result<Self, PrimitivesError> {
        Ok(Signature {
            r: parse_u256_hex(r_hex)?,
            s: parse_u256_hex(s_hex)?,
        })
    }

    pub fn r(&self) -> &U256 {
        &self.r
    }

    pub fn s(&self) -> &U256 {
        &self.s
    }

    /// Check `0 < r < n` and `0 < s < n`.
    pub fn check_range(&self, curve: &CurveParams) -> Result<(), PrimitivesError> {
        curve.check_scalar_range("signature R", &self.r)?;
        curve.check_scalar_range("signature S", &self.s)
    }

    /// Whether S is in the lower half of the curve order.
    ///
    /// # Returns
    /// `Ok(bool)`, or `PrimitivesError::InvalidRange` unless `0 < s < n`.
    pub fn is_low_s(&self, curve: &CurveParams) -> Result<bool, PrimitivesError> {
        is_low_s(&self.s, curve.n())
    }

    /// Return the low-S form of this signature.
    ///
    /// If S is above `n / 2` it is replaced with `n - S`; both forms verify
    /// against the same key and digest.
    pub fn to_low_s(&self, curve: &CurveParams) -> Self {
        if self.s > *curve.half_n() && self.s < *curve.n() {
            Signature {
                r: self.r,
                s: curve.n().wrapping_sub(&self.s),
            }
        } else {
            *self
        }
    }

    /// Parse a DER-encoded ECDSA signature.
    ///
    /// Expected format: 0x30 <len> 0x02 <r_len> <r> 0x02 <s_len> <s>
    ///
    /// Only the structure is validated here; range checks against the curve
    /// order are left to [`Signature::check_range`].
    ///
    /// # Arguments
    /// * `bytes` - DER-encoded signature bytes.
    ///
    /// # Returns
    /// `Ok(Signature)` on success, or an error if the DER encoding is malformed.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() < 8 {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: too short".to_string(),
            ));
        }

        if bytes[0] != 0x30 {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: no header magic".to_string(),
            ));
        }

        let sig_len = bytes[1] as usize;
        if sig_len + 2 != bytes.len() {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: bad length".to_string(),
            ));
        }

        let mut idx = 2;

        // Parse R
        if bytes[idx] != 0x02 {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: no 1st int marker".to_string(),
            ));
        }
        idx += 1;
        let r_len = bytes[idx] as usize;
        idx += 1;
        // At least the S marker, S length and one S byte must follow.
        if r_len == 0 || idx + r_len + 3 > bytes.len() {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: bogus R length".to_string(),
            ));
        }
        let r_bytes = &bytes[idx..idx + r_len];
        idx += r_len;

        // Parse S
        if bytes[idx] != 0x02 {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: no 2nd int marker".to_string(),
            ));
        }
        idx += 1;
        let s_len = bytes[idx] as usize;
        idx += 1;
        if s_len == 0 || idx + s_len != bytes.len() {
            return Err(PrimitivesError::InvalidSignature(
                "malformed signature: bogus S length".to_string(),
            ));
        }
        let s_bytes = &bytes[idx..idx + s_len];

        Ok(Signature {
            r: der_int_to_u256(r_bytes)?,
            s: der_int_to_u256(s_bytes)?,
        })
    }

    /// Serialize the signature in DER format with low-S normalization.
    ///
    /// Output format: 0x30 <len> 0x02 <r_len> <r_bytes> 0x02 <s_len> <s_bytes>
    pub fn to_der(&self, curve: &CurveParams) -> Vec<u8> {
        let low = self.to_low_s(curve);
        let rb = canonicalize_int(&u256_to_be_bytes(&low.r));
        let sb = canonicalize_int(&u256_to_be_bytes(&low.s));

        let total_len = 6 + rb.len() + sb.len();
        let mut out = Vec::with_capacity(total_len);
        out.push(0x30);
        out.push((total_len - 2) as u8);
        out.push(0x02);
        out.push(rb.len() as u8);
        out.extend_from_slice(&rb);
        out.push(0x02);
        out.push(sb.len() as u8);
        out.extend_from_slice(&sb);
        out
    }

    /// Recover the public keys for which this signature is valid over `z`.
    ///
    /// Each of the four recovery ids (parity of R.y, and whether R.x
    /// overflowed the group order) is tried; the distinct keys that recover
    /// are returned, usually two.
    ///
    /// # Arguments
    /// * `z` - The message digest; values at or above `n` are reduced.
    /// * `curve` - Curve parameters used for the range checks.
    ///
    /// # Returns
    /// The candidate keys, `PrimitivesError::InvalidRange` for out-of-range
    /// R/S, or `PrimitivesError::RecoveryFailed` if R is not the x-coordinate
    /// of any curve point.
    pub fn recover_public_keys(
        &self,
        z: &U256,
        curve: &CurveParams,
    ) -> Result<Vec<PublicKey>, PrimitivesError> {
        self.check_range(curve)?;

        // k256 only recovers from low-S signatures. Negating S negates R,
        // so the set of keys over all recovery ids is unchanged.
        let low = self.to_low_s(curve);
        let k256_sig = ecdsa::Signature::from_scalars(
            k256::FieldBytes::from(u256_to_be_bytes(&low.r)),
            k256::FieldBytes::from(u256_to_be_bytes(&low.s)),
        )
        .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        let prehash = u256_to_be_bytes(z);
        // Ids 2 and 3 stand for R.x = r + n, which exists only while r + n < p.
        let x_may_overflow = low.r < curve.p().wrapping_sub(curve.n());
        let mut keys: Vec<PublicKey> = Vec::with_capacity(2);
        for id in 0u8..4 {
            if id & 2 != 0 && !x_may_overflow {
                continue;
            }
            let Some(recovery_id) = RecoveryId::from_byte(id) else {
                continue;
            };
            if let Ok(vk) = VerifyingKey::recover_from_prehash(&prehash, &k256_sig, recovery_id) {
                let key = PublicKey::from(vk);
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        }

        if keys.is_empty() {
            return Err(PrimitivesError::RecoveryFailed(
                "R is not the x-coordinate of a curve point".to_string(),
            ));
        }
        Ok(keys)
    }
}

/// Canonicalize an integer for DER encoding.
///
/// Strips leading zeros from the big-endian representation and adds
/// a 0x00 padding byte if the high bit is set (to prevent interpretation
/// as a negative number).
fn canonicalize_int(val: &[u8; 32]) -> Vec<u8> {
    let mut start = 0;
    while start < 31 && val[start] == 0 {
        start += 1;
    }
    let trimmed = &val[start..];

    if trimmed[0] & 0x80 != 0 {
        let mut out = Vec::with_capacity(trimmed.len() + 1);
        out.push(0x00);
        out.extend_from_slice(trimmed);
        out
    } else {
        trimmed.to_vec()
    }
}

/// Convert a DER integer body to a 256-bit value.
///
/// The body must be the minimal two's-complement encoding of a non-negative
/// integer: no high bit on the first byte, and a 0x00 prefix only when the
/// next byte has its high bit set.
fn der_int_to_u256(bytes: &[u8]) -> Result<U256, PrimitivesError> {
    if bytes[0] & 0x80 != 0 {
        return Err(PrimitivesError::InvalidSignature(
            "malformed signature: negative integer".to_string(),
        ));
    }
    if bytes.len() > 1 && bytes[0] == 0x00 && bytes[1] & 0x80 == 0 {
        return Err(PrimitivesError::InvalidSignature(
            "malformed signature: excessive zero padding".to_string(),
        ));
    }
    let trimmed = if bytes[0] == 0x00 && bytes.len() > 1 {
        &bytes[1..]
    } else {
        bytes
    };
    if trimmed.len() > 32 {
        return Err(PrimitivesError::InvalidSignature(
            "integer value too large for 32 bytes".to_string(),
        ));
    }
    u256_from_be_slice(trimmed)
}
