//! secp256k1 domain parameters.
//!
//! The curve is `y^2 = x^3 + a*x + b` over the prime field `p`, with base
//! point `G` of prime order `n`. The parameters are a plain immutable value
//! that callers pass to whatever needs them.

use k256::ProjectivePoint;

use crate::{PrimitivesError, U256};

/// Field prime p = 2^256 - 2^32 - 977.
const SECP256K1_P: U256 =
    U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F");

/// Group order N.
const SECP256K1_N: U256 =
    U256::from_be_hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141");

/// Half of the group order (N/2, rounded down), the low-S boundary.
const SECP256K1_HALF_N: U256 =
    U256::from_be_hex("7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0");

const SECP256K1_GX: U256 =
    U256::from_be_hex("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");

const SECP256K1_GY: U256 =
    U256::from_be_hex("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8");

/// Immutable domain parameters of an elliptic curve group.
///
/// Only secp256k1 is supported; the point arithmetic behind
/// [`CurveParams::generator`] is k256's.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CurveParams {
    name: &'static str,
    p: U256,
    n: U256,
    half_n: U256,
    a: U256,
    b: U256,
    gx: U256,
    gy: U256,
}

impl CurveParams {
    /// The secp256k1 parameters used by Bitcoin.
    pub const fn secp256k1() -> Self {
        CurveParams {
            name: "secp256k1",
            p: SECP256K1_P,
            n: SECP256K1_N,
            half_n: SECP256K1_HALF_N,
            a: U256::ZERO,
            b: U256::from_u64(7),
            gx: SECP256K1_GX,
            gy: SECP256K1_GY,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The prime modulus of the base field.
    pub fn p(&self) -> &U256 {
        &self.p
    }

    /// The order of the base point.
    pub fn n(&self) -> &U256 {
        &self.n
    }

    /// `n / 2`, the largest canonical (low-S) value of `s`.
    pub fn half_n(&self) -> &U256 {
        &self.half_n
    }

    pub fn a(&self) -> &U256 {
        &self.a
    }

    pub fn b(&self) -> &U256 {
        &self.b
    }

    /// Affine coordinates of the base point `G`.
    pub fn generator_coordinates(&self) -> (&U256, &U256) {
        (&self.gx, &self.gy)
    }

    /// The base point `G` as a k256 projective point.
    pub fn generator(&self) -> ProjectivePoint {
        ProjectivePoint::GENERATOR
    }

    /// Whether `(x, y)` satisfies `y^2 = x^3 + ax + b` over the base field.
    pub fn is_on_curve(&self, x: &U256, y: &U256) -> bool {
        if *x >= self.p || *y >= self.p {
            return false;
        }
        let lhs = self.mul_mod_p(y, y);
        let x3 = self.mul_mod_p(&self.mul_mod_p(x, x), x);
        let ax = self.mul_mod_p(&self.a, x);
        let rhs = x3.add_mod(&ax, &self.p).add_mod(&self.b, &self.p);
        lhs == rhs
    }

    fn mul_mod_p(&self, lhs: &U256, rhs: &U256) -> U256 {
        U256::const_rem_wide(lhs.mul_wide(rhs), &self.p).0
    }

    /// Check that `value` lies in the open interval `(0, n)`.
    ///
    /// # Arguments
    /// * `label` - Name of the value, used in the error message.
    /// * `value` - The integer to check.
    ///
    /// # Returns
    /// `Ok(())` if `0 < value < n`, otherwise `PrimitivesError::InvalidRange`.
    pub fn check_scalar_range(&self, label: &str, value: &U256) -> Result<(), PrimitivesError> {
        if *value == U256::ZERO {
            return Err(PrimitivesError::InvalidRange(format!("{} is zero", label)));
        }
        if *value >= self.n {
            return Err(PrimitivesError::InvalidRange(format!(
                "{} is >= curve order",
                label
            )));
        }
        Ok(())
    }
}

impl Default for CurveParams {
    fn default() -> Self {
        CurveParams::secp256k1()
    }
}
