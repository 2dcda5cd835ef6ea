//! Verifier configuration: curve parameters and canonical-form policy.

use sigscan_primitives::ec::CurveParams;

/// Settings shared by every verification a [`crate::Verifier`] performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Domain parameters; range checks and the low-S bound use its order.
    pub curve: CurveParams,
    /// Treat signatures with `s > n/2` as invalid (BIP-146 `LOW_S` policy).
    pub require_low_s: bool,
}

impl VerifierConfig {
    /// Plain ECDSA validity; high-S signatures verify but are flagged.
    pub fn standard() -> Self {
        VerifierConfig {
            curve: CurveParams::secp256k1(),
            require_low_s: false,
        }
    }

    /// Standardness rules: only low-S signatures are valid.
    pub fn strict() -> Self {
        VerifierConfig {
            require_low_s: true,
            ..Self::standard()
        }
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self::standard()
    }
}
