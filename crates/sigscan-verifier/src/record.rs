//! Input records: one signature to check, with hex-encoded fields.

use serde::{Deserialize, Serialize};

use sigscan_primitives::ec::{CurveParams, PublicKey, Signature};
use sigscan_primitives::hash::digest_from_identifier;
use sigscan_primitives::util::{parse_u256_hex, u256_to_hex};
use sigscan_primitives::{PrimitivesError, U256};

use crate::error::VerifierError;

/// Where the digest `z` of a record came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DigestSource {
    /// Supplied in the record's `z` field.
    Provided,
    /// SHA-256 of the record's identifier bytes.
    Identifier,
}

/// A signature record as read from JSON.
///
/// The signature is given either as `r` and `s` integers or as a hex DER
/// blob. `z`, `n` and `public_key` are optional: a missing `z` is derived
/// from the identifier, a missing `n` means the configured curve order, and a
/// missing public key means the candidates are recovered from the signature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    #[serde(alias = "TXID", alias = "txid")]
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub der: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "pubkey", alias = "public_key")]
    pub public_key: Option<String>,
    /// The low-S classification the record's source claims, if any.
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "Low-S?")]
    pub expected_low_s: Option<bool>,
}

impl SignatureRecord {
    /// A record with an identifier and hex `r`/`s`; everything else unset.
    pub fn new(identifier: impl Into<String>, r: impl Into<String>, s: impl Into<String>) -> Self {
        SignatureRecord {
            identifier: identifier.into(),
            r: Some(r.into()),
            s: Some(s.into()),
            ..Default::default()
        }
    }

    /// A record carrying a hex DER signature instead of `r`/`s`.
    pub fn from_der_hex(identifier: impl Into<String>, der: impl Into<String>) -> Self {
        SignatureRecord {
            identifier: identifier.into(),
            der: Some(der.into()),
            ..Default::default()
        }
    }

    pub fn with_z(mut self, z: impl Into<String>) -> Self {
        self.z = Some(z.into());
        self
    }

    pub fn with_n(mut self, n: impl Into<String>) -> Self {
        self.n = Some(n.into());
        self
    }

    pub fn with_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.public_key = Some(public_key.into());
        self
    }

    pub fn with_expected_low_s(mut self, low_s: bool) -> Self {
        self.expected_low_s = Some(low_s);
        self
    }

    /// Decode the signature from `r`/`s` or `der`.
    pub fn signature(&self) -> Result<Signature, VerifierError> {
        match (&self.r, &self.s, &self.der) {
            (Some(r), Some(s), None) => Ok(Signature::from_hex(r, s)?),
            (None, None, Some(der)) => {
                let bytes = hex::decode(der).map_err(PrimitivesError::from)?;
                Ok(Signature::from_der(&bytes)?)
            }
            _ => Err(VerifierError::Decode(
                "record needs either both r and s, or der".to_string(),
            )),
        }
    }

    /// The digest `z`, taken from the record or derived from the identifier.
    pub fn digest(&self) -> Result<(U256, DigestSource), VerifierError> {
        match &self.z {
            Some(z) => Ok((parse_u256_hex(z)?, DigestSource::Provided)),
            None => Ok((
                digest_from_identifier(&self.identifier)?,
                DigestSource::Identifier,
            )),
        }
    }

    /// The explicit public key, if the record has one.
    pub fn public_key(&self) -> Result<Option<PublicKey>, VerifierError> {
        self.public_key
            .as_deref()
            .map(|hex_str| PublicKey::from_hex(hex_str).map_err(VerifierError::from))
            .transpose()
    }

    /// Check that a per-record curve order, if any, matches `curve`.
    pub fn check_curve_order(&self, curve: &CurveParams) -> Result<(), VerifierError> {
        let Some(n) = &self.n else {
            return Ok(());
        };
        let n = parse_u256_hex(n)?;
        if n != *curve.n() {
            return Err(VerifierError::CurveOrderMismatch {
                curve: curve.name(),
                expected: u256_to_hex(curve.n()),
                actual: u256_to_hex(&n),
            });
        }
        Ok(())
    }
}
