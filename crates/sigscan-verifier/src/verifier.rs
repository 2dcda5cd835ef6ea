//! ECDSA verification over secp256k1.
//!
//! The verification equation is evaluated directly on k256 scalars and
//! points rather than through `VerifyingKey::verify_prehash`, so the failure
//! modes (range, non-invertible `s`, point at infinity, x mismatch) stay
//! distinguishable and high-S signatures are accepted unless the config asks
//! otherwise.

use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::point::AffineCoordinates;
use k256::{ProjectivePoint, Scalar};

use sigscan_primitives::ec::{is_low_s, CurveParams, PublicKey, Signature};
use sigscan_primitives::util::{parse_u256_hex, u256_to_hex};
use sigscan_primitives::U256;

use crate::batch::BatchIter;
use crate::config::VerifierConfig;
use crate::error::VerifierError;
use crate::record::SignatureRecord;
use crate::report::{KeySource, RecordReport};

/// Checks ECDSA signatures against a fixed configuration.
///
/// Stateless apart from its configuration, so it is `Copy` and can be shared
/// freely between threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Verifier {
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(config: VerifierConfig) -> Self {
        Verifier { config }
    }

    pub fn curve(&self) -> &CurveParams {
        &self.config.curve
    }

    /// Verify `sig` over digest `z` with `public_key`.
    ///
    /// # Returns
    /// `true` iff the signature is valid. Use [`Verifier::check`] to learn
    /// why a signature was rejected.
    pub fn verify(&self, public_key: &PublicKey, z: &U256, sig: &Signature) -> bool {
        self.check(public_key, z, sig).is_ok()
    }

    /// Verify `sig` over digest `z` with `public_key`, reporting the reason
    /// for a rejection.
    ///
    /// Range checks run before any curve arithmetic. `z` is reduced modulo
    /// the group order.
    ///
    /// # Returns
    /// `Ok(())` for a valid signature, `VerifierError::InvalidRange` if `r`
    /// or `s` is outside `(0, n)`, or `VerifierError::InvalidSignature` if
    /// the equation does not hold (or `s` is high under a low-S policy).
    pub fn check(
        &self,
        public_key: &PublicKey,
        z: &U256,
        sig: &Signature,
    ) -> Result<(), VerifierError> {
        self.check_preconditions(sig)?;

        let r = <Scalar as Reduce<U256>>::reduce(*sig.r());
        let s = <Scalar as Reduce<U256>>::reduce(*sig.s());
        let z = <Scalar as Reduce<U256>>::reduce(*z);

        let w = Option::<Scalar>::from(s.invert())
            .ok_or_else(|| VerifierError::InvalidSignature("s is not invertible".to_string()))?;
        let u1 = z * w;
        let u2 = r * w;

        let point = self.curve().generator() * u1 + public_key.to_projective_point() * u2;
        if point == ProjectivePoint::IDENTITY {
            return Err(VerifierError::InvalidSignature(
                "u1*G + u2*Q is the point at infinity".to_string(),
            ));
        }

        let x = point.to_affine().x();
        if <Scalar as Reduce<U256>>::reduce_bytes(&x) != r {
            return Err(VerifierError::InvalidSignature(
                "x-coordinate does not match r".to_string(),
            ));
        }
        Ok(())
    }

    /// Verify hex-encoded inputs: a SEC1 public key and `z`, `r`, `s`
    /// integers.
    ///
    /// # Returns
    /// As [`Verifier::check`], plus `VerifierError::Decode` for malformed hex
    /// or an invalid public key encoding.
    pub fn check_hex(
        &self,
        public_key: &str,
        z: &str,
        r: &str,
        s: &str,
    ) -> Result<(), VerifierError> {
        let public_key = PublicKey::from_hex(public_key)?;
        let z = parse_u256_hex(z)?;
        let sig = Signature::from_hex(r, s)?;
        self.check(&public_key, &z, &sig)
    }

    /// Whether `s` is in low-S form for the configured curve.
    pub fn is_low_s(&self, s: &U256) -> Result<bool, VerifierError> {
        Ok(is_low_s(s, self.curve().n())?)
    }

    /// Recover the keys `sig` is valid for over `z`.
    ///
    /// Every recovered key is checked again with [`Verifier::check`]; a key
    /// that fails that check is reported as `VerifierError::Internal`, since
    /// recovery and verification disagreeing can only be a bug.
    pub fn recover(&self, z: &U256, sig: &Signature) -> Result<Vec<PublicKey>, VerifierError> {
        self.check_preconditions(sig)?;

        let keys = sig.recover_public_keys(z, self.curve())?;
        for key in &keys {
            self.check(key, z, sig).map_err(|e| {
                VerifierError::Internal(format!("recovered key {} does not verify: {}", key, e))
            })?;
        }
        Ok(keys)
    }

    /// Check one record. Failures are captured in the report, never returned.
    ///
    /// A record without a public key cannot be verified: its report stays
    /// `valid = false` with no failure and lists the recovered candidate keys.
    pub fn verify_record(&self, record: &SignatureRecord) -> RecordReport {
        let mut report = RecordReport::new(&record.identifier);
        report.expected_low_s = record.expected_low_s;

        if let Err(e) = record.check_curve_order(self.curve()) {
            return report.fail(&e);
        }

        let sig = match record.signature() {
            Ok(sig) => sig,
            Err(e) => return report.fail(&e),
        };
        report.r = Some(u256_to_hex(sig.r()));
        report.s = Some(u256_to_hex(sig.s()));
        report.low_s = sig.is_low_s(self.curve()).ok();

        let (z, digest_source) = match record.digest() {
            Ok(digest) => digest,
            Err(e) => return report.fail(&e),
        };
        report.z = Some(u256_to_hex(&z));
        report.digest_source = Some(digest_source);

        let public_key = match record.public_key() {
            Ok(public_key) => public_key,
            Err(e) => return report.fail(&e),
        };

        let Some(public_key) = public_key else {
            report.key_source = Some(KeySource::Recovered);
            return match self.recover(&z, &sig) {
                Ok(keys) => {
                    report.public_keys = keys.iter().map(PublicKey::to_hex).collect();
                    report
                }
                Err(e) => report.fail(&e),
            };
        };

        report.key_source = Some(KeySource::Explicit);
        report.public_keys = vec![public_key.to_hex()];
        match self.check(&public_key, &z, &sig) {
            Ok(()) => {
                report.valid = true;
                report
            }
            Err(e) => report.fail(&e),
        }
    }

    /// Lazily check a batch of records, one report per record, in order.
    ///
    /// Each call starts a fresh pass over `records`.
    pub fn verify_batch<'a>(&'a self, records: &'a [SignatureRecord]) -> BatchIter<'a> {
        BatchIter::new(self, records)
    }

    fn check_preconditions(&self, sig: &Signature) -> Result<(), VerifierError> {
        sig.check_range(self.curve())?;
        if self.config.require_low_s && !sig.is_low_s(self.curve())? {
            return Err(VerifierError::InvalidSignature(
                "s is above n/2 and low-S is required".to_string(),
            ));
        }
        Ok(())
    }
}
