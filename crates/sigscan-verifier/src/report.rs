//! Per-record verification results and batch totals.

use std::fmt;

use serde::Serialize;

use crate::error::VerifierError;
use crate::record::DigestSource;

/// Failure classes a record can end in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// Malformed hex, DER or public key encoding.
    Decode,
    /// `r` or `s` outside `(0, n)`.
    InvalidRange,
    /// The verification equation does not hold.
    InvalidSignature,
    /// The record names a curve order other than the configured one.
    CurveOrderMismatch,
    /// A bug rather than bad input; never expected.
    Internal,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Decode => "decode error",
            FailureKind::InvalidRange => "invalid range",
            FailureKind::InvalidSignature => "invalid signature",
            FailureKind::CurveOrderMismatch => "curve order mismatch",
            FailureKind::Internal => "internal error",
        };
        f.write_str(s)
    }
}

/// How the verification key of a record was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KeySource {
    Explicit,
    Recovered,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&VerifierError> for Failure {
    fn from(e: &VerifierError) -> Self {
        Failure {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// Outcome of checking one record.
///
/// `valid` and `low_s` are the core result. `valid` is only ever true for a
/// signature checked against an explicit public key; a record whose keys
/// were recovered is unverified. The rest describes what was checked so the
/// report can be read without the input at hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordReport {
    pub identifier: String,
    pub valid: bool,
    /// `None` when `s` could not be decoded or lies outside `(0, n)`.
    pub low_s: Option<bool>,
    /// The low-S value the record itself claimed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_low_s: Option<bool>,
    pub r: Option<String>,
    pub s: Option<String>,
    pub z: Option<String>,
    pub digest_source: Option<DigestSource>,
    pub key_source: Option<KeySource>,
    /// Compressed SEC1 hex of the explicit key or of each recovered key.
    pub public_keys: Vec<String>,
    pub failure: Option<Failure>,
}

impl RecordReport {
    pub(crate) fn new(identifier: &str) -> Self {
        RecordReport {
            identifier: identifier.to_string(),
            valid: false,
            low_s: None,
            expected_low_s: None,
            r: None,
            s: None,
            z: None,
            digest_source: None,
            key_source: None,
            public_keys: Vec::new(),
            failure: None,
        }
    }

    pub(crate) fn fail(mut self, e: &VerifierError) -> Self {
        self.valid = false;
        self.failure = Some(Failure::from(e));
        self
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.failure.as_ref().map(|f| f.kind)
    }

    /// No key was supplied and candidates were recovered, so validity is
    /// unknown.
    pub fn is_unverified(&self) -> bool {
        !self.valid && self.failure.is_none() && self.key_source == Some(KeySource::Recovered)
    }

    /// The record claimed a low-S value that disagrees with the computed one.
    pub fn low_s_mismatch(&self) -> bool {
        matches!((self.expected_low_s, self.low_s), (Some(e), Some(a)) if e != a)
    }

    /// Whether the failure, if any, points at a bug instead of bad input.
    pub fn is_internal_error(&self) -> bool {
        self.failure_kind() == Some(FailureKind::Internal)
    }
}

fn or_dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

impl fmt::Display for RecordReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "signature for {}:", self.identifier)?;
        writeln!(f, "  r      = {}", or_dash(&self.r))?;
        writeln!(f, "  s      = {}", or_dash(&self.s))?;
        match self.digest_source {
            Some(DigestSource::Identifier) => {
                writeln!(f, "  z      = {} (from identifier)", or_dash(&self.z))?
            }
            _ => writeln!(f, "  z      = {}", or_dash(&self.z))?,
        }
        match self.low_s {
            Some(low) if self.low_s_mismatch() => {
                writeln!(f, "  low-S  = {} (record says {})", low, !low)?
            }
            Some(low) => writeln!(f, "  low-S  = {}", low)?,
            None => writeln!(f, "  low-S  = unknown")?,
        }
        match self.key_source {
            Some(KeySource::Explicit) => {
                writeln!(f, "  key    = {}", self.public_keys.join(", "))?
            }
            Some(KeySource::Recovered) if !self.public_keys.is_empty() => {
                writeln!(f, "  key    = recovered {}", self.public_keys.join(", "))?
            }
            _ => writeln!(f, "  key    = -")?,
        }
        match &self.failure {
            None if self.valid => write!(f, "  result = valid"),
            None if self.is_unverified() => write!(f, "  result = unverified (no public key)"),
            None => write!(f, "  result = invalid"),
            Some(failure) => write!(f, "  result = invalid ({})", failure.message),
        }
    }
}

/// Totals over a batch of reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
    /// Records without a public key; see [`RecordReport::is_unverified`].
    pub unverified: usize,
    pub high_s: usize,
    pub low_s_mismatches: usize,
    pub decode_errors: usize,
    pub range_errors: usize,
    pub internal_errors: usize,
}

impl BatchSummary {
    pub fn record(&mut self, report: &RecordReport) {
        self.total += 1;
        if report.valid {
            self.valid += 1;
        } else if report.is_unverified() {
            self.unverified += 1;
        } else {
            self.invalid += 1;
        }
        if report.low_s == Some(false) {
            self.high_s += 1;
        }
        if report.low_s_mismatch() {
            self.low_s_mismatches += 1;
        }
        match report.failure_kind() {
            Some(FailureKind::Decode) => self.decode_errors += 1,
            Some(FailureKind::InvalidRange) => self.range_errors += 1,
            Some(FailureKind::Internal) => self.internal_errors += 1,
            _ => {}
        }
    }
}

impl<'a> FromIterator<&'a RecordReport> for BatchSummary {
    fn from_iter<I: IntoIterator<Item = &'a RecordReport>>(iter: I) -> Self {
        let mut summary = BatchSummary::default();
        for report in iter {
            summary.record(report);
        }
        summary
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records: {} valid, {} invalid, {} unverified, {} high-S",
            self.total, self.valid, self.invalid, self.unverified, self.high_s
        )?;
        if self.low_s_mismatches > 0 {
            write!(f, ", {} low-S mismatches", self.low_s_mismatches)?;
        }
        if self.internal_errors > 0 {
            write!(f, ", {} internal errors", self.internal_errors)?;
        }
        Ok(())
    }
}
