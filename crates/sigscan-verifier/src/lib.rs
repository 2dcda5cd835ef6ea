//! ECDSA (secp256k1) signature verification and low-S checks.
//!
//! [`Verifier`] checks a signature `(r, s)` over a digest `z` against a
//! public key, or recovers the keys it is valid for. Records describe one
//! signature each with hex fields; [`Verifier::verify_batch`] walks a slice
//! of them lazily and yields a [`RecordReport`] per record, never stopping
//! on a bad one.

pub mod batch;
pub mod config;
pub mod record;
pub mod report;
pub mod sample;
pub mod verifier;

mod error;
pub use error::VerifierError;

pub use batch::BatchIter;
pub use config::VerifierConfig;
pub use record::{DigestSource, SignatureRecord};
pub use report::{BatchSummary, Failure, FailureKind, KeySource, RecordReport};
pub use verifier::Verifier;

pub use sigscan_primitives::hash::digest_from_identifier;
