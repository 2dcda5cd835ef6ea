#![deny(missing_docs)]

//! sigscan - secp256k1 ECDSA signature checker.
//!
//! Re-exports the sigscan components for convenient single-crate usage.

pub use sigscan_primitives as primitives;
pub use sigscan_verifier as verifier;
