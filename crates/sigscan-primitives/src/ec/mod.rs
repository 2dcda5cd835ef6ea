/// Elliptic curve cryptography on secp256k1.
///
/// Provides the curve parameters, public keys and ECDSA signatures.

pub mod curve;
pub mod public_key;
pub mod signature;

pub use curve::CurveParams;
pub use public_key::PublicKey;
pub use signature::{is_low_s, Signature};
