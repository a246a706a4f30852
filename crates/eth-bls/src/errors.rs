//! BLS error types.

use thiserror::Error;

/// Errors raised while parsing or combining BLS keys and signatures.
///
/// Verification outcomes are not errors: `verify` and friends return `bool`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlsError {
    /// Input has the wrong number of bytes for the type being decoded
    #[error("Invalid {kind} length: expected {expected}, got {actual}")]
    InvalidLength {
        /// What was being decoded
        kind: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// Secret key bytes are all zero
    #[error("Received secret key is zero")]
    ZeroSecretKey,

    /// Secret key bytes are not a canonical scalar
    #[error("Could not unmarshal bytes into secret key")]
    SecretUnmarshal,

    /// Public key is the point at infinity
    #[error("Received an infinite public key")]
    InfinitePublicKey,

    /// Public key bytes failed decompression or the subgroup check
    #[error("Could not unmarshal bytes into public key")]
    PublicKeyUnmarshal,

    /// Signature bytes failed decompression or the subgroup check
    #[error("Could not unmarshal bytes into signature")]
    SignatureUnmarshal,

    /// Key derivation from input keying material failed
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    /// Cannot aggregate an empty list
    #[error("Cannot aggregate an empty {0} list")]
    EmptyAggregation(&'static str),

    /// Point aggregation rejected one of its inputs
    #[error("BLS aggregation failed")]
    AggregationFailed,

    /// Parallel input slices differ in length
    #[error("Input length mismatch: {signatures} signatures, {messages} messages, {public_keys} public keys")]
    LengthMismatch {
        /// Number of signatures supplied
        signatures: usize,
        /// Number of messages supplied
        messages: usize,
        /// Number of public keys supplied
        public_keys: usize,
    },

    /// Extra-data payload exceeds the header limit
    #[error("Extra data too large: {size} bytes, maximum {max}")]
    ExtraDataTooLarge {
        /// Supplied size in bytes
        size: usize,
        /// Header limit in bytes
        max: usize,
    },

    /// Hex input could not be decoded
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for BlsError {
    fn from(err: hex::FromHexError) -> Self {
        BlsError::InvalidHex(err.to_string())
    }
}
