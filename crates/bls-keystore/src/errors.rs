//! Keystore error types.

use eth_bls::BlsError;
use thiserror::Error;

/// Keystore operation errors.
#[derive(Debug, Error)]
pub enum KeystoreError {
    /// Underlying BLS operation failed
    #[error("BLS error: {0}")]
    Bls(#[from] BlsError),

    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key file is not valid JSON for the expected schema
    #[error("Malformed key file: {0}")]
    Json(#[from] serde_json::Error),

    /// A hex field in the key file could not be decoded
    #[error("Invalid hex in key file: {0}")]
    Hex(#[from] hex::FromHexError),

    /// No key file exists for the requested public key
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// A key file for this public key already exists
    #[error("Key already exists: {0}")]
    KeyExists(String),

    /// Key is not unlocked in memory
    #[error("Key is locked: {0}")]
    KeyLocked(String),

    /// Wrong password or corrupted ciphertext
    #[error("Decryption failed: wrong password or corrupted key file")]
    DecryptionFailed,

    /// Encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decrypted key does not match the public key recorded in the file
    #[error("Public key mismatch in key file {0}")]
    PublicKeyMismatch(String),

    /// Key derivation function failed or was given bad parameters
    #[error("KDF error: {0}")]
    Kdf(String),

    /// Key file version is not supported
    #[error("Unsupported key file version {0}")]
    UnsupportedVersion(u32),

    /// Key file names an unsupported KDF or cipher
    #[error("Unsupported {field}: {value}")]
    UnsupportedAlgorithm {
        /// Which field held the value
        field: &'static str,
        /// The unsupported value
        value: String,
    },

    /// Configuration is outside accepted bounds
    #[error("Invalid keystore configuration: {0}")]
    InvalidConfig(String),
}
