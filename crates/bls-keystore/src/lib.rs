//! # BLS Keystore
//!
//! Password-protected storage for BLS validator keys.
//!
//! ## Components
//!
//! | Module | Contents |
//! |--------|----------|
//! | `bls` | `PublicKey`, `SecretKey`, `Signature` as used by the keystore |
//! | `config` | Key directory and scrypt parameters |
//! | `crypto` | scrypt + XChaCha20-Poly1305 sealing |
//! | `keyfile` | JSON key file format |
//! | `store` | Directory-backed store with unlock/lock |
//!
//! ## Security Notes
//!
//! - Secret keys are only written encrypted; files are created `0600` on Unix
//! - The recorded public key is checked against the decrypted key
//! - Unlocked keys live in memory until `lock` or drop

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bls;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod keyfile;
pub mod store;

// Re-exports
pub use config::KeystoreConfig;
pub use errors::KeystoreError;
pub use keyfile::EncryptedKey;
pub use store::KeyStore;
