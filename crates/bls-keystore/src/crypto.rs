//! # Key File Encryption
//!
//! Password-based encryption for secret key material:
//! scrypt derives a 256-bit key, XChaCha20-Poly1305 seals the payload.
//!
//! ## Security Properties
//!
//! - **XChaCha20**: 192-bit random nonce, constant-time ARX design
//! - **Poly1305 tag**: wrong passwords and tampering fail identically
//! - Derived keys and plaintexts are zeroized on drop

use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305, XNonce,
};
use rand::RngCore;
use scrypt::Params as ScryptParams;
use zeroize::{Zeroize, Zeroizing};

use crate::config::check_scrypt_params;
use crate::KeystoreError;

/// Salt length in bytes.
pub const SALT_LENGTH: usize = 32;

/// Nonce length in bytes (XChaCha20).
pub const NONCE_LENGTH: usize = 24;

/// Symmetric key derived from a password.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey([u8; 32]);

impl DerivedKey {
    /// Run scrypt over `password` and `salt`.
    pub fn derive(
        password: &str,
        salt: &[u8],
        log_n: u8,
        r: u32,
        p: u32,
    ) -> Result<Self, KeystoreError> {
        check_scrypt_params(log_n, r, p).map_err(KeystoreError::Kdf)?;
        let params = ScryptParams::new(log_n, r, p, 32)
            .map_err(|e| KeystoreError::Kdf(format!("scrypt params: {e}")))?;

        let mut key = [0u8; 32];
        scrypt::scrypt(password.as_bytes(), salt, &params, &mut key)
            .map_err(|e| KeystoreError::Kdf(format!("scrypt: {e}")))?;
        Ok(Self(key))
    }

    fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Fresh random salt.
pub fn random_salt() -> [u8; SALT_LENGTH] {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Encrypt plaintext under a derived key.
///
/// Returns (ciphertext, nonce).
pub fn encrypt(
    key: &DerivedKey,
    plaintext: &[u8],
) -> Result<(Vec<u8>, [u8; NONCE_LENGTH]), KeystoreError> {
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());
    let mut nonce = [0u8; NONCE_LENGTH];
    rand::thread_rng().fill_bytes(&mut nonce);

    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|e| KeystoreError::EncryptionFailed(e.to_string()))?;

    Ok((ciphertext, nonce))
}

/// Decrypt ciphertext under a derived key.
///
/// # Errors
///
/// Returns `KeystoreError::DecryptionFailed` if the tag does not verify.
pub fn decrypt(
    key: &DerivedKey,
    ciphertext: &[u8],
    nonce: &[u8],
) -> Result<Zeroizing<Vec<u8>>, KeystoreError> {
    if nonce.len() != NONCE_LENGTH {
        return Err(KeystoreError::DecryptionFailed);
    }
    let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| KeystoreError::DecryptionFailed)
}
