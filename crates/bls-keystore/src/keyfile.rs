//! # Encrypted Key Files
//!
//! One JSON document per BLS secret key.
//!
//! ## Format
//!
//! ```text
//! {
//!   "version": 1,
//!   "id": "<uuid v4>",
//!   "pubkey": "<48-byte compressed public key, hex>",
//!   "crypto": {
//!     "kdf": "scrypt",
//!     "kdfparams": { "log_n": 13, "r": 8, "p": 1, "salt": "<hex>" },
//!     "cipher": "xchacha20-poly1305",
//!     "nonce": "<hex>",
//!     "ciphertext": "<hex, 32-byte key + 16-byte tag>"
//!   }
//! }
//! ```
//!
//! The public key is stored in clear so a store can list its accounts
//! without any password.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bls::{PublicKey, SecretKey};
use crate::config::{check_scrypt_params, KeystoreConfig};
use crate::crypto::{self, DerivedKey};
use crate::KeystoreError;

/// Current key file version.
pub const KEY_FILE_VERSION: u32 = 1;

const KDF_SCRYPT: &str = "scrypt";
const CIPHER_XCHACHA: &str = "xchacha20-poly1305";

/// scrypt parameters recorded alongside the ciphertext.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// log2(N)
    pub log_n: u8,
    /// Block size
    pub r: u32,
    /// Parallelism
    pub p: u32,
    /// Salt (hex)
    pub salt: String,
}

/// Encryption section of a key file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CryptoSection {
    /// KDF name
    pub kdf: String,
    /// KDF parameters
    pub kdfparams: KdfParams,
    /// Cipher name
    pub cipher: String,
    /// Cipher nonce (hex)
    pub nonce: String,
    /// Sealed secret key (hex)
    pub ciphertext: String,
}

/// A BLS secret key encrypted under a password.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedKey {
    /// Format version
    pub version: u32,
    /// Random identifier, stable across re-encryption
    pub id: Uuid,
    /// Compressed public key (hex, no prefix)
    pub pubkey: String,
    /// Encryption parameters and payload
    pub crypto: CryptoSection,
}

impl EncryptedKey {
    /// Encrypt `secret` with `password` using the KDF settings in `config`.
    pub fn encrypt(
        secret: &SecretKey,
        password: &str,
        config: &KeystoreConfig,
    ) -> Result<Self, KeystoreError> {
        config.validate()?;

        let salt = crypto::random_salt();
        let derived = DerivedKey::derive(
            password,
            &salt,
            config.scrypt_log_n,
            config.scrypt_r,
            config.scrypt_p,
        )?;

        let mut plaintext = secret.marshal();
        let sealed = crypto::encrypt(&derived, &plaintext);
        zeroize::Zeroize::zeroize(&mut plaintext);
        let (ciphertext, nonce) = sealed?;

        Ok(Self {
            version: KEY_FILE_VERSION,
            id: Uuid::new_v4(),
            pubkey: hex::encode(secret.public_key().marshal()),
            crypto: CryptoSection {
                kdf: KDF_SCRYPT.to_string(),
                kdfparams: KdfParams {
                    log_n: config.scrypt_log_n,
                    r: config.scrypt_r,
                    p: config.scrypt_p,
                    salt: hex::encode(salt),
                },
                cipher: CIPHER_XCHACHA.to_string(),
                nonce: hex::encode(nonce),
                ciphertext: hex::encode(ciphertext),
            },
        })
    }

    /// Decrypt with `password`.
    ///
    /// # Errors
    /// * `DecryptionFailed` for a wrong password or tampered file
    /// * `PublicKeyMismatch` if the recovered key is not the recorded one
    pub fn decrypt(&self, password: &str) -> Result<SecretKey, KeystoreError> {
        self.check_header()?;

        let params = &self.crypto.kdfparams;
        let salt = hex::decode(&params.salt)?;
        let nonce = hex::decode(&self.crypto.nonce)?;
        let ciphertext = hex::decode(&self.crypto.ciphertext)?;

        let derived = DerivedKey::derive(password, &salt, params.log_n, params.r, params.p)?;
        let plaintext = crypto::decrypt(&derived, &ciphertext, &nonce)?;
        let secret = SecretKey::from_bytes(&plaintext)?;

        if secret.public_key() != self.public_key()? {
            return Err(KeystoreError::PublicKeyMismatch(self.id.to_string()));
        }
        Ok(secret)
    }

    /// The recorded public key.
    pub fn public_key(&self) -> Result<PublicKey, KeystoreError> {
        Ok(PublicKey::from_hex(&self.pubkey)?)
    }

    /// Write the key file, replacing any existing file atomically.
    pub fn save(&self, path: &Path) -> Result<(), KeystoreError> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        {
            let mut file = create_private(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Read and parse a key file.
    pub fn load(path: &Path) -> Result<Self, KeystoreError> {
        let json = fs::read_to_string(path)?;
        let key: EncryptedKey = serde_json::from_str(&json)?;
        key.check_header()?;
        Ok(key)
    }

    fn check_header(&self) -> Result<(), KeystoreError> {
        if self.version != KEY_FILE_VERSION {
            return Err(KeystoreError::UnsupportedVersion(self.version));
        }
        if self.crypto.kdf != KDF_SCRYPT {
            return Err(KeystoreError::UnsupportedAlgorithm {
                field: "kdf",
                value: self.crypto.kdf.clone(),
            });
        }
        if self.crypto.cipher != CIPHER_XCHACHA {
            return Err(KeystoreError::UnsupportedAlgorithm {
                field: "cipher",
                value: self.crypto.cipher.clone(),
            });
        }
        let params = &self.crypto.kdfparams;
        check_scrypt_params(params.log_n, params.r, params.p).map_err(KeystoreError::Kdf)
    }
}

/// Create (or truncate) `path`, readable by the owner only from the start.
fn create_private(path: &Path) -> Result<File, KeystoreError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    Ok(options.open(path)?)
}
