//! # Directory Key Store
//!
//! Manages a directory of encrypted key files, one per public key, named
//! `<pubkey-hex>.json`. Keys can be unlocked into memory for repeated
//! signing, or used once with a password.
//!
//! ## Thread Safety
//!
//! `KeyStore` is `Send + Sync`. The unlocked-key cache sits behind a
//! `parking_lot::RwLock`; file operations are not serialized, so two
//! processes sharing a directory must coordinate externally.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::bls::{PublicKey, SecretKey, Signature};
use crate::config::KeystoreConfig;
use crate::keyfile::EncryptedKey;
use crate::KeystoreError;

/// Password-protected BLS keys on disk.
pub struct KeyStore {
    config: KeystoreConfig,
    unlocked: RwLock<HashMap<PublicKey, SecretKey>>,
}

impl KeyStore {
    /// Open (creating if needed) the key directory named by `config`.
    pub fn open(config: KeystoreConfig) -> Result<Self, KeystoreError> {
        config.validate()?;
        fs::create_dir_all(&config.keys_dir)?;

        info!(keys_dir = %config.keys_dir.display(), "Opened BLS keystore");
        Ok(Self {
            config,
            unlocked: RwLock::new(HashMap::new()),
        })
    }

    /// The configuration this store was opened with.
    pub fn config(&self) -> &KeystoreConfig {
        &self.config
    }

    /// Generate a random key, store it encrypted and return its public key.
    pub fn new_key(&self, password: &str) -> Result<PublicKey, KeystoreError> {
        let secret = SecretKey::random()?;
        self.import_key(&secret, password)
    }

    /// Store an existing secret key.
    ///
    /// # Errors
    /// * `KeyExists` if a file for this public key is already present
    pub fn import_key(
        &self,
        secret: &SecretKey,
        password: &str,
    ) -> Result<PublicKey, KeystoreError> {
        let public = secret.public_key();
        let path = self.key_path(&public);
        if path.exists() {
            return Err(KeystoreError::KeyExists(short_id(&public)));
        }

        let encrypted = EncryptedKey::encrypt(secret, password, &self.config)?;
        encrypted.save(&path)?;

        info!(pubkey = %short_id(&public), id = %encrypted.id, "Stored BLS key");
        Ok(public)
    }

    /// Public keys of every readable key file, sorted by encoding.
    ///
    /// Files that fail to parse are skipped with a warning.
    pub fn accounts(&self) -> Result<Vec<PublicKey>, KeystoreError> {
        let mut accounts = Vec::new();

        for entry in fs::read_dir(&self.config.keys_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            match EncryptedKey::load(&path).and_then(|key| key.public_key()) {
                Ok(public) => accounts.push(public),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable key file"),
            }
        }

        accounts.sort_by_key(|pk| pk.marshal());
        debug!(count = accounts.len(), "Listed keystore accounts");
        Ok(accounts)
    }

    /// Whether a key file exists for `public`.
    pub fn has_key(&self, public: &PublicKey) -> bool {
        self.key_path(public).exists()
    }

    /// Decrypt a key from disk without caching it.
    pub fn export_key(
        &self,
        public: &PublicKey,
        password: &str,
    ) -> Result<SecretKey, KeystoreError> {
        let path = self.key_path(public);
        if !path.exists() {
            return Err(KeystoreError::KeyNotFound(short_id(public)));
        }
        EncryptedKey::load(&path)?.decrypt(password)
    }

    /// Decrypt a key and keep it in memory for [`KeyStore::sign`].
    pub fn unlock(&self, public: &PublicKey, password: &str) -> Result<(), KeystoreError> {
        let secret = self.export_key(public, password)?;
        self.unlocked.write().insert(public.clone(), secret);

        info!(pubkey = %short_id(public), "Unlocked BLS key");
        Ok(())
    }

    /// Drop an unlocked key from memory. Returns whether it was unlocked.
    pub fn lock(&self, public: &PublicKey) -> bool {
        let removed = self.unlocked.write().remove(public).is_some();
        if removed {
            info!(pubkey = %short_id(public), "Locked BLS key");
        }
        removed
    }

    /// Whether `public` is currently unlocked.
    pub fn is_unlocked(&self, public: &PublicKey) -> bool {
        self.unlocked.read().contains_key(public)
    }

    /// Sign with an unlocked key.
    ///
    /// # Errors
    /// * `KeyLocked` if the key has not been unlocked
    pub fn sign(&self, public: &PublicKey, message: &[u8]) -> Result<Signature, KeystoreError> {
        let unlocked = self.unlocked.read();
        let secret = unlocked
            .get(public)
            .ok_or_else(|| KeystoreError::KeyLocked(short_id(public)))?;
        Ok(secret.sign(message))
    }

    /// Decrypt, sign once and discard the key.
    pub fn sign_with_password(
        &self,
        public: &PublicKey,
        password: &str,
        message: &[u8],
    ) -> Result<Signature, KeystoreError> {
        let secret = self.export_key(public, password)?;
        Ok(secret.sign(message))
    }

    /// Delete a key file. The password must decrypt it first.
    pub fn delete_key(&self, public: &PublicKey, password: &str) -> Result<(), KeystoreError> {
        self.export_key(public, password)?;
        fs::remove_file(self.key_path(public))?;
        self.unlocked.write().remove(public);

        info!(pubkey = %short_id(public), "Deleted BLS key");
        Ok(())
    }

    fn key_path(&self, public: &PublicKey) -> PathBuf {
        self.config
            .keys_dir
            .join(format!("{}.json", hex::encode(public.marshal())))
    }
}

/// First 8 bytes of the public key, for logs and error messages.
fn short_id(public: &PublicKey) -> String {
    format!("0x{}", hex::encode(&public.marshal()[..8]))
}
