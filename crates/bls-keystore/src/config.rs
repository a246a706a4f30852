//! Keystore configuration.
//!
//! # Example
//!
//! ```ignore
//! use bls_keystore::KeystoreConfig;
//!
//! let config = KeystoreConfig::default()
//!     .with_keys_dir("/var/lib/validator/keys")
//!     .with_scrypt(14, 8, 1);
//! config.validate().expect("Valid config");
//! ```

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::KeystoreError;

/// Largest accepted scrypt `log2(N)`. N = 2^20 already needs 1 GiB at r = 8.
const MAX_SCRYPT_LOG_N: u8 = 20;

/// Largest accepted scrypt parallelism.
const MAX_SCRYPT_P: u32 = 16;

/// Memory ceiling for one derivation, `128 * r * N` bytes.
const MAX_SCRYPT_MEMORY: u64 = 1 << 30;

/// Bounds shared by configuration and key files read from disk.
pub(crate) fn check_scrypt_params(log_n: u8, r: u32, p: u32) -> Result<(), String> {
    if log_n == 0 || log_n > MAX_SCRYPT_LOG_N {
        return Err(format!(
            "scrypt_log_n must be between 1 and {}, got {}",
            MAX_SCRYPT_LOG_N, log_n
        ));
    }

    if r == 0 {
        return Err("scrypt_r cannot be 0".to_string());
    }

    if p == 0 || p > MAX_SCRYPT_P {
        return Err(format!(
            "scrypt_p must be between 1 and {}, got {}",
            MAX_SCRYPT_P, p
        ));
    }

    let memory = (r as u64) << (log_n as u32 + 7);
    if memory > MAX_SCRYPT_MEMORY {
        return Err(format!(
            "scrypt parameters need {} bytes, limit is {}",
            memory, MAX_SCRYPT_MEMORY
        ));
    }

    Ok(())
}

/// Keystore location and key file encryption parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeystoreConfig {
    /// Directory holding one JSON file per key
    pub keys_dir: PathBuf,
    /// scrypt log2(N) cost parameter
    pub scrypt_log_n: u8,
    /// scrypt block size
    pub scrypt_r: u32,
    /// scrypt parallelism
    pub scrypt_p: u32,
}

impl Default for KeystoreConfig {
    fn default() -> Self {
        Self {
            keys_dir: PathBuf::from("keystore"),
            scrypt_log_n: 13, // N=8192
            scrypt_r: 8,
            scrypt_p: 1,
        }
    }
}

impl KeystoreConfig {
    /// Cheap KDF parameters for tests and local development.
    ///
    /// Keys written with these settings are trivially brute-forced.
    pub fn light() -> Self {
        Self {
            scrypt_log_n: 4,
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BLS_KEYSTORE_DIR`: Key directory (default: keystore)
    /// - `BLS_SCRYPT_LOG_N`: scrypt log2(N) (default: 13)
    /// - `BLS_SCRYPT_R`: scrypt r (default: 8)
    /// - `BLS_SCRYPT_P`: scrypt p (default: 1)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            keys_dir: env::var("BLS_KEYSTORE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.keys_dir),

            scrypt_log_n: env::var("BLS_SCRYPT_LOG_N")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.scrypt_log_n),

            scrypt_r: env::var("BLS_SCRYPT_R")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.scrypt_r),

            scrypt_p: env::var("BLS_SCRYPT_P")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.scrypt_p),
        }
    }

    /// Validate the KDF parameters.
    pub fn validate(&self) -> Result<(), KeystoreError> {
        check_scrypt_params(self.scrypt_log_n, self.scrypt_r, self.scrypt_p)
            .map_err(KeystoreError::InvalidConfig)
    }

    /// Builder-style method to set the key directory
    pub fn with_keys_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.keys_dir = dir.into();
        self
    }

    /// Builder-style method to set the scrypt parameters
    pub fn with_scrypt(mut self, log_n: u8, r: u32, p: u32) -> Self {
        self.scrypt_log_n = log_n;
        self.scrypt_r = r;
        self.scrypt_p = p;
        self
    }
}
