//! # Header Extra-Data Key Carriage
//!
//! Moves a marshalled BLS secret key through a block header's `extra_data`
//! field and back.
//!
//! ## Format
//!
//! ```text
//! extra_data = [32B big-endian secret key scalar]
//! ```
//!
//! Readers normalize the field with [`to_bytes32`] before parsing, so a
//! shorter field is zero-padded and anything past 32 bytes is ignored.

use crate::bytesutil::to_bytes32;
use crate::common::SECRET_KEY_LENGTH;
use crate::{BlsError, SecretKey};

/// Maximum header `extra_data` size accepted by Ethereum consensus rules.
pub const MAX_EXTRA_DATA_SIZE: usize = 32;

/// Reject payloads that would not fit in a header.
pub fn validate_extra_data(extra: &[u8]) -> Result<(), BlsError> {
    if extra.len() > MAX_EXTRA_DATA_SIZE {
        return Err(BlsError::ExtraDataTooLarge {
            size: extra.len(),
            max: MAX_EXTRA_DATA_SIZE,
        });
    }
    Ok(())
}

/// Encode a secret key as header extra data.
pub fn encode_secret_key(key: &SecretKey) -> Result<Vec<u8>, BlsError> {
    let bytes = key.marshal().to_vec();
    validate_extra_data(&bytes)?;
    Ok(bytes)
}

/// Recover a secret key from header extra data.
///
/// # Errors
/// * `ZeroSecretKey` if the field is empty or all zero
/// * `SecretUnmarshal` if the leading 32 bytes are not a valid scalar
pub fn secret_key_from_extra_data(extra: &[u8]) -> Result<SecretKey, BlsError> {
    if extra.len() > SECRET_KEY_LENGTH {
        tracing::debug!(
            len = extra.len(),
            "extra data longer than a secret key, trailing bytes ignored"
        );
    }
    let b32 = to_bytes32(extra);
    SecretKey::from_bytes(&b32)
}
