//! # BLS Secret Keys
//!
//! Scalars in the BLS12-381 scalar field, serialized as 32 big-endian bytes.
//!
//! ## Security Notes
//!
//! - The all-zero scalar is rejected on parse and never generated
//! - `Debug` prints the derived public key, never the scalar
//! - Intermediate byte copies are zeroized before they go out of scope

use blst::min_pk;
use rand::RngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::bytesutil::{decode_hex, is_zero};
use crate::common::{self, DST, SECRET_KEY_LENGTH};
use crate::{BlsError, PublicKey, Signature};

/// BLS secret key backed by `blst`.
#[derive(Clone)]
pub struct SecretKey(min_pk::SecretKey);

impl SecretKey {
    /// Generate a new random key from 32 bytes of OS entropy.
    ///
    /// The entropy is used as input keying material for EIP-2333 `KeyGen`.
    pub fn random() -> Result<Self, BlsError> {
        loop {
            let mut ikm = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut ikm);
            let result = Self::key_gen(&ikm);
            ikm.zeroize();

            let key = result?;
            if !key.is_zero() {
                return Ok(key);
            }
        }
    }

    /// Derive a key deterministically from input keying material.
    ///
    /// Unlike [`SecretKey::from_bytes`], any IKM of at least 32 bytes
    /// produces a valid key.
    pub fn key_gen(ikm: &[u8]) -> Result<Self, BlsError> {
        if ikm.len() < SECRET_KEY_LENGTH {
            return Err(BlsError::KeyGeneration(format!(
                "input keying material must be at least {} bytes, got {}",
                SECRET_KEY_LENGTH,
                ikm.len()
            )));
        }
        min_pk::SecretKey::key_gen(ikm, &[])
            .map(SecretKey)
            .map_err(|e| BlsError::KeyGeneration(format!("{:?}", e)))
    }

    /// Parse a key from its 32-byte big-endian encoding.
    ///
    /// # Errors
    /// * `InvalidLength` if `bytes` is not 32 bytes long
    /// * `ZeroSecretKey` if every byte is zero
    /// * `SecretUnmarshal` if the scalar is not below the group order
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(BlsError::InvalidLength {
                kind: "secret key",
                expected: SECRET_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        if is_zero(bytes) {
            return Err(BlsError::ZeroSecretKey);
        }
        min_pk::SecretKey::from_bytes(bytes)
            .map(SecretKey)
            .map_err(|_| BlsError::SecretUnmarshal)
    }

    /// Parse a key from hex, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, BlsError> {
        let mut bytes = decode_hex(input)?;
        let result = Self::from_bytes(&bytes);
        bytes.zeroize();
        result
    }

    /// Serialize to 32 big-endian bytes.
    pub fn marshal(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// Derive the public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_blst(self.0.sk_to_pk())
    }

    /// Sign a message under the proof-of-possession DST.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::from_blst(self.0.sign(message, DST, &[]))
    }

    fn is_zero(&self) -> bool {
        let mut bytes = self.marshal();
        let zero = is_zero(&bytes);
        bytes.zeroize();
        zero
    }
}

impl common::BlsSecretKey for SecretKey {
    type PublicKey = PublicKey;
    type Signature = Signature;

    fn public_key(&self) -> PublicKey {
        SecretKey::public_key(self)
    }

    fn sign(&self, message: &[u8]) -> Signature {
        SecretKey::sign(self, message)
    }

    fn marshal(&self) -> [u8; SECRET_KEY_LENGTH] {
        SecretKey::marshal(self)
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.marshal();
        let mut b = other.marshal();
        let equal: bool = a.ct_eq(&b).into();
        a.zeroize();
        b.zeroize();
        equal
    }
}

impl Eq for SecretKey {}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretKey")
            .field("public_key", &self.public_key())
            .finish()
    }
}
