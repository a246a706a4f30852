//! # BLS Public Keys
//!
//! G1 points, 48 bytes compressed. Every key parsed from bytes has passed
//! the subgroup check and is not the point at infinity, so verification
//! can skip re-validating it.

use blst::min_pk::{self, AggregatePublicKey};
use blst::BLST_ERROR;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bytesutil::decode_hex;
use crate::common::{self, INFINITE_PUBLIC_KEY, PUBLIC_KEY_LENGTH};
use crate::BlsError;

/// BLS public key backed by `blst`.
#[derive(Clone)]
pub struct PublicKey(min_pk::PublicKey);

impl PublicKey {
    pub(crate) fn from_blst(inner: min_pk::PublicKey) -> Self {
        Self(inner)
    }

    pub(crate) fn as_blst(&self) -> &min_pk::PublicKey {
        &self.0
    }

    /// Parse and validate a compressed public key.
    ///
    /// # Errors
    /// * `InvalidLength` if `bytes` is not 48 bytes long
    /// * `InfinitePublicKey` if `bytes` encodes the point at infinity
    /// * `PublicKeyUnmarshal` if decompression or the subgroup check fails
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(BlsError::InvalidLength {
                kind: "public key",
                expected: PUBLIC_KEY_LENGTH,
                actual: bytes.len(),
            });
        }
        if bytes == INFINITE_PUBLIC_KEY {
            return Err(BlsError::InfinitePublicKey);
        }
        min_pk::PublicKey::key_validate(bytes)
            .map(PublicKey)
            .map_err(|e| match e {
                BLST_ERROR::BLST_PK_IS_INFINITY => BlsError::InfinitePublicKey,
                _ => BlsError::PublicKeyUnmarshal,
            })
    }

    /// Parse a public key from hex, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, BlsError> {
        Self::from_bytes(&decode_hex(input)?)
    }

    /// Serialize to the compressed 48-byte form.
    pub fn marshal(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// Independent copy of this key.
    pub fn copy(&self) -> PublicKey {
        self.clone()
    }

    /// Add `other` to this key in place.
    pub fn aggregate(&mut self, other: &PublicKey) -> &mut Self {
        // Both inputs were validated on construction.
        let result = AggregatePublicKey::aggregate(&[&self.0, &other.0], false);
        match result {
            Ok(sum) => self.0 = sum.to_public_key(),
            Err(e) => tracing::warn!(error = ?e, "public key aggregation rejected input"),
        }
        self
    }

    /// Whether this key is the point at infinity.
    ///
    /// Parsed keys never are; an aggregate of `P` and `-P` is.
    pub fn is_infinite(&self) -> bool {
        self.marshal() == INFINITE_PUBLIC_KEY
    }

    /// Compare by compressed encoding.
    pub fn equals(&self, other: &PublicKey) -> bool {
        self.marshal() == other.marshal()
    }
}

/// Parse each compressed key and sum them.
///
/// # Errors
/// * `EmptyAggregation` if `keys` is empty
/// * Any error from [`PublicKey::from_bytes`] for the first bad key
pub fn aggregate_public_keys(keys: &[&[u8]]) -> Result<PublicKey, BlsError> {
    if keys.is_empty() {
        return Err(BlsError::EmptyAggregation("public key"));
    }

    let parsed = keys
        .iter()
        .map(|bytes| PublicKey::from_bytes(bytes))
        .collect::<Result<Vec<_>, _>>()?;
    let refs: Vec<&min_pk::PublicKey> = parsed.iter().map(|pk| &pk.0).collect();

    AggregatePublicKey::aggregate(&refs, false)
        .map(|agg| PublicKey(agg.to_public_key()))
        .map_err(|_| BlsError::AggregationFailed)
}

impl common::BlsPublicKey for PublicKey {
    fn marshal(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        PublicKey::marshal(self)
    }

    fn aggregate(&mut self, other: &Self) -> &mut Self {
        PublicKey::aggregate(self, other)
    }

    fn is_infinite(&self) -> bool {
        PublicKey::is_infinite(self)
    }

    fn equals(&self, other: &Self) -> bool {
        PublicKey::equals(self, other)
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for PublicKey {}

impl std::hash::Hash for PublicKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.marshal().hash(state);
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.marshal();
        write!(f, "PublicKey(0x{}..)", hex::encode(&bytes[..8]))
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.marshal()))
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.marshal())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}
