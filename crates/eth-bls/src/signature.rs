//! # BLS Signatures
//!
//! G2 points, 96 bytes compressed, produced under the proof-of-possession
//! DST. Verification returns `bool`: a signature that does not verify is a
//! normal outcome, not an error.
//!
//! ## Verification Modes
//!
//! | Function | Keys | Messages |
//! |----------|------|----------|
//! | `verify` | 1 | 1 |
//! | `aggregate_verify` | n | n distinct |
//! | `fast_aggregate_verify` | n | 1 shared |
//! | `eth2_fast_aggregate_verify` | n ≥ 0 | 1 shared |

use blst::min_pk::{self, AggregateSignature};
use blst::BLST_ERROR;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bytesutil::decode_hex;
use crate::common::{self, DST, INFINITE_SIGNATURE, SIGNATURE_LENGTH};
use crate::{BlsError, PublicKey};

/// BLS signature backed by `blst`.
#[derive(Clone)]
pub struct Signature(min_pk::Signature);

impl Signature {
    pub(crate) fn from_blst(inner: min_pk::Signature) -> Self {
        Self(inner)
    }

    pub(crate) fn as_blst(&self) -> &min_pk::Signature {
        &self.0
    }

    /// Parse a compressed signature and run the subgroup check.
    ///
    /// The point at infinity is accepted.
    ///
    /// # Errors
    /// * `InvalidLength` if `bytes` is not 96 bytes long
    /// * `SignatureUnmarshal` if decompression or the subgroup check fails
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        check_length(bytes)?;
        min_pk::Signature::sig_validate(bytes, false)
            .map(Signature)
            .map_err(|_| BlsError::SignatureUnmarshal)
    }

    /// Parse a compressed signature without the subgroup check.
    ///
    /// Only for signatures from a trusted source; `verify` still group-checks.
    pub fn from_bytes_no_validation(bytes: &[u8]) -> Result<Self, BlsError> {
        check_length(bytes)?;
        min_pk::Signature::from_bytes(bytes)
            .map(Signature)
            .map_err(|_| BlsError::SignatureUnmarshal)
    }

    /// Parse a signature from hex, with or without a `0x` prefix.
    pub fn from_hex(input: &str) -> Result<Self, BlsError> {
        Self::from_bytes(&decode_hex(input)?)
    }

    /// The point at infinity, the identity for aggregation.
    pub fn infinity() -> Result<Self, BlsError> {
        min_pk::Signature::from_bytes(&INFINITE_SIGNATURE)
            .map(Signature)
            .map_err(|_| BlsError::SignatureUnmarshal)
    }

    /// Verify against a single public key.
    pub fn verify(&self, public_key: &PublicKey, message: &[u8]) -> bool {
        let result = self
            .0
            .verify(true, message, DST, &[], public_key.as_blst(), false);
        result == BLST_ERROR::BLST_SUCCESS
    }

    /// Verify an aggregate where key `i` signed message `i`.
    ///
    /// Returns `false` when the slices are empty or differ in length.
    pub fn aggregate_verify(&self, public_keys: &[PublicKey], messages: &[[u8; 32]]) -> bool {
        if public_keys.is_empty() || public_keys.len() != messages.len() {
            return false;
        }

        let pks: Vec<&min_pk::PublicKey> = public_keys.iter().map(PublicKey::as_blst).collect();
        let msgs: Vec<&[u8]> = messages.iter().map(|m| m.as_slice()).collect();

        let result = self.0.aggregate_verify(true, &msgs, DST, &pks, false);
        result == BLST_ERROR::BLST_SUCCESS
    }

    /// Verify an aggregate where every key signed `message`.
    ///
    /// Returns `false` for an empty key set.
    pub fn fast_aggregate_verify(&self, public_keys: &[PublicKey], message: &[u8; 32]) -> bool {
        if public_keys.is_empty() {
            return false;
        }

        let pks: Vec<&min_pk::PublicKey> = public_keys.iter().map(PublicKey::as_blst).collect();
        let result = self.0.fast_aggregate_verify(true, message, DST, &pks);
        result == BLST_ERROR::BLST_SUCCESS
    }

    /// Ethereum consensus variant of [`Signature::fast_aggregate_verify`]:
    /// no keys plus the infinity signature verifies.
    pub fn eth2_fast_aggregate_verify(&self, public_keys: &[PublicKey], message: &[u8; 32]) -> bool {
        if public_keys.is_empty() && self.is_infinite() {
            return true;
        }
        self.fast_aggregate_verify(public_keys, message)
    }

    /// Serialize to the compressed 96-byte form.
    pub fn marshal(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0.to_bytes()
    }

    /// Independent copy of this signature.
    pub fn copy(&self) -> Signature {
        self.clone()
    }

    /// Whether this is the point at infinity.
    pub fn is_infinite(&self) -> bool {
        self.marshal() == INFINITE_SIGNATURE
    }
}

fn check_length(bytes: &[u8]) -> Result<(), BlsError> {
    if bytes.len() != SIGNATURE_LENGTH {
        return Err(BlsError::InvalidLength {
            kind: "signature",
            expected: SIGNATURE_LENGTH,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Sum signatures into one aggregate.
///
/// Returns `None` for an empty input.
pub fn aggregate_signatures(signatures: &[Signature]) -> Option<Signature> {
    if signatures.is_empty() {
        return None;
    }

    let refs: Vec<&min_pk::Signature> = signatures.iter().map(|s| &s.0).collect();
    match AggregateSignature::aggregate(&refs, false) {
        Ok(agg) => Some(Signature(agg.to_signature())),
        Err(e) => {
            tracing::debug!(error = ?e, count = signatures.len(), "signature aggregation failed");
            None
        }
    }
}

/// Parse compressed signatures and sum them.
///
/// Returns `Ok(None)` for an empty input.
///
/// # Errors
/// * Any error from [`Signature::from_bytes`] for the first bad signature
pub fn aggregate_compressed_signatures(
    signatures: &[&[u8]],
) -> Result<Option<Signature>, BlsError> {
    let parsed = signatures
        .iter()
        .map(|bytes| Signature::from_bytes(bytes))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(aggregate_signatures(&parsed))
}

impl common::BlsSignature for Signature {
    type PublicKey = PublicKey;

    fn verify(&self, public_key: &PublicKey, message: &[u8]) -> bool {
        Signature::verify(self, public_key, message)
    }

    fn aggregate_verify(&self, public_keys: &[PublicKey], messages: &[[u8; 32]]) -> bool {
        Signature::aggregate_verify(self, public_keys, messages)
    }

    fn fast_aggregate_verify(&self, public_keys: &[PublicKey], message: &[u8; 32]) -> bool {
        Signature::fast_aggregate_verify(self, public_keys, message)
    }

    fn eth2_fast_aggregate_verify(&self, public_keys: &[PublicKey], message: &[u8; 32]) -> bool {
        Signature::eth2_fast_aggregate_verify(self, public_keys, message)
    }

    fn marshal(&self) -> [u8; SIGNATURE_LENGTH] {
        Signature::marshal(self)
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.marshal() == other.marshal()
    }
}

impl Eq for Signature {}

impl std::hash::Hash for Signature {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.marshal().hash(state);
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bytes = self.marshal();
        write!(f, "Signature(0x{}..)", hex::encode(&bytes[..8]))
    }
}

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.marshal()))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.marshal())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes: Vec<u8> = Deserialize::deserialize(deserializer)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}
