//! # Common BLS Definitions
//!
//! Sizes, the domain separation tag and the three interfaces every backend
//! implements. Callers that want to stay backend-agnostic program against
//! the traits here; everyone else uses the concrete types re-exported from
//! the crate root.
//!
//! ## Ciphersuite
//!
//! - Public keys on G1 (48 bytes compressed)
//! - Signatures on G2 (96 bytes compressed)
//! - Proof-of-possession scheme, as used by Ethereum consensus

/// Secret key size in bytes (big-endian scalar).
pub const SECRET_KEY_LENGTH: usize = 32;

/// Compressed G1 public key size in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 48;

/// Compressed G2 signature size in bytes.
pub const SIGNATURE_LENGTH: usize = 96;

/// Domain separation tag for the Ethereum proof-of-possession ciphersuite.
pub const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Compressed encoding of the G1 point at infinity.
pub const INFINITE_PUBLIC_KEY: [u8; PUBLIC_KEY_LENGTH] = {
    let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
    bytes[0] = 0xC0;
    bytes
};

/// Compressed encoding of the G2 point at infinity.
pub const INFINITE_SIGNATURE: [u8; SIGNATURE_LENGTH] = {
    let mut bytes = [0u8; SIGNATURE_LENGTH];
    bytes[0] = 0xC0;
    bytes
};

/// All-zero secret key bytes. Never a valid key.
pub const ZERO_SECRET_KEY: [u8; SECRET_KEY_LENGTH] = [0u8; SECRET_KEY_LENGTH];

/// A BLS secret key.
pub trait BlsSecretKey {
    /// Public key type produced by this secret key.
    type PublicKey: BlsPublicKey;
    /// Signature type produced by this secret key.
    type Signature: BlsSignature<PublicKey = Self::PublicKey>;

    /// Derive the public key.
    fn public_key(&self) -> Self::PublicKey;

    /// Sign a message under [`DST`].
    fn sign(&self, message: &[u8]) -> Self::Signature;

    /// Serialize to 32 big-endian bytes.
    fn marshal(&self) -> [u8; SECRET_KEY_LENGTH];
}

/// A BLS public key.
pub trait BlsPublicKey: Clone {
    /// Serialize to the compressed 48-byte form.
    fn marshal(&self) -> [u8; PUBLIC_KEY_LENGTH];

    /// Independent copy of this key.
    fn copy(&self) -> Self {
        self.clone()
    }

    /// Add `other` to this key in place.
    fn aggregate(&mut self, other: &Self) -> &mut Self;

    /// Whether this key is the point at infinity.
    fn is_infinite(&self) -> bool;

    /// Compare by compressed encoding.
    fn equals(&self, other: &Self) -> bool;
}

/// A BLS signature.
pub trait BlsSignature: Clone {
    /// Public key type this signature verifies against.
    type PublicKey: BlsPublicKey;

    /// Verify against a single public key.
    fn verify(&self, public_key: &Self::PublicKey, message: &[u8]) -> bool;

    /// Verify an aggregate over distinct messages, one per key.
    fn aggregate_verify(&self, public_keys: &[Self::PublicKey], messages: &[[u8; 32]]) -> bool;

    /// Verify an aggregate where every key signed the same message.
    fn fast_aggregate_verify(&self, public_keys: &[Self::PublicKey], message: &[u8; 32]) -> bool;

    /// As [`BlsSignature::fast_aggregate_verify`], but an empty key set with
    /// the infinity signature is valid.
    fn eth2_fast_aggregate_verify(
        &self,
        public_keys: &[Self::PublicKey],
        message: &[u8; 32],
    ) -> bool;

    /// Serialize to the compressed 96-byte form.
    fn marshal(&self) -> [u8; SIGNATURE_LENGTH];

    /// Independent copy of this signature.
    fn copy(&self) -> Self {
        self.clone()
    }
}
