//! BLS types as seen by the keystore.

/// PublicKey represents a BLS public key.
pub type PublicKey = eth_bls::PublicKey;

/// SecretKey represents a BLS secret or private key.
pub type SecretKey = eth_bls::SecretKey;

/// Signature represents a BLS signature.
pub type Signature = eth_bls::Signature;
