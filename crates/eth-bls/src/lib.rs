//! # eth-bls - BLS12-381 Signatures for Ethereum-Style Consensus
//!
//! Keys, signatures and aggregation over the `blst` library, using the
//! proof-of-possession ciphersuite from the Ethereum consensus specs.
//!
//! ## Components
//!
//! | Module | Contents |
//! |--------|----------|
//! | `common` | Sizes, DST, backend-agnostic traits |
//! | `secret_key` | Key generation, parsing, signing |
//! | `public_key` | Parsing with subgroup check, aggregation |
//! | `signature` | Single, aggregate and fast-aggregate verification |
//! | `batch` | Randomized multi-signature verification |
//! | `extra_data` | Secret key carriage in block header extra data |
//! | `bytesutil` | Fixed-width byte conversion, hex |
//!
//! ## Security Properties
//!
//! - Public keys are rejected if infinite or outside the prime-order subgroup
//! - Signatures are group-checked before any pairing
//! - Batch verification uses 64-bit random scalars per triple
//! - Secret keys never appear in `Debug` output

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod bytesutil;
pub mod common;
pub mod errors;
pub mod extra_data;
pub mod public_key;
pub mod secret_key;
pub mod signature;

// Re-exports
pub use batch::{find_invalid_signatures, verify_multiple_signatures};
pub use common::{BlsPublicKey, BlsSecretKey, BlsSignature};
pub use errors::BlsError;
pub use public_key::{aggregate_public_keys, PublicKey};
pub use secret_key::SecretKey;
pub use signature::{aggregate_compressed_signatures, aggregate_signatures, Signature};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
