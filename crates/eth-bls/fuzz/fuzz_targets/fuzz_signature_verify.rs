//! Fuzz target for BLS signature verification.
//!
//! Feeds arbitrary bytes through public key and signature parsing, then
//! through every verification mode that accepts the parsed values.

#![no_main]

use eth_bls::{PublicKey, Signature};
use libfuzzer_sys::fuzz_target;

/// Fuzz input structure for BLS verification.
#[derive(Debug, arbitrary::Arbitrary)]
struct VerifyFuzzInput {
    /// Message to verify
    message: [u8; 32],
    /// Signature bytes (96 bytes for BLS12-381 G2)
    signature_bytes: [u8; 96],
    /// Public key bytes (48 bytes for BLS12-381 G1)
    pubkey_bytes: [u8; 48],
}

fuzz_target!(|input: VerifyFuzzInput| {
    let Ok(signature) = Signature::from_bytes(&input.signature_bytes) else {
        return;
    };
    let Ok(pubkey) = PublicKey::from_bytes(&input.pubkey_bytes) else {
        return;
    };

    // Must never panic, and must be deterministic.
    let result = signature.verify(&pubkey, &input.message);
    assert_eq!(result, signature.verify(&pubkey, &input.message));

    let keys = [pubkey];
    assert_eq!(result, signature.fast_aggregate_verify(&keys, &input.message));
    assert_eq!(
        result,
        signature.aggregate_verify(&keys, std::slice::from_ref(&input.message))
    );
});
