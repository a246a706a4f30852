//! # Batch Verification
//!
//! Verifies many independent (signature, message, public key) triples with
//! one multi-pairing. Each triple is weighted by a random non-zero 64-bit
//! scalar so that an invalid signature cannot be cancelled out by another.

use blst::blst_scalar;
use blst::min_pk;
use blst::BLST_ERROR;
use rand::Rng;

use crate::common::DST;
use crate::{BlsError, PublicKey, Signature};

/// Bits of randomness per scalar.
const RAND_BITS: usize = 64;

fn scalar_from_u64(val: u64) -> blst_scalar {
    let mut s = blst_scalar { b: [0u8; 32] };
    s.b[..8].copy_from_slice(&val.to_le_bytes());
    s
}

fn random_scalars(count: usize) -> Vec<blst_scalar> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let mut val: u64 = rng.gen();
            while val == 0 {
                val = rng.gen();
            }
            scalar_from_u64(val)
        })
        .collect()
}

fn check_lengths(signatures: usize, messages: usize, public_keys: usize) -> Result<(), BlsError> {
    if signatures != messages || messages != public_keys {
        return Err(BlsError::LengthMismatch {
            signatures,
            messages,
            public_keys,
        });
    }
    Ok(())
}

/// Verify `signatures[i]` over `messages[i]` by `public_keys[i]` for all `i`.
///
/// An empty batch verifies.
///
/// # Errors
/// * `LengthMismatch` if the three slices differ in length
/// * Any error from [`Signature::from_bytes`] for the first bad signature
pub fn verify_multiple_signatures(
    signatures: &[&[u8]],
    messages: &[[u8; 32]],
    public_keys: &[PublicKey],
) -> Result<bool, BlsError> {
    check_lengths(signatures.len(), messages.len(), public_keys.len())?;
    if signatures.is_empty() {
        return Ok(true);
    }

    let parsed = signatures
        .iter()
        .map(|bytes| Signature::from_bytes(bytes))
        .collect::<Result<Vec<_>, _>>()?;

    // A single triple gains nothing from the random linear combination.
    if parsed.len() == 1 {
        return Ok(parsed[0].verify(&public_keys[0], &messages[0]));
    }

    let sigs: Vec<&min_pk::Signature> = parsed.iter().map(Signature::as_blst).collect();
    let pks: Vec<&min_pk::PublicKey> = public_keys.iter().map(PublicKey::as_blst).collect();
    let msgs: Vec<&[u8]> = messages.iter().map(|m| m.as_slice()).collect();
    let rands = random_scalars(parsed.len());

    // Signatures were group-checked by `from_bytes`, keys on construction.
    let result = min_pk::Signature::verify_multiple_aggregate_signatures(
        &msgs, DST, &pks, false, &sigs, false, &rands, RAND_BITS,
    );

    if result != BLST_ERROR::BLST_SUCCESS {
        tracing::debug!(error = ?result, count = parsed.len(), "batch signature verification failed");
        return Ok(false);
    }
    Ok(true)
}

/// Indices of the triples that fail individual verification.
///
/// Used after a failed batch to locate the offending signatures. An
/// unparseable signature counts as invalid.
pub fn find_invalid_signatures(
    signatures: &[&[u8]],
    messages: &[[u8; 32]],
    public_keys: &[PublicKey],
) -> Result<Vec<usize>, BlsError> {
    check_lengths(signatures.len(), messages.len(), public_keys.len())?;

    Ok(signatures
        .iter()
        .zip(messages)
        .zip(public_keys)
        .enumerate()
        .filter(|(_, ((bytes, message), pk))| {
            Signature::from_bytes(bytes)
                .map(|sig| !sig.verify(pk, message.as_slice()))
                .unwrap_or(true)
        })
        .map(|(i, _)| i)
        .collect())
}
