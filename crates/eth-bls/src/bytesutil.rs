//! Fixed-size byte helpers.
//!
//! Conversions pad short input with trailing zeros and truncate long input,
//! so header fields of arbitrary length can be fed to fixed-width decoders.

use crate::BlsError;

/// Copy up to 32 bytes of `input` into a zero-padded array.
pub fn to_bytes32(input: &[u8]) -> [u8; 32] {
    to_fixed(input)
}

/// Copy up to 48 bytes of `input` into a zero-padded array.
pub fn to_bytes48(input: &[u8]) -> [u8; 48] {
    to_fixed(input)
}

/// Copy up to 96 bytes of `input` into a zero-padded array.
pub fn to_bytes96(input: &[u8]) -> [u8; 96] {
    to_fixed(input)
}

/// Whether every byte is zero (constant-time in the length).
pub fn is_zero(input: &[u8]) -> bool {
    input.iter().fold(0u8, |acc, b| acc | b) == 0
}

/// Decode hex with or without a `0x` prefix.
pub fn decode_hex(input: &str) -> Result<Vec<u8>, BlsError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(digits)?)
}

/// Encode as `0x`-prefixed lowercase hex.
pub fn encode_hex(input: &[u8]) -> String {
    format!("0x{}", hex::encode(input))
}

fn to_fixed<const N: usize>(input: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let len = input.len().min(N);
    out[..len].copy_from_slice(&input[..len]);
    out
}
