//! # BLS Benchmarks
//!
//! | Operation | Notes |
//! |-----------|-------|
//! | sign / verify | single pairing check |
//! | fast_aggregate_verify | one message, growing committee |
//! | verify_multiple_signatures | distinct messages, random linear combination |
//! | extra-data decode | `to_bytes32` + scalar validation |
//! | key file encrypt / decrypt | dominated by scrypt at the light setting |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::time::Duration;

use bls_keystore::{EncryptedKey, KeystoreConfig};
use eth_bls::extra_data::{encode_secret_key, secret_key_from_extra_data};
use eth_bls::{
    aggregate_signatures, verify_multiple_signatures, PublicKey, SecretKey, Signature,
};

/// Random 32-byte message.
fn random_message() -> [u8; 32] {
    rand::thread_rng().gen()
}

fn random_keys(n: usize) -> Vec<SecretKey> {
    (0..n).map(|_| SecretKey::random().unwrap()).collect()
}

// ============================================================================
// Single signatures
// ============================================================================

fn bench_sign_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls-single");
    group.measurement_time(Duration::from_secs(10));

    let key = SecretKey::random().unwrap();
    let pk = key.public_key();
    let message = random_message();
    let signature = key.sign(&message);
    let sig_bytes = signature.marshal();

    group.bench_function("sign", |b| b.iter(|| black_box(key.sign(&message))));

    group.bench_function("verify", |b| {
        b.iter(|| black_box(signature.verify(&pk, &message)))
    });

    group.bench_function("signature_from_bytes", |b| {
        b.iter(|| black_box(Signature::from_bytes(&sig_bytes).is_ok()))
    });

    group.finish();
}

// ============================================================================
// Aggregation
// ============================================================================

fn bench_aggregate_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls-aggregate");
    group.measurement_time(Duration::from_secs(10));

    for size in [16usize, 64, 128] {
        let keys = random_keys(size);
        let pks: Vec<PublicKey> = keys.iter().map(SecretKey::public_key).collect();
        let message = random_message();
        let signatures: Vec<Signature> = keys.iter().map(|k| k.sign(&message)).collect();
        let aggregate = aggregate_signatures(&signatures).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("aggregate_signatures", size),
            &signatures,
            |b, sigs| b.iter(|| black_box(aggregate_signatures(sigs))),
        );
        group.bench_with_input(
            BenchmarkId::new("fast_aggregate_verify", size),
            &(pks, message),
            |b, (pks, msg)| b.iter(|| black_box(aggregate.fast_aggregate_verify(pks, msg))),
        );
    }

    group.finish();
}

fn bench_batch_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls-batch");
    group.measurement_time(Duration::from_secs(10));

    for size in [8usize, 32, 64] {
        let keys = random_keys(size);
        let pks: Vec<PublicKey> = keys.iter().map(SecretKey::public_key).collect();
        let messages: Vec<[u8; 32]> = (0..size).map(|_| random_message()).collect();
        let signatures: Vec<[u8; 96]> = keys
            .iter()
            .zip(&messages)
            .map(|(k, m)| k.sign(m).marshal())
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("verify_multiple_signatures", size),
            &(signatures, messages, pks),
            |b, (sigs, msgs, pks)| {
                let sig_refs: Vec<&[u8]> = sigs.iter().map(|s| &s[..]).collect();
                b.iter(|| black_box(verify_multiple_signatures(&sig_refs, msgs, pks).is_ok()))
            },
        );
    }

    group.finish();
}

// ============================================================================
// Extra-data and key files
// ============================================================================

fn bench_extra_data(c: &mut Criterion) {
    let key = SecretKey::random().unwrap();
    let extra = encode_secret_key(&key).unwrap();

    c.bench_function("extra_data_decode", |b| {
        b.iter(|| black_box(secret_key_from_extra_data(&extra).is_ok()))
    });
}

fn bench_key_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls-keyfile");
    let config = KeystoreConfig::light();
    let key = SecretKey::random().unwrap();
    let encrypted = EncryptedKey::encrypt(&key, "bench", &config).unwrap();

    group.bench_function("encrypt_light", |b| {
        b.iter(|| black_box(EncryptedKey::encrypt(&key, "bench", &config).is_ok()))
    });
    group.bench_function("decrypt_light", |b| {
        b.iter(|| black_box(encrypted.decrypt("bench").is_ok()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_sign_verify,
    bench_aggregate_verify,
    bench_batch_verify,
    bench_extra_data,
    bench_key_file,
);
criterion_main!(benches);
