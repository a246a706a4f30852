//! # BLS Test Suite
//!
//! Cross-crate tests for `eth-bls` and `bls-keystore`.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # Flows spanning both crates
//! └── benches/           # Criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bls-tests
//! cargo test -p bls-tests integration::extra_data_flow
//!
//! # Benchmarks
//! cargo bench -p bls-tests
//! ```

pub mod integration;
