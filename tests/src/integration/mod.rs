//! # Integration Tests
//!
//! - `extra_data_flow`: a secret key carried in header extra-data and read back
//! - `keystore_flow`: keys stored on disk, unlocked, and used for aggregation

pub mod extra_data_flow;
pub mod keystore_flow;
