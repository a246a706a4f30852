//! Fuzz target for secret key, public key and extra-data parsing.

#![no_main]

use eth_bls::extra_data::secret_key_from_extra_data;
use eth_bls::{PublicKey, SecretKey, Signature};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(sk) = SecretKey::from_bytes(data) {
        // Anything accepted must re-marshal to the same bytes.
        assert_eq!(&sk.marshal()[..], data);
    }

    if let Ok(sk) = secret_key_from_extra_data(data) {
        let again = secret_key_from_extra_data(data).expect("parsed once");
        assert_eq!(sk.marshal(), again.marshal());
    }

    if let Ok(pk) = PublicKey::from_bytes(data) {
        assert!(!pk.is_infinite());
        assert_eq!(&pk.marshal()[..], data);
    }

    let _ = Signature::from_bytes(data);
});
