//! # Extra-Data Key Flow
//!
//! A sealer writes its marshalled BLS secret key into a block header's
//! `extra_data`; a reader recovers the key from the header. The key must
//! marshal identically every time it is read back and must keep signing
//! for the same public key.
//!
//! The header is a minimal fixture. Block production and chain insertion
//! are not exercised.

#[cfg(test)]
mod tests {
    use bls_keystore::bls;
    use eth_bls::extra_data::{
        encode_secret_key, secret_key_from_extra_data, validate_extra_data, MAX_EXTRA_DATA_SIZE,
    };
    use eth_bls::{BlsError, BlsSecretKey};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Just enough of a header to carry extra data between blocks.
    #[derive(Clone, Debug)]
    struct Header {
        number: u64,
        parent_hash: [u8; 32],
        extra_data: Vec<u8>,
    }

    impl Header {
        fn genesis(extra_data: Vec<u8>) -> Self {
            Self {
                number: 0,
                parent_hash: [0u8; 32],
                extra_data,
            }
        }

        fn child(&self, extra_data: Vec<u8>) -> Self {
            let mut parent_hash = [0u8; 32];
            parent_hash[..8].copy_from_slice(&self.number.to_be_bytes());
            Self {
                number: self.number + 1,
                parent_hash,
                extra_data,
            }
        }
    }

    /// Seal a header with a freshly generated key.
    fn sealed_genesis() -> (bls::SecretKey, Header) {
        let key = bls::SecretKey::random().unwrap();
        let extra = encode_secret_key(&key).unwrap();
        (key, Header::genesis(extra))
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    /// Parsing the same extra data twice yields keys that marshal identically.
    #[test]
    fn test_extra_data_key_marshals_identically() {
        let (_, header) = sealed_genesis();

        let first: bls::SecretKey = secret_key_from_extra_data(&header.extra_data).unwrap();
        let second: bls::SecretKey = secret_key_from_extra_data(&header.extra_data).unwrap();

        assert_eq!(first.marshal(), second.marshal());
    }

    #[test]
    fn test_recovered_key_matches_sealer() {
        let (key, header) = sealed_genesis();
        let recovered = secret_key_from_extra_data(&header.extra_data).unwrap();

        assert_eq!(recovered.marshal(), key.marshal());
        assert_eq!(recovered.public_key(), key.public_key());
    }

    /// The recovered key signs for the sealer's public key.
    #[test]
    fn test_recovered_key_signs_for_sealer() {
        let (key, header) = sealed_genesis();
        let recovered = secret_key_from_extra_data(&header.extra_data).unwrap();

        let sig: bls::Signature = recovered.sign(&header.parent_hash);
        let pk: bls::PublicKey = key.public_key();
        assert!(sig.verify(&pk, &header.parent_hash));
    }

    /// Extra data copied into a child header yields the same key.
    #[test]
    fn test_key_survives_child_header() {
        let (key, genesis) = sealed_genesis();
        let child = genesis.child(genesis.extra_data.clone());

        assert_eq!(child.number, 1);
        let recovered = secret_key_from_extra_data(&child.extra_data).unwrap();
        assert_eq!(recovered.marshal(), key.marshal());
    }

    /// The trait surface reports the same bytes as the inherent methods.
    #[test]
    fn test_trait_marshal_matches() {
        let (key, header) = sealed_genesis();
        let recovered = secret_key_from_extra_data(&header.extra_data).unwrap();

        assert_eq!(BlsSecretKey::marshal(&recovered), key.marshal());
    }

    #[test]
    fn test_encoded_key_fits_header() {
        let (_, header) = sealed_genesis();
        assert_eq!(header.extra_data.len(), MAX_EXTRA_DATA_SIZE);
        assert!(validate_extra_data(&header.extra_data).is_ok());
    }

    #[test]
    fn test_oversized_extra_data_rejected() {
        let (_, header) = sealed_genesis();
        let mut extra = header.extra_data.clone();
        extra.push(0x01);

        assert!(matches!(
            validate_extra_data(&extra),
            Err(BlsError::ExtraDataTooLarge { size: 33, max: 32 })
        ));
        // Readers still take the leading 32 bytes.
        let recovered = secret_key_from_extra_data(&extra).unwrap();
        assert_eq!(recovered.marshal().as_slice(), &header.extra_data[..]);
    }

    #[test]
    fn test_empty_extra_data_has_no_key() {
        let header = Header::genesis(Vec::new());
        assert!(matches!(
            secret_key_from_extra_data(&header.extra_data),
            Err(BlsError::ZeroSecretKey)
        ));
    }

    /// A vanity-style field of 0xFF bytes is not a canonical scalar.
    #[test]
    fn test_non_scalar_extra_data_rejected() {
        let header = Header::genesis(vec![0xFF; MAX_EXTRA_DATA_SIZE]);
        assert!(matches!(
            secret_key_from_extra_data(&header.extra_data),
            Err(BlsError::SecretUnmarshal)
        ));
    }
}
