//! # Keystore Flow
//!
//! Validator-style usage across both crates: keys generated into an
//! on-disk keystore, unlocked, used to sign a shared message and checked
//! with the aggregate and batch verifiers in `eth-bls`.

#[cfg(test)]
mod tests {
    use bls_keystore::bls::{PublicKey, SecretKey, Signature};
    use bls_keystore::{EncryptedKey, KeyStore, KeystoreConfig, KeystoreError};
    use eth_bls::bytesutil::encode_hex;
    use eth_bls::{aggregate_signatures, find_invalid_signatures, verify_multiple_signatures};
    use tempfile::TempDir;

    const PASSWORD: &str = "integration-password";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn open_store(dir: &TempDir) -> KeyStore {
        KeyStore::open(KeystoreConfig::light().with_keys_dir(dir.path())).unwrap()
    }

    /// A store with `n` keys, all unlocked.
    fn unlocked_store(n: usize) -> (TempDir, KeyStore, Vec<PublicKey>) {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        for _ in 0..n {
            let pk = store.new_key(PASSWORD).unwrap();
            store.unlock(&pk, PASSWORD).unwrap();
        }
        let accounts = store.accounts().unwrap();
        (dir, store, accounts)
    }

    // =============================================================================
    // INTEGRATION TESTS
    // =============================================================================

    #[test]
    fn test_keys_persist_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let secret = SecretKey::random().unwrap();
        {
            let store = open_store(&dir);
            store.import_key(&secret, PASSWORD).unwrap();
        }

        let reopened = open_store(&dir);
        assert_eq!(reopened.accounts().unwrap(), vec![secret.public_key()]);
        assert!(!reopened.is_unlocked(&secret.public_key()));

        let exported = reopened.export_key(&secret.public_key(), PASSWORD).unwrap();
        assert_eq!(exported.marshal(), secret.marshal());
    }

    #[test]
    fn test_key_file_names_public_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_store(&dir);
        let pk = store.new_key(PASSWORD).unwrap();

        let name = encode_hex(&pk.marshal());
        let path = dir.path().join(format!("{}.json", name.trim_start_matches("0x")));
        let file = EncryptedKey::load(&path).unwrap();
        assert_eq!(file.public_key().unwrap(), pk);

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["crypto"]["kdf"], "scrypt");
        assert_eq!(json["crypto"]["cipher"], "xchacha20-poly1305");
    }

    /// Unlocked validators sign one message; the aggregate verifies.
    #[test]
    fn test_committee_aggregate_signature() {
        let (_dir, store, accounts) = unlocked_store(4);
        let message = [0x42u8; 32];

        let signatures: Vec<Signature> = accounts
            .iter()
            .map(|pk| store.sign(pk, &message).unwrap())
            .collect();
        let aggregate = aggregate_signatures(&signatures).unwrap();

        assert!(aggregate.fast_aggregate_verify(&accounts, &message));
        assert!(aggregate.eth2_fast_aggregate_verify(&accounts, &message));
        assert!(!aggregate.fast_aggregate_verify(&accounts[..3], &message));
    }

    /// Each validator signs its own message; batch verification accepts.
    #[test]
    fn test_batch_verify_distinct_messages() {
        let (_dir, store, accounts) = unlocked_store(3);
        let messages: Vec<[u8; 32]> = (0..accounts.len() as u8).map(|i| [i; 32]).collect();

        let signatures: Vec<[u8; 96]> = accounts
            .iter()
            .zip(&messages)
            .map(|(pk, msg)| store.sign(pk, msg).unwrap().marshal())
            .collect();
        let sig_refs: Vec<&[u8]> = signatures.iter().map(|s| &s[..]).collect();

        assert!(verify_multiple_signatures(&sig_refs, &messages, &accounts).unwrap());

        let aggregate = aggregate_signatures(
            &signatures
                .iter()
                .map(|s| Signature::from_bytes(s).unwrap())
                .collect::<Vec<_>>(),
        )
        .unwrap();
        assert!(aggregate.aggregate_verify(&accounts, &messages));
    }

    /// A signature by the wrong validator is located by index.
    #[test]
    fn test_batch_locates_bad_signature() {
        let (_dir, store, accounts) = unlocked_store(3);
        let messages: Vec<[u8; 32]> = vec![[1u8; 32], [2u8; 32], [3u8; 32]];

        let mut signatures: Vec<[u8; 96]> = accounts
            .iter()
            .zip(&messages)
            .map(|(pk, msg)| store.sign(pk, msg).unwrap().marshal())
            .collect();
        // Validator 0 signs validator 1's message.
        signatures[1] = store.sign(&accounts[0], &messages[1]).unwrap().marshal();
        let sig_refs: Vec<&[u8]> = signatures.iter().map(|s| &s[..]).collect();

        assert!(!verify_multiple_signatures(&sig_refs, &messages, &accounts).unwrap());
        assert_eq!(
            find_invalid_signatures(&sig_refs, &messages, &accounts).unwrap(),
            vec![1]
        );
    }

    #[test]
    fn test_locked_key_cannot_sign() {
        let (_dir, store, accounts) = unlocked_store(1);
        let pk = &accounts[0];

        assert!(store.lock(pk));
        assert!(matches!(
            store.sign(pk, b"late"),
            Err(KeystoreError::KeyLocked(_))
        ));

        let sig = store.sign_with_password(pk, PASSWORD, b"late").unwrap();
        assert!(sig.verify(pk, b"late"));
    }

    #[test]
    fn test_deleted_key_gone_from_store() {
        let (_dir, store, accounts) = unlocked_store(2);

        store.delete_key(&accounts[0], PASSWORD).unwrap();
        assert!(!store.is_unlocked(&accounts[0]));
        assert_eq!(store.accounts().unwrap(), vec![accounts[1].clone()]);
        assert!(matches!(
            store.unlock(&accounts[0], PASSWORD),
            Err(KeystoreError::KeyNotFound(_))
        ));
    }
}
