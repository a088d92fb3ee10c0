//! tests/encrypt_tests.rs
//! Container encryption and decryption: shape, round trip, tamper and key checks

mod common;
use common::{counting_iv, password, test_key, TEST_DATA};

use filecryption::aliases::Aes256Key32;
use filecryption::consts::MIN_CONTAINER_SIZE;
use filecryption::utils::container_len;
use filecryption::{decrypt, decrypt_bytes, derive_key, encrypt, encrypt_bytes, encrypt_with_iv};
use filecryption::CryptError;
use std::io::Cursor;

#[test]
fn roundtrip_various_sizes() {
    let key = test_key();

    for size in [0usize, 1, 15, 16, 17, 31, 32, 33, 1024, 100_000] {
        let plaintext: Vec<u8> = (0..size).map(|i| (i * 31 % 251) as u8).collect();
        let container = encrypt_bytes(&plaintext, &key).unwrap();
        let decrypted = decrypt_bytes(&container, &key)
            .unwrap_or_else(|e| panic!("decrypt failed for {size} bytes: {e:?}"));
        assert_eq!(decrypted, plaintext, "size {size}");
    }
}

#[test]
fn container_shape() {
    let key = test_key();

    for size in [0usize, 1, 15, 16, 17, 64, 1000] {
        let container = encrypt_bytes(&vec![0x41u8; size], &key).unwrap();
        let expected = 16 + (size + 1).div_ceil(16) * 16;
        assert_eq!(container.len(), expected, "size {size}");
        assert_eq!(container.len(), container_len(size));
        assert!(container.len() >= MIN_CONTAINER_SIZE);
        assert_eq!((container.len() - 16) % 16, 0);
    }
}

#[test]
fn fresh_iv_per_encryption() {
    let key = test_key();
    let a = encrypt_bytes(TEST_DATA, &key).unwrap();
    let b = encrypt_bytes(TEST_DATA, &key).unwrap();
    assert_ne!(a[..16], b[..16], "IV reused");
    assert_ne!(a, b);
}

#[test]
fn short_input_is_malformed() {
    let key = test_key();
    for len in [0usize, 1, 8, 15] {
        let err = decrypt_bytes(&vec![0u8; len], &key).unwrap_err();
        assert!(
            matches!(err, CryptError::MalformedContainer { len: l } if l == len),
            "{len}: {err:?}"
        );
    }
}

#[test]
fn tamper_detected_for_strong_majority() {
    let key = test_key();
    let plaintext = b"sixteen byte msg";
    let container = encrypt_bytes(plaintext, &key).unwrap();

    let mut flips = 0;
    let mut failures = 0;
    for index in 16..container.len() {
        for mask in [0x01u8, 0x80, 0xff] {
            let mut tampered = container.clone();
            tampered[index] ^= mask;
            flips += 1;
            match decrypt_bytes(&tampered, &key) {
                Err(CryptError::DecryptionFailed) => failures += 1,
                Err(e) => panic!("unexpected error: {e:?}"),
                Ok(out) => assert_ne!(out, plaintext, "tamper went unnoticed and undamaged"),
            }
        }
    }

    assert!(
        failures * 10 >= flips * 9,
        "only {failures} of {flips} flips were rejected"
    );
}

#[test]
fn tamper_detection_is_not_universal() {
    // With a one-byte pad, some final-block flips still unpad cleanly.
    let key = derive_key(&password("tamper")).unwrap();
    let plaintext = b"tamper evident?";
    let container = encrypt_with_iv(plaintext, &key, &counting_iv()).unwrap();

    let mut failures = 0;
    let mut flips = 0;
    for index in 16..container.len() {
        for mask in [0x01u8, 0x80, 0xff] {
            let mut tampered = container.clone();
            tampered[index] ^= mask;
            flips += 1;
            if decrypt_bytes(&tampered, &key).is_err() {
                failures += 1;
            }
        }
    }
    assert_eq!(flips, 48);
    assert_eq!(failures, 47);
}

#[test]
fn wrong_passphrase_fails() {
    let key = derive_key(&password("alpha")).unwrap();
    let container =
        encrypt_with_iv(b"key sensitivity sample", &key, &counting_iv()).unwrap();

    let wrong = [
        "beta",
        "gamma",
        "delta",
        "Alpha",
        "alpha ",
        "alph",
        "alpha1",
        "ALPHA",
        "omega",
        "default-encryption-key",
        "hunter2",
        "correct horse battery staple",
        "älpha",
        "a",
        "zeta",
        "epsilon",
    ];

    for candidate in wrong {
        let wrong_key = derive_key(&password(candidate)).unwrap();
        let err = decrypt_bytes(&container, &wrong_key).unwrap_err();
        assert!(
            matches!(err, CryptError::DecryptionFailed),
            "{candidate:?}: {err:?}"
        );
    }

    assert_eq!(
        decrypt_bytes(&container, &key).unwrap(),
        b"key sensitivity sample"
    );
}

#[test]
fn wrong_passphrase_with_random_ivs() {
    let key = test_key();
    let mut failures = 0;
    let samples = 16;

    for i in 0..samples {
        let container = encrypt_bytes(TEST_DATA, &key).unwrap();
        let wrong_key = derive_key(&password(&format!("wrong-{i}"))).unwrap();
        match decrypt_bytes(&container, &wrong_key) {
            Err(CryptError::DecryptionFailed) => failures += 1,
            Err(e) => panic!("unexpected error: {e:?}"),
            Ok(out) => assert_ne!(out, TEST_DATA),
        }
    }

    // a random final block unpads cleanly about once in 256 tries
    assert!(failures >= samples - 1, "{failures} of {samples}");
}

#[test]
fn reader_writer_api_roundtrip() {
    let key = test_key();

    let mut encrypted = Vec::new();
    encrypt(Cursor::new(TEST_DATA), &mut encrypted, &key).unwrap();
    assert_eq!(encrypted.len(), 32);

    let mut decrypted = Vec::new();
    decrypt(Cursor::new(&encrypted), &mut decrypted, &key).unwrap();
    assert_eq!(decrypted, TEST_DATA);
}

#[test]
fn failed_decrypt_writes_nothing() {
    let key = test_key();
    let mut out = Vec::new();
    let err = decrypt(Cursor::new(vec![0u8; 48]), &mut out, &key);
    assert!(err.is_err());
    assert!(out.is_empty());
}

#[test]
fn key_is_used_verbatim() {
    let raw = Aes256Key32::new([0x11u8; 32]);
    let container = encrypt_bytes(b"raw key", &raw).unwrap();
    assert_eq!(decrypt_bytes(&container, &raw).unwrap(), b"raw key");
}
