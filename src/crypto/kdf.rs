//! src/crypto/kdf.rs
//! Passphrase → AES-256 key via a single SHA-256.
//!
//! No salt and no iteration count: identical passphrases always give the same
//! key. Files written by this crate depend on exactly this derivation.

use crate::aliases::{Aes256Key32, PasswordString};
use crate::consts::AES_KEY_SIZE;
use crate::error::CryptError;
use sha2::{Digest, Sha256};

/// Derive SHA-256(passphrase) directly into the caller's key buffer.
#[inline(always)]
pub fn derive_sha256_key(
    password: &PasswordString,
    out_key: &mut Aes256Key32,
) -> Result<(), CryptError> {
    let passphrase = password.expose_secret();
    if passphrase.is_empty() {
        return Err(CryptError::Crypto("empty passphrase".into()));
    }

    let digest = Sha256::digest(passphrase.as_bytes());
    out_key.expose_secret_mut().copy_from_slice(digest.as_slice());
    Ok(())
}

/// Convenience: derive and return a fresh key.
#[inline(always)]
pub fn derive_key(password: &PasswordString) -> Result<Aes256Key32, CryptError> {
    let mut key = Aes256Key32::new([0u8; AES_KEY_SIZE]);
    derive_sha256_key(password, &mut key)?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_abc_vector() {
        let key = derive_key(&PasswordString::new("abc".to_string())).unwrap();
        assert_eq!(
            hex::encode(key.expose_secret()),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn empty_passphrase_rejected() {
        let err = derive_key(&PasswordString::new(String::new())).unwrap_err();
        assert!(matches!(err, CryptError::Crypto(_)));
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = derive_key(&PasswordString::new("hunter2".to_string())).unwrap();
        let b = derive_key(&PasswordString::new("hunter2".to_string())).unwrap();
        let c = derive_key(&PasswordString::new("hunter3".to_string())).unwrap();
        assert_eq!(a.expose_secret(), b.expose_secret());
        assert_ne!(a.expose_secret(), c.expose_secret());
    }
}
