//! src/encryptor/encrypt.rs
//! Container encryption: `[16-byte IV][AES-256-CBC ciphertext, PKCS#7]`

use crate::aliases::{Aes256Key32, Iv16, PlainBuffer};
use crate::crypto::rng::SecureRandomExt;
use crate::encryptor::cbc::encrypt_cbc_pkcs7;
use crate::error::CryptError;
use crate::utils::container_len;
use aes::cipher::KeyInit;
use aes::Aes256Enc;
use std::io::{Read, Write};

/// Encrypt a whole buffer under a fresh random IV.
#[inline(always)]
pub fn encrypt_bytes(plaintext: &[u8], key: &Aes256Key32) -> Result<Vec<u8>, CryptError> {
    let iv = Iv16::random()?;
    encrypt_with_iv(plaintext, key, &iv)
}

/// Encrypt with a caller-chosen IV.
///
/// Deterministic; meant for test vectors. Reusing an IV with the same key
/// leaks equality of plaintext prefixes.
#[inline(always)]
pub fn encrypt_with_iv(
    plaintext: &[u8],
    key: &Aes256Key32,
    iv: &Iv16,
) -> Result<Vec<u8>, CryptError> {
    let cipher = Aes256Enc::new_from_slice(key.expose_secret())
        .map_err(|e| CryptError::CipherInit(e.to_string()))?;

    let mut output = Vec::with_capacity(container_len(plaintext.len()));
    output.extend_from_slice(iv.expose_secret());
    encrypt_cbc_pkcs7(&cipher, iv, plaintext, &mut output);
    Ok(output)
}

/// Read `input` to the end, encrypt it, and write the container to `output`.
///
/// The whole input is buffered; there is no streaming mode.
#[inline(always)]
pub fn encrypt<R, W>(mut input: R, mut output: W, key: &Aes256Key32) -> Result<(), CryptError>
where
    R: Read,
    W: Write,
{
    let mut plaintext = PlainBuffer::new(Vec::new());
    input.read_to_end(plaintext.expose_secret_mut())?;

    let container = encrypt_bytes(plaintext.expose_secret(), key)?;
    output.write_all(&container)?;
    Ok(())
}
