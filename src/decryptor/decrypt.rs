//! src/decryptor/decrypt.rs
//! Container decryption: split off the IV, decrypt, strip padding

use crate::aliases::{Aes256Key32, Iv16, PlainBuffer};
use crate::consts::AES_IV_SIZE;
use crate::decryptor::cbc::decrypt_cbc_pkcs7;
use crate::error::CryptError;
use aes::cipher::KeyInit;
use aes::Aes256Dec;
use std::io::{Read, Write};

/// Split a container into its IV and ciphertext.
///
/// Fails with [`CryptError::MalformedContainer`] when fewer than 16 bytes are
/// present.
#[inline(always)]
pub fn split_container(container: &[u8]) -> Result<(Iv16, &[u8]), CryptError> {
    if container.len() < AES_IV_SIZE {
        return Err(CryptError::MalformedContainer {
            len: container.len(),
        });
    }

    let (iv_bytes, ciphertext) = container.split_at(AES_IV_SIZE);
    let mut iv = Iv16::new([0u8; 16]);
    iv.expose_secret_mut().copy_from_slice(iv_bytes);
    Ok((iv, ciphertext))
}

/// Decrypt a whole container.
#[inline(always)]
pub fn decrypt_bytes(container: &[u8], key: &Aes256Key32) -> Result<Vec<u8>, CryptError> {
    let (iv, ciphertext) = split_container(container)?;
    let cipher = Aes256Dec::new_from_slice(key.expose_secret())
        .map_err(|e| CryptError::CipherInit(e.to_string()))?;

    let mut plaintext = Vec::with_capacity(ciphertext.len());
    decrypt_cbc_pkcs7(&cipher, &iv, ciphertext, &mut plaintext)?;
    Ok(plaintext)
}

/// Read a container to the end, decrypt it, and write the plaintext to `output`.
///
/// Nothing is written unless decryption and padding validation succeed.
#[inline(always)]
pub fn decrypt<R, W>(mut input: R, mut output: W, key: &Aes256Key32) -> Result<(), CryptError>
where
    R: Read,
    W: Write,
{
    let mut container = Vec::new();
    input.read_to_end(&mut container)?;

    let plaintext = PlainBuffer::new(decrypt_bytes(&container, key)?);
    output.write_all(plaintext.expose_secret())?;
    Ok(())
}
