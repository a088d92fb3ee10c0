//! src/decryptor/cbc.rs
//! AES-256-CBC decryption with PKCS#7 validation on the final block

use crate::aliases::{Block16, Iv16};
use crate::consts::AES_BLOCK_SIZE;
use crate::error::CryptError;
use crate::utils::{pkcs7_pad_len, xor_blocks};
use aes::cipher::BlockDecrypt;
use aes::{Aes256Dec, Block as AesBlock};

/// Decrypt `ciphertext` and append the unpadded plaintext to `output`.
///
/// Fails with [`CryptError::DecryptionFailed`] when the ciphertext is empty,
/// not block-aligned, or ends in invalid padding. On failure nothing is
/// appended.
#[inline(always)]
pub fn decrypt_cbc_pkcs7(
    cipher: &Aes256Dec,
    iv: &Iv16,
    ciphertext: &[u8],
    output: &mut Vec<u8>,
) -> Result<(), CryptError> {
    if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
        return Err(CryptError::DecryptionFailed);
    }

    let start = output.len();
    output.reserve(ciphertext.len());

    let mut prev_block: [u8; 16] = *iv.expose_secret();
    let mut plaintext_block = Block16::new([0u8; 16]);

    for chunk in ciphertext.chunks_exact(AES_BLOCK_SIZE) {
        let mut block_bytes = [0u8; 16];
        block_bytes.copy_from_slice(chunk);

        let mut aes_block = AesBlock::from(block_bytes);
        cipher.decrypt_block(&mut aes_block);
        xor_blocks(
            aes_block.as_slice(),
            &prev_block,
            plaintext_block.expose_secret_mut(),
        );

        output.extend_from_slice(plaintext_block.expose_secret());
        prev_block = block_bytes;
    }

    // plaintext_block now holds the final block
    match pkcs7_pad_len(plaintext_block.expose_secret()) {
        Some(pad) => {
            output.truncate(output.len() - pad);
            Ok(())
        }
        None => {
            output.truncate(start);
            Err(CryptError::DecryptionFailed)
        }
    }
}
