//! src/encryptor/cbc.rs
//! AES-256-CBC encryption over an in-memory buffer with PKCS#7 padding

use crate::aliases::{Block16, Iv16};
use crate::consts::AES_BLOCK_SIZE;
use crate::utils::{padded_len, xor_blocks};
use aes::cipher::BlockEncrypt;
use aes::{Aes256Enc, Block as AesBlock};

/// Encrypt `plaintext` and append the ciphertext to `output`.
///
/// Appends exactly `padded_len(plaintext.len())` bytes. The final block always
/// carries padding, so empty input still yields one block.
#[inline(always)]
pub fn encrypt_cbc_pkcs7(cipher: &Aes256Enc, iv: &Iv16, plaintext: &[u8], output: &mut Vec<u8>) {
    output.reserve(padded_len(plaintext.len()));

    // previous ciphertext block – starts as the IV
    let mut prev_block: [u8; 16] = *iv.expose_secret();
    let mut plaintext_block = Block16::new([0u8; 16]);

    let mut chunks = plaintext.chunks_exact(AES_BLOCK_SIZE);
    for chunk in chunks.by_ref() {
        plaintext_block.expose_secret_mut().copy_from_slice(chunk);
        prev_block = encrypt_block(cipher, &plaintext_block, &prev_block);
        output.extend_from_slice(&prev_block);
    }

    // Final block: remainder + PKCS#7 padding (a full block of 0x10 if aligned)
    let tail = chunks.remainder();
    let pad = (AES_BLOCK_SIZE - tail.len()) as u8;
    let final_block = plaintext_block.expose_secret_mut();
    final_block[..tail.len()].copy_from_slice(tail);
    final_block[tail.len()..].fill(pad);
    prev_block = encrypt_block(cipher, &plaintext_block, &prev_block);
    output.extend_from_slice(&prev_block);
}

#[inline(always)]
fn encrypt_block(cipher: &Aes256Enc, plaintext_block: &Block16, prev_block: &[u8; 16]) -> [u8; 16] {
    let mut xor_output = Block16::new([0u8; 16]);
    xor_blocks(
        plaintext_block.expose_secret(),
        prev_block,
        xor_output.expose_secret_mut(),
    );

    let mut aes_block = AesBlock::from(*xor_output.expose_secret());
    cipher.encrypt_block(&mut aes_block);

    let mut ct_array = [0u8; 16];
    ct_array.copy_from_slice(aes_block.as_slice());
    ct_array
}
