//! Utility functions used across the library.

use crate::consts::AES_BLOCK_SIZE;

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by both CBC directions: plaintext ⊕ previous ciphertext before
/// encryption, decrypted block ⊕ previous ciphertext after decryption.
///
/// # Panics (by contract)
///
/// Panics if any slice is shorter than 16 bytes. Callers always pass exact
/// 16-byte blocks.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Size of `plain_len` bytes after PKCS#7 padding.
///
/// Always adds between 1 and 16 bytes, so a block-aligned input gains a full
/// padding block.
#[inline(always)]
pub const fn padded_len(plain_len: usize) -> usize {
    (plain_len / AES_BLOCK_SIZE + 1) * AES_BLOCK_SIZE
}

/// Total container size for a plaintext of `plain_len` bytes.
#[inline(always)]
pub const fn container_len(plain_len: usize) -> usize {
    crate::consts::AES_IV_SIZE + padded_len(plain_len)
}

/// Returns the PKCS#7 pad length if `block` ends with valid padding.
///
/// The padding bytes are compared without early exit.
#[inline(always)]
pub fn pkcs7_pad_len(block: &[u8; 16]) -> Option<usize> {
    let padding = block[15];
    if padding == 0 || padding as usize > AES_BLOCK_SIZE {
        return None;
    }

    let padding_start = AES_BLOCK_SIZE - padding as usize;
    let diff = block[padding_start..]
        .iter()
        .fold(0u8, |acc, byte| acc | (byte ^ padding));

    (diff == 0).then_some(padding as usize)
}
