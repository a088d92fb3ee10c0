#[cfg(feature = "batch-ops")]
use rayon::prelude::*;
#[cfg(feature = "batch-ops")]
use std::io::{Read, Write};

#[cfg(feature = "batch-ops")]
use crate::aliases::Aes256Key32;
#[cfg(feature = "batch-ops")]
use crate::{decrypt, encrypt, CryptError};

/// Encrypt every `(reader, writer)` pair in parallel. First error wins.
#[cfg(feature = "batch-ops")]
pub fn encrypt_batch<R, W>(batch: &mut [(R, W)], key: &Aes256Key32) -> Result<(), CryptError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| encrypt(src, dst, key))
}

/// Decrypt every `(reader, writer)` pair in parallel. First error wins.
#[cfg(feature = "batch-ops")]
pub fn decrypt_batch<R, W>(batch: &mut [(R, W)], key: &Aes256Key32) -> Result<(), CryptError>
where
    R: Read + Send,
    W: Write + Send,
{
    batch
        .par_iter_mut()
        .try_for_each(|(src, dst)| decrypt(src, dst, key))
}
