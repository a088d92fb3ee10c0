//! src/crypto/rng.rs
//! Secure randomness for fixed-size secrets.
//!
//! Adds `T::random()` to every `SpanBuffer<N>` (Iv16, Aes256Key32, …) backed
//! by a thread-local `OsRng`.

use crate::error::CryptError;
use rand::{rngs::OsRng, TryRngCore};
use secure_gate::Fixed;
use std::cell::RefCell;

/// Extension trait – gives `.random()` to all fixed-size secret types
pub trait SecureRandomExt: Sized {
    /// Generate a cryptographically secure random instance of this type
    fn random() -> Result<Self, CryptError>;
}

thread_local! {
    static RNG: RefCell<OsRng> = const { RefCell::new(OsRng) };
}

impl<const N: usize> SecureRandomExt for Fixed<[u8; N]> {
    #[inline(always)]
    fn random() -> Result<Self, CryptError> {
        RNG.with(|rng_cell| {
            let mut rng = rng_cell.borrow_mut();
            let mut bytes = [0u8; N];
            rng.try_fill_bytes(&mut bytes)
                .map_err(|e| CryptError::Crypto(format!("OS RNG failed: {e}")))?;
            Ok(Fixed::new(bytes))
        })
    }
}
