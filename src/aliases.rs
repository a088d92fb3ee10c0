//! # Secure-Gate Type Aliases
//!
//! Secret-bearing buffers used by the cryption engine. Every type here is a
//! [`secure-gate`](https://github.com/Slurp9187/secure-gate) wrapper, so the
//! bytes are zeroized on drop and can only be reached through an explicit
//! `.expose_secret()` / `.expose_secret_mut()`.
//!
//! ## Type Categories
//!
//! ### Generic Secure Buffers
//! - [`SpanBuffer<N>`] - secure stack buffer for any size `N`
//!
//! ### Semantic Fixed-Size Types
//! - [`Aes256Key32`] - 32-byte AES-256 key (SHA-256 of the passphrase)
//! - [`Block16`] - one AES block
//! - [`Iv16`] - 16-byte initialization vector
//!
//! ### Dynamic Secrets
//! - [`PasswordString`] - passphrase string
//! - [`PlainBuffer`] - whole-file plaintext held in memory

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer — generic secure stack buffer (direct alias to secure-gate's Fixed)
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

pub type Aes256Key32 = SpanBuffer<32>;
pub type Block16 = SpanBuffer<16>; // one AES block
pub type Iv16 = SpanBuffer<16>; // stored in clear at the head of the container

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type PasswordString = secure_gate::Dynamic<String>;
pub type PlainBuffer = secure_gate::Dynamic<Vec<u8>>;
