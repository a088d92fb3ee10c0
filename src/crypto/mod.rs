// src/crypto/mod.rs

//! Low-level crypto primitives: passphrase → key derivation and IV generation.

pub mod kdf;
pub mod rng;
