// src/encryptor/mod.rs

//! High-level encryption facade.
//!
//! Core API: `encrypt_bytes(&plain, &key)?` → `IV ‖ ciphertext`.
//! Deterministic variant: `encrypt_with_iv` for vectors and tests.

pub(crate) mod cbc;
pub(crate) mod encrypt;

pub use cbc::encrypt_cbc_pkcs7;
pub use encrypt::{encrypt, encrypt_bytes, encrypt_with_iv};
