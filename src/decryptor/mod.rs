// src/decryptor/mod.rs

//! High-level decryption facade.
//!
//! Core API: `decrypt_bytes(&container, &key)?` → plaintext.
//! Helpers: `split_container`, `decrypt_cbc_pkcs7` for custom flows.

pub(crate) mod cbc;
pub(crate) mod decrypt;

pub use cbc::decrypt_cbc_pkcs7;
pub use decrypt::{decrypt, decrypt_bytes, split_container};
