//! tests/common.rs
//! Common constants and helpers shared across test files

use filecryption::aliases::{Aes256Key32, Iv16, PasswordString};
use filecryption::{derive_key, Engine};
use std::path::{Path, PathBuf};

/// Standard test passphrase
#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// SHA-256 of [`TEST_PASSWORD`]
#[allow(dead_code)]
pub const TEST_KEY_HEX: &str = "c4bbcb1fbec99d65bf59d85c8cb62ee2db963f0fe106f483d9afa73bd4e39a8a";

#[allow(dead_code)]
pub const TEST_DATA: &[u8] = b"test data";

#[allow(dead_code)]
pub fn password(s: &str) -> PasswordString {
    PasswordString::new(s.to_string())
}

#[allow(dead_code)]
pub fn test_key() -> Aes256Key32 {
    derive_key(&password(TEST_PASSWORD)).unwrap()
}

#[allow(dead_code)]
pub fn test_engine() -> Engine {
    Engine::new(&password(TEST_PASSWORD)).unwrap()
}

/// IV `00 01 02 … 0f`, used for deterministic vectors
#[allow(dead_code)]
pub fn counting_iv() -> Iv16 {
    Iv16::new(core::array::from_fn(|i| i as u8))
}

/// Write `count` files named `file_<i>.txt` with distinct contents.
#[allow(dead_code)]
pub fn write_files(dir: &Path, count: usize) -> Vec<(PathBuf, Vec<u8>)> {
    (0..count)
        .map(|i| {
            let path = dir.join(format!("file_{i}.txt"));
            let body = format!("file number {i}\n").repeat(i % 7 + 1).into_bytes();
            std::fs::write(&path, &body).unwrap();
            (path, body)
        })
        .collect()
}
