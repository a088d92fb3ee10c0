//! # Error Types
//!
//! This module defines the error type used throughout the library.
//! All operations return [`Result<T, CryptError>`](CryptError).

use std::path::PathBuf;
use thiserror::Error;

/// The error type for all cryption and orchestration operations.
#[derive(Error, Debug)]
pub enum CryptError {
    /// I/O error that is not tied to opening a task's source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The task path does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The task path exists but could not be opened for reading.
    #[error("unable to open {}: {source}", path.display())]
    OpenFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decrypt input is shorter than one IV.
    #[error("malformed container: {len} bytes is shorter than the 16-byte IV")]
    MalformedContainer { len: usize },

    /// Padding validation failed after decryption.
    ///
    /// The container carries no MAC, so this is the only integrity signal and
    /// it cannot tell a wrong key apart from corrupted data.
    #[error("decryption failed: wrong key or corrupted data")]
    DecryptionFailed,

    /// The block cipher rejected the key.
    #[error("cipher init failed: {0}")]
    CipherInit(String),

    /// Other cryptographic failures (empty passphrase, RNG failure).
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Action name other than `encrypt` or `decrypt`.
    #[error("invalid action {0:?} (expected \"encrypt\" or \"decrypt\")")]
    InvalidAction(String),

    /// A task token could not be parsed.
    #[error("invalid task token: {0}")]
    InvalidToken(String),

    /// A child process could not be created.
    #[error("failed to launch worker for {}: {source}", path.display())]
    ProcessLaunch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The wait on a batch of children failed; later batches were not waited on.
    #[error("wait failed for batch {batch}: {source}")]
    BatchWait {
        batch: usize,
        #[source]
        source: std::io::Error,
    },

    /// A child process exited unsuccessfully.
    #[error("worker for {} exited with {}", path.display(), exit_label(*code))]
    ChildFailed { path: PathBuf, code: Option<i32> },

    /// Invalid orchestrator configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The worker pool could not be built.
    #[error("worker pool error: {0}")]
    Pool(String),
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}
