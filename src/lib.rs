// src/lib.rs

//! # filecryption
//!
//! Passphrase-keyed AES-256-CBC encryption of files, rewritten in place, plus
//! an orchestrator that runs many such jobs sequentially, on a bounded worker
//! pool, or as one OS process per file.
//!
//! Container layout: `[16-byte random IV][ciphertext, PKCS#7 padded]`. There
//! is no MAC; padding validation is the only integrity check.
//!
//! ```no_run
//! use filecryption::{env::passphrase_from_env, Action, Engine, Orchestrator, OrchestratorConfig, Task};
//!
//! let engine = Engine::new(&passphrase_from_env())?;
//! let mut orchestrator = Orchestrator::new(engine, OrchestratorConfig::default());
//! orchestrator.submit(Task::open("notes.txt", Action::Encrypt)?);
//! let summary = orchestrator.execute_sequentially();
//! assert!(summary.is_success());
//! # Ok::<(), filecryption::CryptError>(())
//! ```

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod engine;
pub mod env;
pub mod error;
pub mod io;
pub mod orchestrator;
pub mod task;
pub mod utils;
pub mod worker;

// High-level API
pub use builders::config_builder::{OrchestratorConfig, OrchestratorConfigBuilder};
pub use decryptor::{decrypt, decrypt_bytes};
pub use encryptor::{encrypt, encrypt_bytes, encrypt_with_iv};
pub use engine::{Engine, TransformReport, WriteMode};
pub use error::CryptError;
pub use orchestrator::{
    ChildExit, Launcher, Orchestrator, ProcessLauncher, RunSummary, TaskOutcome, TaskStatus,
};
pub use task::{Action, Task, TaskSpec};

pub use crypto::kdf::{derive_key, derive_sha256_key};

#[cfg(feature = "batch-ops")]
pub use batch_ops::{decrypt_batch, encrypt_batch};
