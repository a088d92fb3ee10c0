//! # Constants
//!
//! Cipher geometry, orchestration limits and the names shared with the
//! environment and the command line.

/// AES-256 key length in bytes. Equals the SHA-256 digest length.
pub const AES_KEY_SIZE: usize = 32;

/// Length of the clear-text IV stored at the head of every container.
pub const AES_IV_SIZE: usize = 16;

/// AES block size. Ciphertext is always a positive multiple of this.
pub const AES_BLOCK_SIZE: usize = 16;

/// Smallest valid container: IV plus one padded block.
pub const MIN_CONTAINER_SIZE: usize = AES_IV_SIZE + AES_BLOCK_SIZE;

/// Default number of spawned units waited on per batch.
///
/// Matches the 64-handle cap of the Win32 multi-object wait the batching
/// was originally sized for.
pub const MAX_WAIT_BATCH: usize = 64;

/// Environment variable holding the passphrase.
pub const ENCRYPTION_KEY_VAR: &str = "ENCRYPTION_KEY";

/// Passphrase used when [`ENCRYPTION_KEY_VAR`] is unset or empty.
pub const DEFAULT_PASSPHRASE: &str = "default-encryption-key";

/// Sub-command a fan-out child is started with: `<exe> worker <token>`.
pub const WORKER_SUBCOMMAND: &str = "worker";

/// File name prefix used by batch mode and fixture generation.
pub const TEST_FILE_PREFIX: &str = "test_file_";

/// Default number of fixture files.
pub const DEFAULT_TEST_FILE_COUNT: usize = 100;
