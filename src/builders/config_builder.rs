//! src/builders/config_builder.rs
//! Orchestrator configuration: worker count and wait-batch size

use crate::consts::MAX_WAIT_BATCH;
use crate::error::CryptError;
use std::num::NonZeroUsize;

/// Validated orchestrator settings.
///
/// - `workers`: threads in the pooled executor
/// - `batch_size`: units joined per wait (pooled) or per batch wait (fan-out)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    workers: usize,
    batch_size: usize,
}

impl OrchestratorConfig {
    #[must_use]
    pub fn builder() -> OrchestratorConfigBuilder {
        OrchestratorConfigBuilder::new()
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            batch_size: MAX_WAIT_BATCH,
        }
    }
}

/// Builder for [`OrchestratorConfig`].
///
/// Defaults: one worker per available CPU, batches of [`MAX_WAIT_BATCH`].
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfigBuilder {
    workers: Option<usize>,
    batch_size: Option<usize>,
}

impl OrchestratorConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    #[must_use]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Validate and build. Zero workers or a zero batch size are rejected.
    pub fn build(self) -> Result<OrchestratorConfig, CryptError> {
        let workers = self.workers.unwrap_or_else(default_workers);
        let batch_size = self.batch_size.unwrap_or(MAX_WAIT_BATCH);

        if workers == 0 {
            return Err(CryptError::Config("workers must be at least 1".into()));
        }
        if batch_size == 0 {
            return Err(CryptError::Config("batch size must be at least 1".into()));
        }

        Ok(OrchestratorConfig {
            workers,
            batch_size,
        })
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
