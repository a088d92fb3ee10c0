//! src/orchestrator/summary.rs
//! Per-task outcomes and the aggregate result of one run

use crate::error::CryptError;
use crate::task::{Action, TaskSpec};
use std::path::Path;

/// Where a task ended up.
///
/// `Queued → Launched → (Completed | Failed | LaunchFailed | WaitAborted)`.
/// In-process runs go straight from queued to a final state. There is no
/// retry state.
#[derive(Debug)]
pub enum TaskStatus {
    /// Spawned and not yet waited on. Never left in a finished summary.
    Launched,
    Completed,
    Failed(CryptError),
    LaunchFailed(CryptError),
    /// The batch wait covering this task failed or an earlier one did.
    WaitAborted,
}

impl TaskStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    pub fn error(&self) -> Option<&CryptError> {
        match self {
            TaskStatus::Failed(err) | TaskStatus::LaunchFailed(err) => Some(err),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct TaskOutcome {
    pub spec: TaskSpec,
    pub status: TaskStatus,
}

impl TaskOutcome {
    pub fn new(spec: TaskSpec, status: TaskStatus) -> Self {
        Self { spec, status }
    }

    pub fn path(&self) -> &Path {
        &self.spec.path
    }

    pub fn action(&self) -> Action {
        self.spec.action
    }
}

/// Result of draining the queue once.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// One entry per drained task, in submission order.
    pub outcomes: Vec<TaskOutcome>,
    /// Number of batch waits/joins issued.
    pub wait_batches: usize,
    /// Spawned-unit handles released at the end of a fan-out run.
    pub handles_released: usize,
    /// Set when a batch wait failed and the remaining waits were skipped.
    pub wait_error: Option<CryptError>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.status.is_completed())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.wait_error.is_none() && self.failed() == 0
    }

    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.status.is_completed())
    }
}
