// src/orchestrator/mod.rs

//! # Orchestrator
//!
//! A FIFO queue of [`Task`]s and three ways to drain it:
//!
//! - [`Orchestrator::execute_sequentially`]: one task at a time, in process.
//! - [`Orchestrator::execute_pooled`]: a bounded rayon pool, joined batch by
//!   batch.
//! - [`Orchestrator::execute_with_fan_out`]: one OS process per task, all
//!   launched first, then waited on in batches of at most `batch_size`.
//!
//! A failing task never stops the others. The only run-level abort is a
//! failed batch wait in fan-out mode, which skips the remaining waits.
//!
//! Fan-out never touches the engine; [`Orchestrator::launch_only`] builds an
//! orchestrator without one, so no key is derived in the parent.

pub(crate) mod handles;
pub(crate) mod launcher;
pub(crate) mod summary;

pub use handles::HandleSet;
pub use launcher::{ChildExit, Launcher, ProcessLauncher};
pub use summary::{RunSummary, TaskOutcome, TaskStatus};

use crate::builders::config_builder::OrchestratorConfig;
use crate::engine::Engine;
use crate::error::CryptError;
use crate::task::Task;
use rayon::prelude::*;
use std::collections::VecDeque;

pub struct Orchestrator {
    engine: Option<Engine>,
    config: OrchestratorConfig,
    queue: VecDeque<Task>,
}

impl Orchestrator {
    pub fn new(engine: Engine, config: OrchestratorConfig) -> Self {
        Self {
            engine: Some(engine),
            config,
            queue: VecDeque::new(),
        }
    }

    /// An orchestrator that can only fan out. In-process execution fails
    /// with [`CryptError::Config`].
    pub fn launch_only(config: OrchestratorConfig) -> Self {
        Self {
            engine: None,
            config,
            queue: VecDeque::new(),
        }
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Append to the pending queue.
    pub fn submit(&mut self, task: Task) {
        log::debug!("queued {} {}", task.action(), task.path().display());
        self.queue.push_back(task);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drain the queue in FIFO order, running each task in this thread.
    ///
    /// Without an engine every task fails with [`CryptError::Config`].
    pub fn execute_sequentially(&mut self) -> RunSummary {
        let mut summary = RunSummary::default();

        while let Some(task) = self.queue.pop_front() {
            log::info!("executing {} {}", task.action(), task.path().display());
            let outcome = match &self.engine {
                Some(engine) => run_in_process(engine, task),
                None => TaskOutcome::new(
                    task.spec().clone(),
                    TaskStatus::Failed(missing_engine()),
                ),
            };
            summary.outcomes.push(outcome);
        }

        summary
    }

    /// Drain the queue through a pool of `workers` threads.
    ///
    /// Tasks are handed to the pool in batches of at most `batch_size`; each
    /// batch is joined before the next starts. Without an engine this fails
    /// with [`CryptError::Config`] and leaves the queue as it was.
    pub fn execute_pooled(&mut self) -> Result<RunSummary, CryptError> {
        let mut summary = RunSummary::default();
        let engine = self.engine.as_ref().ok_or_else(missing_engine)?;
        if self.queue.is_empty() {
            return Ok(summary);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers())
            .thread_name(|i| format!("cryption-worker-{i}"))
            .build()
            .map_err(|e| CryptError::Pool(e.to_string()))?;

        log::info!(
            "running {} tasks on {} workers (batch size {})",
            self.queue.len(),
            self.config.workers(),
            self.config.batch_size()
        );

        let mut pending = self.queue.drain(..);
        loop {
            let batch: Vec<Task> = pending.by_ref().take(self.config.batch_size()).collect();
            if batch.is_empty() {
                break;
            }

            summary.wait_batches += 1;
            let outcomes: Vec<TaskOutcome> = pool.install(|| {
                batch
                    .into_par_iter()
                    .map(|task| run_in_process(engine, task))
                    .collect()
            });
            summary.outcomes.extend(outcomes);
        }

        log::info!(
            "{} of {} tasks completed",
            summary.succeeded(),
            summary.total()
        );
        Ok(summary)
    }

    /// Launch one unit per queued task through `launcher`, then wait on all of
    /// them in batches of at most `batch_size`.
    ///
    /// Every handle is released before returning, whether or not the waits
    /// succeeded. Units still running after a failed wait are left alone.
    pub fn execute_with_fan_out<L: Launcher>(&mut self, launcher: &mut L) -> RunSummary {
        let mut summary = RunSummary::default();
        let mut handles = HandleSet::new();

        log::info!("starting fan-out execution with {} tasks", self.queue.len());

        while let Some(task) = self.queue.pop_front() {
            // the child re-opens the path; our stream is closed here
            let (spec, _source) = task.into_parts();
            let token = spec.to_string();
            log::debug!("launching worker for {token}");

            match launcher.launch(&token) {
                Ok(handle) => {
                    handles.push(summary.outcomes.len(), handle);
                    summary
                        .outcomes
                        .push(TaskOutcome::new(spec, TaskStatus::Launched));
                }
                Err(source) => {
                    log::error!(
                        "failed to launch worker for {}: {source}",
                        spec.path.display()
                    );
                    let err = CryptError::ProcessLaunch {
                        path: spec.path.clone(),
                        source,
                    };
                    summary
                        .outcomes
                        .push(TaskOutcome::new(spec, TaskStatus::LaunchFailed(err)));
                }
            }
        }

        if !handles.is_empty() {
            log::info!("waiting for {} worker processes", handles.len());
        }

        let batches = handles.batches_mut(self.config.batch_size());
        for (batch_no, (indices, batch)) in batches.enumerate() {
            if summary.wait_error.is_some() {
                mark_aborted(&mut summary.outcomes, indices);
                continue;
            }

            summary.wait_batches += 1;
            match launcher.wait_batch(batch) {
                Ok(exits) => {
                    for (&index, exit) in indices.iter().zip(exits) {
                        let outcome = &mut summary.outcomes[index];
                        outcome.status = match exit {
                            ChildExit::Success => TaskStatus::Completed,
                            ChildExit::Failed { code } => {
                                let err = CryptError::ChildFailed {
                                    path: outcome.spec.path.clone(),
                                    code,
                                };
                                log::error!("{err}");
                                TaskStatus::Failed(err)
                            }
                        };
                    }
                    // a short exit report leaves the rest unresolved
                    mark_aborted(&mut summary.outcomes, indices);
                }
                Err(source) => {
                    let err = CryptError::BatchWait {
                        batch: batch_no,
                        source,
                    };
                    log::error!("{err}; skipping remaining waits");
                    mark_aborted(&mut summary.outcomes, indices);
                    summary.wait_error = Some(err);
                }
            }
        }

        summary.handles_released = handles.release();

        if summary.wait_error.is_none() {
            log::info!(
                "{} processes completed ({} succeeded)",
                summary.handles_released,
                summary.succeeded()
            );
        }
        summary
    }
}

fn missing_engine() -> CryptError {
    CryptError::Config("in-process execution needs an engine".to_string())
}

fn run_in_process(engine: &Engine, task: Task) -> TaskOutcome {
    let spec = task.spec().clone();
    match engine.transform(task) {
        Ok(report) => {
            log::info!(
                "{} {} ok ({} bytes)",
                report.action,
                report.path.display(),
                report.bytes_out
            );
            TaskOutcome::new(spec, TaskStatus::Completed)
        }
        Err(err) => {
            log::error!("{} {} failed: {err}", spec.action, spec.path.display());
            TaskOutcome::new(spec, TaskStatus::Failed(err))
        }
    }
}

/// Any listed outcome still `Launched` becomes `WaitAborted`.
fn mark_aborted(outcomes: &mut [TaskOutcome], indices: &[usize]) {
    for &index in indices {
        if matches!(outcomes[index].status, TaskStatus::Launched) {
            outcomes[index].status = TaskStatus::WaitAborted;
        }
    }
}
