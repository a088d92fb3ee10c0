//! Child-side entry point for fan-out mode.
//!
//! A fan-out child receives one task token, re-opens the file it names and
//! runs the engine once. The binary maps the result to its exit status.

use crate::engine::{Engine, TransformReport};
use crate::error::CryptError;
use crate::task::Task;

/// Parse `token`, re-open its path and transform it.
pub fn run_token(token: &str, engine: &Engine) -> Result<TransformReport, CryptError> {
    let task = Task::from_token(token)?;
    log::debug!("worker {} running {token}", std::process::id());
    engine.transform(task)
}
