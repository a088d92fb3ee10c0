//! # Tasks
//!
//! One unit of work: a file path, what to do with it, and an open stream over
//! its current bytes. A [`Task`] is consumed by value, so its stream is read
//! at most once.
//!
//! Tasks cross process boundaries as a single string token (see
//! [`Task::to_token`]). The token carries path and action only; the receiving
//! side re-opens the path.

use crate::error::CryptError;
use crate::io::open_stream;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What to do with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Encrypt,
    Decrypt,
}

impl Action {
    pub const fn as_str(self) -> &'static str {
        match self {
            Action::Encrypt => "encrypt",
            Action::Decrypt => "decrypt",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse an action given as text.
///
/// Only `encrypt` and `decrypt` (any ASCII case, surrounding whitespace
/// ignored) are accepted. Everything else is [`CryptError::InvalidAction`].
/// The binary never gets here; it offers one subcommand per action.
impl FromStr for Action {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("encrypt") {
            Ok(Action::Encrypt)
        } else if trimmed.eq_ignore_ascii_case("decrypt") {
            Ok(Action::Decrypt)
        } else {
            Err(CryptError::InvalidAction(s.to_string()))
        }
    }
}

/// The serializable half of a task: path and action, no stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskSpec {
    pub path: PathBuf,
    pub action: Action,
}

impl TaskSpec {
    pub fn new(path: impl Into<PathBuf>, action: Action) -> Self {
        Self {
            path: path.into(),
            action,
        }
    }

    /// Re-open the path and build a runnable [`Task`].
    pub fn open(self) -> Result<Task, CryptError> {
        Task::open(self.path, self.action)
    }
}

/// Token form: a compact JSON object, e.g. `{"path":"a.txt","action":"encrypt"}`.
impl fmt::Display for TaskSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&token)
    }
}

impl FromStr for TaskSpec {
    type Err = CryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|e| CryptError::InvalidToken(format!("{e}: {s}")))
    }
}

/// A runnable task.
pub struct Task {
    spec: TaskSpec,
    source: Box<dyn Read + Send>,
    len_hint: Option<usize>,
}

impl Task {
    /// Wrap an already-open stream.
    pub fn new<R>(path: impl Into<PathBuf>, action: Action, source: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            spec: TaskSpec::new(path, action),
            source: Box::new(source),
            len_hint: None,
        }
    }

    /// Open `path` and build a task over it.
    ///
    /// Fails with [`CryptError::FileNotFound`] or [`CryptError::OpenFailure`];
    /// such paths never reach the queue.
    pub fn open(path: impl Into<PathBuf>, action: Action) -> Result<Self, CryptError> {
        let path = path.into();
        let file = open_stream(&path)?;
        let len_hint = file
            .metadata()
            .ok()
            .and_then(|metadata| usize::try_from(metadata.len()).ok());

        let mut task = Self::new(path, action, file);
        task.len_hint = len_hint;
        Ok(task)
    }

    pub fn path(&self) -> &Path {
        &self.spec.path
    }

    pub fn action(&self) -> Action {
        self.spec.action
    }

    pub fn spec(&self) -> &TaskSpec {
        &self.spec
    }

    /// Size of the source when it was opened, if known.
    pub fn len_hint(&self) -> Option<usize> {
        self.len_hint
    }

    /// Serialize to a single token for a child process.
    pub fn to_token(&self) -> String {
        self.spec.to_string()
    }

    /// Parse a token and re-open the file it names.
    pub fn from_token(token: &str) -> Result<Self, CryptError> {
        token.parse::<TaskSpec>()?.open()
    }

    /// Split into the spec and the stream. The stream is dropped by the
    /// consumer once read.
    pub fn into_parts(self) -> (TaskSpec, Box<dyn Read + Send>) {
        (self.spec, self.source)
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.spec.path == other.spec.path
    }
}

impl Eq for Task {}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("path", &self.spec.path)
            .field("action", &self.spec.action)
            .finish_non_exhaustive()
    }
}
