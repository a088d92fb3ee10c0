//! src/orchestrator/launcher.rs
//! Spawning and waiting on fan-out units

use crate::consts::WORKER_SUBCOMMAND;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};

/// Exit state of one waited-on unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    Success,
    /// `code` is `None` when the child was terminated by a signal.
    Failed { code: Option<i32> },
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            ChildExit::Success
        } else {
            ChildExit::Failed {
                code: status.code(),
            }
        }
    }
}

/// Starts one unit per task token and waits on batches of them.
pub trait Launcher {
    /// Owned handle; dropping it releases the unit's OS resources.
    type Handle;

    /// Start a unit that runs the task described by `token`.
    fn launch(&mut self, token: &str) -> io::Result<Self::Handle>;

    /// Block until every unit in `batch` has terminated and report each exit
    /// in order. An `Err` means the wait itself failed.
    fn wait_batch(&mut self, batch: &mut [Self::Handle]) -> io::Result<Vec<ChildExit>>;
}

/// Runs each task as `<program> [args...] <token>`.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    program: PathBuf,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
}

impl ProcessLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Re-invoke the running binary as `<exe> worker <token>`.
    pub fn current_exe() -> io::Result<Self> {
        Ok(Self::new(std::env::current_exe()?).arg(WORKER_SUBCOMMAND))
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Set an environment variable for every child, on top of the inherited
    /// environment.
    #[must_use]
    pub fn env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), value.as_ref().to_os_string()));
        self
    }
}

impl Launcher for ProcessLauncher {
    type Handle = Child;

    fn launch(&mut self, token: &str) -> io::Result<Child> {
        Command::new(&self.program)
            .args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .arg(token)
            .stdin(Stdio::null())
            .spawn()
    }

    fn wait_batch(&mut self, batch: &mut [Child]) -> io::Result<Vec<ChildExit>> {
        batch
            .iter_mut()
            .map(|child| child.wait().map(ChildExit::from))
            .collect()
    }
}
