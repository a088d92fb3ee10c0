use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use filecryption::consts::{DEFAULT_TEST_FILE_COUNT, TEST_FILE_PREFIX};
use filecryption::env::passphrase_from_env;
use filecryption::{
    worker, Action, CryptError, Engine, Orchestrator, OrchestratorConfig, ProcessLauncher,
    RunSummary, Task, TaskStatus, WriteMode,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(version, about = "Encrypt or decrypt files in place with AES-256-CBC", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt the given files in place
    Encrypt(PathArgs),
    /// Decrypt the given files in place
    Decrypt(PathArgs),
    /// Encrypt every `test_file_<n>.txt` in a directory
    EncryptAll(BatchArgs),
    /// Decrypt every `test_file_<n>.txt` in a directory
    DecryptAll(BatchArgs),
    /// Write fixture files `test_file_1.txt ..= test_file_<count>.txt`
    CreateTestFiles(FixtureArgs),
    /// Run a single serialized task (used by fan-out mode)
    #[command(hide = true)]
    Worker {
        #[arg(long)]
        in_place: bool,
        token: String,
    },
}

#[derive(Args, Debug)]
struct PathArgs {
    /// Files to transform
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Directory holding the fixture files
    #[arg(long, default_value = "test")]
    dir: PathBuf,

    /// Highest fixture index to look for
    #[arg(long, default_value_t = DEFAULT_TEST_FILE_COUNT)]
    count: usize,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args, Debug)]
struct FixtureArgs {
    #[arg(long, default_value = "test")]
    dir: PathBuf,

    #[arg(long, default_value_t = DEFAULT_TEST_FILE_COUNT)]
    count: usize,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Execution strategy
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Worker threads for pooled mode
    #[arg(long)]
    workers: Option<usize>,

    /// Units joined per wait
    #[arg(long)]
    batch_size: Option<usize>,

    /// Truncate and rewrite files directly instead of replacing them atomically
    #[arg(long)]
    in_place: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Sequential,
    Pooled,
    FanOut,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match cli.command {
        Command::Encrypt(args) => run_paths(Action::Encrypt, args),
        Command::Decrypt(args) => run_paths(Action::Decrypt, args),
        Command::EncryptAll(args) => run_batch(Action::Encrypt, args),
        Command::DecryptAll(args) => run_batch(Action::Decrypt, args),
        Command::CreateTestFiles(args) => {
            create_test_files(&args.dir, args.count)?;
            Ok(true)
        }
        Command::Worker { in_place, token } => {
            let engine = build_engine(in_place)?;
            match worker::run_token(&token, &engine) {
                Ok(_) => Ok(true),
                Err(e) => {
                    log::error!("worker failed: {e}");
                    Ok(false)
                }
            }
        }
    }
}

fn run_paths(action: Action, args: PathArgs) -> Result<bool> {
    let mode = args.run.mode.unwrap_or(Mode::Sequential);
    let mut orchestrator = build_orchestrator(&args.run, mode)?;
    let mut all_opened = true;

    for path in args.paths {
        match Task::open(&path, action) {
            Ok(task) => orchestrator.submit(task),
            Err(e) => {
                println!("{action} {}: {e}", path.display());
                all_opened = false;
            }
        }
    }

    let summary = execute(&mut orchestrator, &args.run, mode)?;
    Ok(report(&summary) && all_opened)
}

fn run_batch(action: Action, args: BatchArgs) -> Result<bool> {
    let mode = args.run.mode.unwrap_or(Mode::FanOut);
    let mut orchestrator = build_orchestrator(&args.run, mode)?;

    for index in 1..=args.count {
        let path = fixture_path(&args.dir, index);
        match Task::open(&path, action) {
            Ok(task) => orchestrator.submit(task),
            Err(CryptError::FileNotFound(_)) => {
                log::warn!("skipping {}: not found", path.display());
            }
            Err(e) => log::warn!("skipping {}: {e}", path.display()),
        }
    }

    let summary = execute(&mut orchestrator, &args.run, mode)?;
    Ok(report(&summary))
}

fn execute(orchestrator: &mut Orchestrator, run: &RunArgs, mode: Mode) -> Result<RunSummary> {
    let summary = match mode {
        Mode::Sequential => orchestrator.execute_sequentially(),
        Mode::Pooled => orchestrator.execute_pooled()?,
        Mode::FanOut => {
            let mut launcher =
                ProcessLauncher::current_exe().context("locating the running executable")?;
            if run.in_place {
                launcher = launcher.arg("--in-place");
            }
            orchestrator.execute_with_fan_out(&mut launcher)
        }
    };
    Ok(summary)
}

fn build_engine(in_place: bool) -> Result<Engine> {
    let write_mode = if in_place {
        WriteMode::InPlace
    } else {
        WriteMode::Atomic
    };
    let engine = Engine::new(&passphrase_from_env()).context("deriving the encryption key")?;
    Ok(engine.with_write_mode(write_mode))
}

/// Children derive their own key, so fan-out runs skip it here.
fn build_orchestrator(run: &RunArgs, mode: Mode) -> Result<Orchestrator> {
    let mut builder = OrchestratorConfig::builder();
    if let Some(workers) = run.workers {
        builder = builder.workers(workers);
    }
    if let Some(batch_size) = run.batch_size {
        builder = builder.batch_size(batch_size);
    }
    let config = builder.build()?;

    if mode == Mode::FanOut {
        return Ok(Orchestrator::launch_only(config));
    }
    Ok(Orchestrator::new(build_engine(run.in_place)?, config))
}

/// Print one line per task plus a total. Returns whether everything succeeded.
fn report(summary: &RunSummary) -> bool {
    for outcome in &summary.outcomes {
        let path = outcome.path().display();
        match &outcome.status {
            TaskStatus::Completed => println!("{} {path}: ok", outcome.action()),
            TaskStatus::Failed(e) | TaskStatus::LaunchFailed(e) => {
                println!("{} {path}: {e}", outcome.action())
            }
            TaskStatus::WaitAborted | TaskStatus::Launched => {
                println!("{} {path}: not confirmed (wait aborted)", outcome.action())
            }
        }
    }

    if let Some(e) = &summary.wait_error {
        println!("{e}");
    }
    println!(
        "{} of {} tasks completed",
        summary.succeeded(),
        summary.total()
    );
    summary.is_success()
}

fn fixture_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{TEST_FILE_PREFIX}{index}.txt"))
}

fn create_test_files(dir: &Path, count: usize) -> Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    for index in 1..=count {
        let path = fixture_path(dir, index);
        let body = format!(
            "This is test file number {index} for encryption/decryption testing.\n\
             Content: Lorem ipsum dolor sit amet, consectetur adipiscing elit.\n\
             Random data: {}\n",
            (index * 123) % 1000
        );
        std::fs::write(&path, body).with_context(|| format!("writing {}", path.display()))?;
    }

    println!("Created {count} test files in {}", dir.display());
    Ok(())
}
