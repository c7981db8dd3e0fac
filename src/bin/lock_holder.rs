//! `lock-holder`: takes an exclusive lock on a file and holds it until told
//! to let go.
//!
//! Driven over stdio so that tests (or a person at a terminal) can hold a
//! lock from a separate process:
//!
//! 1. opens `PATH` and locks it, blocking or not depending on `--mode`
//! 2. prints `locked` and waits for a line on stdin
//! 3. unlocks, prints `unlocked` and waits for another line
//!
//! EOF on stdin counts as a line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use lockapi::{lock_file, try_lock_file, unlock_file, LockError, LockFileOptions};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Exit codes. Usage errors exit with 2 through clap.
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const IO_FAILURE: u8 = 1;
    pub const WOULD_BLOCK: u8 = 3;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Wait until the lock is granted
    Block,
    /// Fail with exit code 3 if the lock is held elsewhere
    Try,
}

/// Hold an exclusive advisory lock on a file until stdin says otherwise.
#[derive(Debug, Parser)]
#[command(name = "lock-holder", version)]
struct Args {
    /// File to lock; created if missing
    path: PathBuf,

    /// How to acquire the lock
    #[arg(long, value_enum, default_value_t = Mode::Block)]
    mode: Mode,

    /// Truncate the file when opening it
    #[arg(long)]
    truncate: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    match run(&args) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(err) => {
            eprintln!("Error: {err:#}");

            let would_block = err
                .downcast_ref::<LockError>()
                .is_some_and(LockError::is_would_block);
            if would_block {
                ExitCode::from(exit_codes::WOULD_BLOCK)
            } else {
                ExitCode::from(exit_codes::IO_FAILURE)
            }
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let file = LockFileOptions::new()
        .truncate(args.truncate)
        .open(&args.path)
        .with_context(|| format!("cannot open {}", args.path.display()))?;

    debug!(path = %args.path.display(), mode = ?args.mode, "acquiring lock");
    match args.mode {
        Mode::Block => lock_file(&file)?,
        Mode::Try => try_lock_file(&file)?,
    }
    info!(path = %args.path.display(), "lock acquired");

    announce("locked")?;
    wait_for_line()?;

    unlock_file(&file)?;
    info!(path = %args.path.display(), "lock released");

    announce("unlocked")?;
    wait_for_line()?;

    Ok(())
}

fn announce(message: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{message}")?;
    stdout.flush().context("cannot flush stdout")
}

fn wait_for_line() -> anyhow::Result<()> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("cannot read stdin")?;
    Ok(())
}
