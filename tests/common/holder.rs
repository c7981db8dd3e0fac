//! Drives the `lock-holder` binary from async tests.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;

const HOLDER_BIN: &str = env!("CARGO_BIN_EXE_lock-holder");

/// Upper bound for any single step of a holder that is expected to make
/// progress.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(5);

/// A running `lock-holder` process with piped stdio.
pub struct Holder {
    child: Child,
    stdin: Option<ChildStdin>,
    lines: Lines<BufReader<ChildStdout>>,
}

impl Holder {
    /// Starts a holder on `path` in `mode` (`"block"` or `"try"`).
    pub fn spawn(path: &Path, mode: &str) -> Self {
        let mut child = Command::new(HOLDER_BIN)
            .arg(path)
            .args(["--mode", mode])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .expect("failed to spawn lock-holder");

        let stdin = child.stdin.take();
        let stdout = child.stdout.take().expect("stdout is piped");

        Self {
            child,
            stdin,
            lines: BufReader::new(stdout).lines(),
        }
    }

    /// Waits up to `within` for the next stdout line.
    ///
    /// Returns `None` on timeout; the line is not lost and a later call
    /// still sees it.
    pub async fn next_line(&mut self, within: Duration) -> Option<String> {
        match timeout(within, self.lines.next_line()).await {
            Ok(line) => line.expect("failed to read holder stdout"),
            Err(_) => None,
        }
    }

    /// Asserts that the next stdout line is `expected`, arriving within
    /// [`STEP_TIMEOUT`].
    pub async fn expect_line(&mut self, expected: &str) {
        let line = self.next_line(STEP_TIMEOUT).await;
        assert_eq!(line.as_deref(), Some(expected));
    }

    /// Sends one line on the holder's stdin.
    pub async fn send_line(&mut self) {
        let stdin = self.stdin.as_mut().expect("stdin already closed");
        stdin.write_all(b"\n").await.expect("failed to write stdin");
        stdin.flush().await.expect("failed to flush stdin");
    }

    /// Closes stdin and waits for the process to exit.
    pub async fn wait(mut self) -> ExitStatus {
        drop(self.stdin.take());
        timeout(STEP_TIMEOUT, self.child.wait())
            .await
            .expect("lock-holder did not exit in time")
            .expect("failed to wait for lock-holder")
    }

    /// Kills the process without letting it unlock.
    pub async fn kill(mut self) {
        self.child.kill().await.expect("failed to kill lock-holder");
    }
}

/// Runs a holder with stdin and stdout closed: it locks, unlocks and exits
/// straight away unless the lock is unavailable.
pub async fn run_to_completion(path: &Path, mode: &str) -> ExitStatus {
    let mut child = Command::new(HOLDER_BIN)
        .arg(path)
        .args(["--mode", mode])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("failed to spawn lock-holder");

    timeout(STEP_TIMEOUT, child.wait())
        .await
        .expect("lock-holder did not exit in time")
        .expect("failed to wait for lock-holder")
}
