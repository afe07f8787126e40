//! External command execution with a bounded wait.
//!
//! ```ignore
//! use crate::utils::exec::{Cmd, Finished};
//!
//! match Cmd::from_slice(&["java", "-jar", "epubcheck.jar"])
//!     .arg(&archive)
//!     .timeout(Duration::from_secs(60))
//!     .run()?
//! {
//!     Finished::Exited(output) => { /* inspect output.status */ }
//!     Finished::TimedOut(elapsed) => { /* child was killed */ }
//! }
//! ```

use std::{
    ffi::{OsStr, OsString},
    io::{self, Read},
    path::{Path, PathBuf},
    process::{Child, Command, Output, Stdio},
    sync::OnceLock,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use regex::Regex;

/// Poll interval while waiting for a child with a deadline.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Debug, Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    timeout: Option<Duration>,
}

/// How a command run ended.
#[derive(Debug)]
pub enum Finished {
    /// Process exited on its own; output fully captured.
    Exited(Output),
    /// Deadline passed; the process was killed.
    TimedOut(Duration),
}

impl Cmd {
    /// Create from a command array (e.g., `["java", "-jar", "x.jar"]`).
    pub fn from_slice<S: AsRef<OsStr>>(cmd: &[S]) -> Self {
        let mut iter = cmd.iter();
        let program = iter
            .next()
            .map(|s| s.as_ref().to_owned())
            .unwrap_or_default();
        let args: Vec<_> = iter.map(|s| s.as_ref().to_owned()).collect();
        Self {
            program,
            args,
            ..Default::default()
        }
    }

    /// Add a single argument, passed through verbatim even when empty.
    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_owned());
        self
    }

    /// Set working directory.
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Kill the process if it runs longer than `limit`.
    pub fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    /// Program name for messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Locate the program on `PATH` (or check an explicit path).
    pub fn resolve(&self) -> Result<PathBuf, which::Error> {
        which::which(&self.program)
    }

    /// Spawn with piped output and wait, honoring the timeout if set.
    pub fn run(self) -> io::Result<Finished> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn()?;

        // Drain pipes on their own threads so a chatty child never blocks
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.timeout {
            Some(limit) => match wait_deadline(&mut child, limit)? {
                Some(status) => status,
                // Grandchildren may still hold the pipes; leave the readers detached
                None => return Ok(Finished::TimedOut(limit)),
            },
            None => child.wait()?,
        };

        Ok(Finished::Exited(Output {
            status,
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        }))
    }
}

/// Poll `child` until it exits or `limit` elapses. On timeout the child is
/// killed and reaped, and `None` is returned.
fn wait_deadline(
    child: &mut Child,
    limit: Duration,
) -> io::Result<Option<std::process::ExitStatus>> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

// ============================================================================
// Helpers
// ============================================================================

/// Strip ANSI escape codes from string.
pub fn strip_ansi(s: &str) -> std::borrow::Cow<'_, str> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").unwrap());
    re.replace_all(s, "")
}

/// Combined, trimmed stdout + stderr text of a finished command.
pub fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let parts: Vec<_> = [stdout.trim(), stderr.trim()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    strip_ansi(&parts.join("\n")).into_owned()
}

// ============================================================================
// Tests
// ============================================================================
