//! External structural validation of built archives.
//!
//! The validator is an opaque command (`java -jar epubcheck.jar` by default)
//! run with the archive path as its last argument. Its result is advisory:
//! every outcome, including a crash or a missing tool, is a [`Verdict`] and
//! never an error.

use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::utils::exec::{Cmd, Finished, combined_output};

/// Result of validating one archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Exit code 0.
    Passed { output: String },
    /// Nonzero exit (or killed by a signal, `code == None`).
    Failed { code: Option<i32>, diagnostics: String },
    /// Validator not installed or not configured; validation skipped.
    Unavailable { reason: String },
    /// Did not finish in time; the process was killed.
    TimedOut { after: Duration },
}

impl Verdict {
    #[inline]
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed { .. } => f.write_str("passed"),
            Self::Failed { code: Some(code), .. } => write!(f, "failed (exit code {code})"),
            Self::Failed { code: None, .. } => f.write_str("failed (terminated by signal)"),
            Self::Unavailable { reason } => write!(f, "skipped: {reason}"),
            Self::TimedOut { after } => write!(f, "not completed within {}s", after.as_secs()),
        }
    }
}

/// A configured validator command.
#[derive(Debug, Clone)]
pub struct Validator {
    command: Vec<String>,
    jar: Option<PathBuf>,
    workdir: Option<PathBuf>,
    timeout: Duration,
}

impl Validator {
    pub fn new(command: Vec<String>, timeout: Duration) -> Self {
        Self {
            command,
            jar: None,
            workdir: None,
            timeout,
        }
    }

    /// Append a jar to the command line; validation is skipped if it is missing.
    pub fn with_jar(mut self, jar: impl Into<PathBuf>) -> Self {
        self.jar = Some(jar.into());
        self
    }

    /// Run the validator from this directory.
    pub fn with_workdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workdir = Some(dir.into());
        self
    }

    /// Validate the archive at `archive`.
    pub fn validate(&self, archive: &Path) -> Verdict {
        if self.command.is_empty() {
            return Verdict::Unavailable {
                reason: "no validator command configured".into(),
            };
        }

        let mut cmd = Cmd::from_slice(self.command.as_slice());

        if let Some(jar) = &self.jar {
            if !jar.is_file() {
                return Verdict::Unavailable {
                    reason: format!("`{}` not found", jar.display()),
                };
            }
            cmd = cmd.arg(jar);
        }

        if cmd.resolve().is_err() {
            return Verdict::Unavailable {
                reason: format!("`{}` not found", cmd.program_name()),
            };
        }

        if let Some(dir) = &self.workdir {
            cmd = cmd.cwd(dir);
        }

        crate::debug!("validate"; "running {} on {}", cmd.program_name(), archive.display());

        match cmd.arg(archive).timeout(self.timeout).run() {
            Ok(Finished::Exited(output)) if output.status.success() => Verdict::Passed {
                output: combined_output(&output),
            },
            Ok(Finished::Exited(output)) => Verdict::Failed {
                code: output.status.code(),
                diagnostics: combined_output(&output),
            },
            Ok(Finished::TimedOut(after)) => Verdict::TimedOut { after },
            Err(e) => Verdict::Unavailable {
                reason: format!("could not start validator: {e}"),
            },
        }
    }
}
