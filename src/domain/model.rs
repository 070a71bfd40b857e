use crate::utils::error::{Result, SigchainError};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Description of one external process invocation. Built by the stages,
/// executed by a [`ProcessRunner`](crate::domain::ports::ProcessRunner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub envs: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            envs: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// The command as it would appear on a shell line, for logs and errors.
    pub fn display_line(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_line())
    }
}

/// Exit status of a completed external process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn ok() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    /// Turn a non-zero exit into [`SigchainError::ExternalProcess`],
    /// naming the command that failed.
    pub fn check(self, spec: &CommandSpec) -> Result<()> {
        if self.success {
            Ok(())
        } else {
            Err(SigchainError::ExternalProcess {
                command: spec.display_line(),
                code: self.code,
            })
        }
    }
}

/// Captured output of an external process, used by the environment prober.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: CommandStatus,
    pub stdout: String,
    pub stderr: String,
}

/// What happened to one pipeline during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StageOutcome {
    Completed { detail: String },
    Skipped { reason: String },
}

impl StageOutcome {
    pub fn completed(detail: impl Into<String>) -> Self {
        Self::Completed {
            detail: detail.into(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Summary of one orchestration run, serializable via `--summary`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub maven_version: Option<String>,
    pub java_version: Option<String>,
    pub python_version: Option<String>,
    pub java_pipeline: StageOutcome,
    pub python_pipeline: StageOutcome,
}
