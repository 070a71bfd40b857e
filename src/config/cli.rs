use crate::domain::model::{CommandOutput, CommandSpec, CommandStatus};
use crate::domain::ports::ProcessRunner;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::process::Command;

/// Real process runner backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

fn build_command(spec: &CommandSpec) -> Command {
    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);
    if let Some(cwd) = &spec.cwd {
        cmd.current_dir(cwd);
    }
    for (key, value) in &spec.envs {
        cmd.env(key, value);
    }
    cmd
}

#[async_trait]
impl ProcessRunner for SystemRunner {
    async fn output(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        tracing::debug!("Capturing output of: {}", spec);
        let output = build_command(spec).output().await?;
        Ok(CommandOutput {
            status: CommandStatus {
                success: output.status.success(),
                code: output.status.code(),
            },
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    async fn status(&self, spec: &CommandSpec) -> Result<CommandStatus> {
        tracing::debug!("Running: {}", spec);
        let status = build_command(spec).status().await?;
        Ok(CommandStatus {
            success: status.success(),
            code: status.code(),
        })
    }
}
