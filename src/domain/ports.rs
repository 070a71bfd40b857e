use crate::domain::model::{CommandOutput, CommandSpec, CommandStatus};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

/// Seam between the orchestration logic and the operating system.
/// The real implementation spawns processes; tests substitute a
/// scripted runner that records every invocation.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run a command and capture its output. Used for version probes.
    async fn output(&self, spec: &CommandSpec) -> Result<CommandOutput>;

    /// Run a command with inherited stdio and wait for it. Used for the
    /// build, install, and extraction steps so their output reaches the
    /// console directly.
    async fn status(&self, spec: &CommandSpec) -> Result<CommandStatus>;
}

pub trait ConfigProvider: Send + Sync {
    fn workspace_root(&self) -> &Path;
    fn maven_bin(&self) -> &str;
    fn java_bin(&self) -> &str;
    fn python_bin(&self) -> &str;
    /// Maven module directory, relative to the workspace root.
    fn module_dir(&self) -> &Path;
    fn main_class(&self) -> &str;
    /// Virtual environment directory, relative to the workspace root.
    fn venv_dir(&self) -> &Path;
    fn pdf_dependency(&self) -> &str;
    /// Extraction script path, relative to the workspace root.
    fn extractor_script(&self) -> &Path;
}
