pub mod cli;
pub mod file;

use crate::config::file::FileConfig;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    self, validate_non_empty_string, validate_relative_path, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_MAVEN_BIN: &str = "mvn";
pub const DEFAULT_JAVA_BIN: &str = "java";
pub const DEFAULT_PYTHON_BIN: &str = "python";
pub const DEFAULT_MODULE_DIR: &str = "SignatureGenerator";
pub const DEFAULT_MAIN_CLASS: &str = "converter.Main";
pub const DEFAULT_VENV_DIR: &str = "venv";
pub const DEFAULT_PDF_DEPENDENCY: &str = "pypdf";
pub const DEFAULT_EXTRACTOR_SCRIPT: &str = "extract_pdf.py";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "sigchain")]
#[command(about = "Build/run orchestrator for the instruction signature toolchain")]
pub struct CliConfig {
    #[arg(long, default_value = ".", help = "Workspace root to orchestrate")]
    pub workspace: PathBuf,

    #[arg(long, help = "Explicit path to a sigchain.toml config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log per-stage resource usage")]
    pub monitor: bool,

    #[arg(long, help = "Write a JSON run summary to this path")]
    pub summary: Option<PathBuf>,
}

/// Fully resolved orchestrator configuration: CLI arguments layered over
/// an optional sigchain.toml, with built-in defaults filling the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolchainConfig {
    pub workspace_root: PathBuf,
    pub maven_bin: String,
    pub java_bin: String,
    pub python_bin: String,
    pub module_dir: PathBuf,
    pub main_class: String,
    pub venv_dir: PathBuf,
    pub pdf_dependency: String,
    pub extractor_script: PathBuf,
}

impl ToolchainConfig {
    pub fn resolve(cli: &CliConfig, file: Option<FileConfig>) -> Self {
        let file = file.unwrap_or_default();
        let tools = file.tools.unwrap_or_default();
        let java = file.java.unwrap_or_default();
        let python = file.python.unwrap_or_default();

        Self {
            workspace_root: cli.workspace.clone(),
            maven_bin: tools.maven.unwrap_or_else(|| DEFAULT_MAVEN_BIN.to_string()),
            java_bin: tools.java.unwrap_or_else(|| DEFAULT_JAVA_BIN.to_string()),
            python_bin: tools
                .python
                .unwrap_or_else(|| DEFAULT_PYTHON_BIN.to_string()),
            module_dir: java
                .module_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MODULE_DIR)),
            main_class: java
                .main_class
                .unwrap_or_else(|| DEFAULT_MAIN_CLASS.to_string()),
            venv_dir: python
                .venv_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_VENV_DIR)),
            pdf_dependency: python
                .pdf_dependency
                .unwrap_or_else(|| DEFAULT_PDF_DEPENDENCY.to_string()),
            extractor_script: python
                .extractor_script
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXTRACTOR_SCRIPT)),
        }
    }
}

impl ConfigProvider for ToolchainConfig {
    fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    fn maven_bin(&self) -> &str {
        &self.maven_bin
    }

    fn java_bin(&self) -> &str {
        &self.java_bin
    }

    fn python_bin(&self) -> &str {
        &self.python_bin
    }

    fn module_dir(&self) -> &Path {
        &self.module_dir
    }

    fn main_class(&self) -> &str {
        &self.main_class
    }

    fn venv_dir(&self) -> &Path {
        &self.venv_dir
    }

    fn pdf_dependency(&self) -> &str {
        &self.pdf_dependency
    }

    fn extractor_script(&self) -> &Path {
        &self.extractor_script
    }
}

impl Validate for ToolchainConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_dir_exists("workspace", &self.workspace_root)?;
        validate_non_empty_string("maven_bin", &self.maven_bin)?;
        validate_non_empty_string("java_bin", &self.java_bin)?;
        validate_non_empty_string("python_bin", &self.python_bin)?;
        validate_non_empty_string("main_class", &self.main_class)?;
        validate_non_empty_string("pdf_dependency", &self.pdf_dependency)?;
        validate_relative_path("module_dir", &self.module_dir)?;
        validate_relative_path("venv_dir", &self.venv_dir)?;
        validate_relative_path("extractor_script", &self.extractor_script)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli_for(workspace: &Path) -> CliConfig {
        CliConfig {
            workspace: workspace.to_path_buf(),
            config: None,
            verbose: false,
            monitor: false,
            summary: None,
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let cli = cli_for(Path::new("."));
        let config = ToolchainConfig::resolve(&cli, None);

        assert_eq!(config.maven_bin, "mvn");
        assert_eq!(config.python_bin, "python");
        assert_eq!(config.module_dir, PathBuf::from("SignatureGenerator"));
        assert_eq!(config.main_class, "converter.Main");
        assert_eq!(config.venv_dir, PathBuf::from("venv"));
        assert_eq!(config.pdf_dependency, "pypdf");
    }

    #[test]
    fn test_file_values_override_defaults() {
        let file: FileConfig = toml::from_str(
            r#"
            [tools]
            python = "python3"

            [python]
            venv_dir = ".venv"
            "#,
        )
        .unwrap();

        let cli = cli_for(Path::new("."));
        let config = ToolchainConfig::resolve(&cli, Some(file));

        assert_eq!(config.python_bin, "python3");
        assert_eq!(config.venv_dir, PathBuf::from(".venv"));
        // Untouched sections keep their defaults.
        assert_eq!(config.maven_bin, "mvn");
        assert_eq!(config.pdf_dependency, "pypdf");
    }

    #[test]
    fn test_validate_rejects_missing_workspace() {
        let cli = cli_for(Path::new("/nonexistent/workspace/path"));
        let config = ToolchainConfig::resolve(&cli, None);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_absolute_venv_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let cli = cli_for(temp.path());
        let mut config = ToolchainConfig::resolve(&cli, None);
        config.venv_dir = if cfg!(windows) {
            PathBuf::from("C:\\venv")
        } else {
            PathBuf::from("/opt/venv")
        };
        assert!(config.validate().is_err());
    }
}
