use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "sigchain.toml";

/// Optional on-disk overrides. Every field is optional; anything left
/// out falls back to the built-in defaults during resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub tools: Option<ToolsSection>,
    pub java: Option<JavaSection>,
    pub python: Option<PythonSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsSection {
    pub maven: Option<String>,
    pub java: Option<String>,
    pub python: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JavaSection {
    pub module_dir: Option<PathBuf>,
    pub main_class: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PythonSection {
    pub venv_dir: Option<PathBuf>,
    pub pdf_dependency: Option<String>,
    pub extractor_script: Option<PathBuf>,
}

pub fn load(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

/// Look for a `sigchain.toml` next to the workspace root. Absence is not
/// an error; an unreadable or malformed file is.
pub fn discover(workspace: &Path) -> Result<Option<FileConfig>> {
    let path = workspace.join(CONFIG_FILE_NAME);
    if path.is_file() {
        tracing::debug!("Loading config overrides from {}", path.display());
        Ok(Some(load(&path)?))
    } else {
        Ok(None)
    }
}
