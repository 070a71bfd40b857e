use crate::core::{CommandSpec, ConfigProvider, ProcessRunner, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Result of the Python branch: either one PDF was handed to the
/// extractor, or none were found and extraction was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PythonOutcome {
    Extracted(PathBuf),
    NoPdfFound,
}

/// Layout of a virtual environment directory.
#[derive(Debug, Clone)]
pub struct VenvPaths {
    root: PathBuf,
}

impl VenvPaths {
    pub fn new(workspace: &Path, venv_dir: &Path) -> Self {
        Self {
            root: workspace.join(venv_dir),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    pub fn python(&self) -> PathBuf {
        if cfg!(windows) {
            self.bin_dir().join("python.exe")
        } else {
            self.bin_dir().join("python")
        }
    }

    /// Environment variables equivalent to sourcing the activate script:
    /// `VIRTUAL_ENV` set, venv bin dir prepended to `PATH`.
    pub fn activation_env(&self) -> Vec<(String, String)> {
        let mut path_entries = vec![self.bin_dir()];
        if let Some(existing) = std::env::var_os("PATH") {
            path_entries.extend(std::env::split_paths(&existing));
        }
        let path = std::env::join_paths(path_entries)
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|_| self.bin_dir().to_string_lossy().into_owned());

        vec![
            (
                "VIRTUAL_ENV".to_string(),
                self.root.to_string_lossy().into_owned(),
            ),
            ("PATH".to_string(), path),
        ]
    }

    fn command(&self, spec: CommandSpec) -> CommandSpec {
        let mut spec = spec;
        for (key, value) in self.activation_env() {
            spec = spec.env(key, value);
        }
        spec
    }
}

/// Provision the virtual environment, install the PDF dependency, and
/// run the extractor against the first PDF found in the workspace.
pub async fn run<R, C>(runner: &R, config: &C) -> Result<PythonOutcome>
where
    R: ProcessRunner,
    C: ConfigProvider,
{
    let workspace = config.workspace_root();
    let venv = VenvPaths::new(workspace, config.venv_dir());

    ensure_venv(runner, config, &venv).await?;
    install_pdf_dependency(runner, config, &venv).await?;

    match find_first_pdf(workspace, venv.root()) {
        Some(pdf) => {
            run_extractor(runner, config, &venv, &pdf).await?;
            Ok(PythonOutcome::Extracted(pdf))
        }
        None => {
            tracing::warn!(
                "⚠️ No PDF manuals found under {}; skipping extraction",
                workspace.display()
            );
            Ok(PythonOutcome::NoPdfFound)
        }
    }
}

/// Create the venv only if its directory does not already exist.
async fn ensure_venv<R, C>(runner: &R, config: &C, venv: &VenvPaths) -> Result<()>
where
    R: ProcessRunner,
    C: ConfigProvider,
{
    if venv.root().exists() {
        tracing::debug!("Reusing existing virtual environment at {}", venv.root().display());
        return Ok(());
    }

    tracing::info!("🐍 Creating virtual environment at {}", venv.root().display());
    let spec = CommandSpec::new(config.python_bin())
        .args(["-m", "venv"])
        .arg(venv.root().to_string_lossy())
        .current_dir(config.workspace_root());
    runner.status(&spec).await?.check(&spec)
}

/// Upgrade pip, then install the configured PDF dependency. Runs once
/// per orchestration regardless of how many PDFs are found later.
async fn install_pdf_dependency<R, C>(runner: &R, config: &C, venv: &VenvPaths) -> Result<()>
where
    R: ProcessRunner,
    C: ConfigProvider,
{
    let python = venv.python().to_string_lossy().into_owned();

    let upgrade = venv.command(
        CommandSpec::new(&python)
            .args(["-m", "pip", "install", "--upgrade", "pip"])
            .current_dir(config.workspace_root()),
    );
    runner.status(&upgrade).await?.check(&upgrade)?;

    tracing::info!("📦 Installing {}", config.pdf_dependency());
    let install = venv.command(
        CommandSpec::new(&python)
            .args(["-m", "pip", "install"])
            .arg(config.pdf_dependency())
            .current_dir(config.workspace_root()),
    );
    runner.status(&install).await?.check(&install)
}

/// Recursively enumerate `*.pdf` under the workspace and return the
/// first hit. Enumeration order is whatever the walker yields; the venv
/// directory itself is excluded from the scan.
pub fn find_first_pdf(workspace: &Path, venv_root: &Path) -> Option<PathBuf> {
    WalkDir::new(workspace)
        .into_iter()
        .filter_entry(|entry| entry.path() != venv_root)
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && has_pdf_extension(entry.path()))
        .map(|entry| entry.into_path())
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

async fn run_extractor<R, C>(runner: &R, config: &C, venv: &VenvPaths, pdf: &Path) -> Result<()>
where
    R: ProcessRunner,
    C: ConfigProvider,
{
    let script = config.workspace_root().join(config.extractor_script());
    tracing::info!("📄 Extracting text from {}", pdf.display());

    let spec = venv.command(
        CommandSpec::new(venv.python().to_string_lossy())
            .arg(script.to_string_lossy())
            .arg(pdf.to_string_lossy())
            .current_dir(config.workspace_root()),
    );
    runner.status(&spec).await?.check(&spec)
}
