use async_trait::async_trait;
use sigchain::core::{CommandOutput, CommandSpec, CommandStatus, ProcessRunner};
use sigchain::{Orchestrator, SigchainError, StageOutcome, ToolchainConfig};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Process runner double: version probes succeed only for the declared
/// "available" programs, every other invocation is recorded and
/// succeeds unless its command line matches `fail_when`. Clones share
/// the call log, so a handle kept outside the engine sees everything.
#[derive(Clone)]
struct ScriptedRunner {
    available: HashSet<String>,
    fail_when: Option<String>,
    calls: Arc<Mutex<Vec<CommandSpec>>>,
}

impl ScriptedRunner {
    fn new(available: &[&str]) -> Self {
        Self {
            available: available.iter().map(|s| s.to_string()).collect(),
            fail_when: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn failing_on(mut self, needle: &str) -> Self {
        self.fail_when = Some(needle.to_string());
        self
    }

    fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    fn count_matching(&self, needle: &str) -> usize {
        self.calls()
            .iter()
            .filter(|spec| spec.display_line().contains(needle))
            .count()
    }

    fn record(&self, spec: &CommandSpec) {
        self.calls.lock().unwrap().push(spec.clone());
    }
}

fn version_banner(program: &str) -> (String, String) {
    if program.contains("mvn") {
        ("Apache Maven 3.9.9 (release)\n".to_string(), String::new())
    } else if program.contains("java") {
        (
            String::new(),
            "openjdk version \"21.0.2\" 2024-01-16\n".to_string(),
        )
    } else {
        ("Python 3.12.1\n".to_string(), String::new())
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn output(&self, spec: &CommandSpec) -> sigchain::Result<CommandOutput> {
        self.record(spec);
        if self.available.contains(&spec.program) {
            let (stdout, stderr) = version_banner(&spec.program);
            Ok(CommandOutput {
                status: CommandStatus::ok(),
                stdout,
                stderr,
            })
        } else {
            Err(SigchainError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: command not found", spec.program),
            )))
        }
    }

    async fn status(&self, spec: &CommandSpec) -> sigchain::Result<CommandStatus> {
        self.record(spec);
        if let Some(needle) = &self.fail_when {
            if spec.display_line().contains(needle) {
                return Ok(CommandStatus {
                    success: false,
                    code: Some(1),
                });
            }
        }
        Ok(CommandStatus::ok())
    }
}

fn config_for(workspace: &Path) -> ToolchainConfig {
    ToolchainConfig {
        workspace_root: workspace.to_path_buf(),
        maven_bin: "mvn".to_string(),
        java_bin: "java".to_string(),
        python_bin: "python".to_string(),
        module_dir: "SignatureGenerator".into(),
        main_class: "converter.Main".to_string(),
        venv_dir: "venv".into(),
        pdf_dependency: "pypdf".to_string(),
        extractor_script: "extract_pdf.py".into(),
    }
}

#[tokio::test]
async fn test_all_tools_missing_skips_every_action() {
    let temp = TempDir::new().unwrap();
    let runner = ScriptedRunner::new(&[]);
    let engine = Orchestrator::new(runner.clone(), config_for(temp.path()));

    let report = engine.run().await.unwrap();

    assert!(matches!(report.java_pipeline, StageOutcome::Skipped { .. }));
    assert!(matches!(report.python_pipeline, StageOutcome::Skipped { .. }));
    assert!(report.maven_version.is_none());
    assert!(report.python_version.is_none());

    // Exactly the three version probes; no build, install, or
    // extraction was attempted.
    assert_eq!(runner.calls().len(), 3);
    assert_eq!(runner.count_matching("-m venv"), 0);
    assert_eq!(runner.count_matching("clean package"), 0);
    assert_eq!(runner.count_matching("pip install"), 0);
}

#[tokio::test]
async fn test_java_pipeline_runs_and_no_pdf_warns() {
    let temp = TempDir::new().unwrap();
    let runner = ScriptedRunner::new(&["mvn", "java", "python"]);
    let engine = Orchestrator::new(runner.clone(), config_for(temp.path()));

    let report = engine.run().await.unwrap();

    // Build + exec:java, in that order, each exactly once.
    assert_eq!(runner.count_matching("clean package"), 1);
    assert_eq!(runner.count_matching("exec:java"), 1);
    assert_eq!(runner.count_matching("-Dexec.mainClass=converter.Main"), 1);
    assert!(report.java_pipeline.is_completed());

    // No PDF in the workspace: extraction skipped, but the branch still
    // completed and the dependency install happened exactly once.
    assert!(report.python_pipeline.is_completed());
    assert_eq!(runner.count_matching("extract_pdf.py"), 0);
    assert_eq!(runner.count_matching("pip install pypdf"), 1);

    match &report.python_pipeline {
        StageOutcome::Completed { detail } => assert!(detail.contains("no PDF")),
        other => panic!("expected completed python stage, got {:?}", other),
    }
}

#[tokio::test]
async fn test_existing_venv_is_not_recreated() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("venv")).unwrap();

    let runner = ScriptedRunner::new(&["python"]);
    let engine = Orchestrator::new(runner.clone(), config_for(temp.path()));

    engine.run().await.unwrap();

    assert_eq!(runner.count_matching("-m venv"), 0);
    // Provisioning still upgraded pip and installed the dependency.
    assert_eq!(runner.count_matching("--upgrade pip"), 1);
    assert_eq!(runner.count_matching("pip install pypdf"), 1);
}

#[tokio::test]
async fn test_missing_venv_is_created() {
    let temp = TempDir::new().unwrap();
    let runner = ScriptedRunner::new(&["python"]);
    let engine = Orchestrator::new(runner.clone(), config_for(temp.path()));

    engine.run().await.unwrap();

    assert_eq!(runner.count_matching("-m venv"), 1);
}

#[tokio::test]
async fn test_multiple_pdfs_extract_exactly_one() {
    let temp = TempDir::new().unwrap();
    let docs = temp.path().join("docs");
    fs::create_dir_all(&docs).unwrap();
    fs::write(docs.join("vol1.pdf"), b"%PDF-1.7").unwrap();
    fs::write(docs.join("vol2.pdf"), b"%PDF-1.7").unwrap();
    fs::write(temp.path().join("vol3.pdf"), b"%PDF-1.7").unwrap();

    let runner = ScriptedRunner::new(&["python"]);
    let engine = Orchestrator::new(runner.clone(), config_for(temp.path()));

    let report = engine.run().await.unwrap();

    // Exactly one extractor invocation, with a single PDF argument.
    assert_eq!(runner.count_matching("extract_pdf.py"), 1);
    let extractor_call = runner
        .calls()
        .into_iter()
        .find(|spec| spec.display_line().contains("extract_pdf.py"))
        .unwrap();
    assert!(extractor_call
        .args
        .last()
        .unwrap()
        .to_lowercase()
        .ends_with(".pdf"));

    // One install regardless of PDF count.
    assert_eq!(runner.count_matching("pip install pypdf"), 1);
    assert!(report.python_pipeline.is_completed());
}

#[tokio::test]
async fn test_build_failure_aborts_the_run() {
    let temp = TempDir::new().unwrap();
    let runner = ScriptedRunner::new(&["mvn", "java", "python"]).failing_on("clean package");
    let engine = Orchestrator::new(runner.clone(), config_for(temp.path()));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, SigchainError::ExternalProcess { .. }));
    assert!(err.to_string().contains("clean package"));

    // The run aborted before the Python branch started.
    assert_eq!(runner.count_matching("-m venv"), 0);
    assert_eq!(runner.count_matching("pip install"), 0);
}

#[tokio::test]
async fn test_pip_failure_aborts_the_python_branch() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("manual.pdf"), b"%PDF-1.7").unwrap();

    let runner = ScriptedRunner::new(&["python"]).failing_on("pip install pypdf");
    let engine = Orchestrator::new(runner.clone(), config_for(temp.path()));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, SigchainError::ExternalProcess { .. }));

    // Extraction never ran.
    assert_eq!(runner.count_matching("extract_pdf.py"), 0);
}

#[tokio::test]
async fn test_java_missing_still_runs_python_branch() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("manual.pdf"), b"%PDF-1.7").unwrap();

    let runner = ScriptedRunner::new(&["python"]);
    let engine = Orchestrator::new(runner.clone(), config_for(temp.path()));

    let report = engine.run().await.unwrap();

    assert!(matches!(report.java_pipeline, StageOutcome::Skipped { .. }));
    assert!(report.python_pipeline.is_completed());
    assert_eq!(report.python_version.as_deref(), Some("3.12.1"));
    assert_eq!(runner.count_matching("clean package"), 0);
    assert_eq!(runner.count_matching("extract_pdf.py"), 1);
}
