use crate::core::probe::{self, EnvironmentReport};
use crate::core::{java, python};
use crate::core::{ConfigProvider, ProcessRunner, Result, RunReport, StageOutcome};
use crate::utils::monitor::SystemMonitor;

/// Sequential orchestration of the toolchain: probe the environment,
/// then run the Java and Python pipelines with presence gating. Stages
/// execute one after another; a skipped stage is not a failure, a
/// failed external process is.
pub struct Orchestrator<R: ProcessRunner, C: ConfigProvider> {
    runner: R,
    config: C,
    monitor: SystemMonitor,
}

impl<R: ProcessRunner, C: ConfigProvider> Orchestrator<R, C> {
    pub fn new(runner: R, config: C) -> Self {
        Self::new_with_monitoring(runner, config, false)
    }

    pub fn new_with_monitoring(runner: R, config: C, monitor_enabled: bool) -> Self {
        Self {
            runner,
            config,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("🚀 Starting toolchain orchestration");

        let env = probe::probe_environment(&self.runner, &self.config).await;
        self.monitor.log_stage("Environment probe");

        let java_pipeline = self.run_java_stage(&env).await?;
        self.monitor.log_stage("Java pipeline");

        let python_pipeline = self.run_python_stage(&env).await?;
        self.monitor.log_stage("Python pipeline");

        let report = RunReport {
            maven_version: env.maven,
            java_version: env.java,
            python_version: env.python,
            java_pipeline,
            python_pipeline,
        };

        log_summary(&report);
        self.monitor.log_final();

        Ok(report)
    }

    async fn run_java_stage(&self, env: &EnvironmentReport) -> Result<StageOutcome> {
        if !env.java_pipeline_ready() {
            let reason = format!("missing prerequisites: {}", env.missing_java_tools().join(", "));
            tracing::warn!("⏭️ Skipping Java pipeline ({})", reason);
            return Ok(StageOutcome::skipped(reason));
        }

        java::run(&self.runner, &self.config).await?;
        Ok(StageOutcome::completed("instruction signatures regenerated"))
    }

    async fn run_python_stage(&self, env: &EnvironmentReport) -> Result<StageOutcome> {
        if !env.python_pipeline_ready() {
            let reason = "missing prerequisite: python".to_string();
            tracing::warn!("⏭️ Skipping Python pipeline ({})", reason);
            return Ok(StageOutcome::skipped(reason));
        }

        let outcome = python::run(&self.runner, &self.config).await?;
        Ok(match outcome {
            python::PythonOutcome::Extracted(pdf) => {
                StageOutcome::completed(format!("extracted text from {}", pdf.display()))
            }
            python::PythonOutcome::NoPdfFound => {
                StageOutcome::completed("no PDF manuals found; extraction skipped")
            }
        })
    }
}

fn log_summary(report: &RunReport) {
    let describe = |outcome: &StageOutcome| match outcome {
        StageOutcome::Completed { detail } => format!("completed ({})", detail),
        StageOutcome::Skipped { reason } => format!("skipped ({})", reason),
    };

    tracing::info!("Java pipeline: {}", describe(&report.java_pipeline));
    tracing::info!("Python pipeline: {}", describe(&report.python_pipeline));
}
