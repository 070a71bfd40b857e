use crate::core::{CommandSpec, ConfigProvider, ProcessRunner};

/// The three executables the toolchain depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Maven,
    Java,
    Python,
}

impl Tool {
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Maven => "Maven",
            Tool::Java => "Java",
            Tool::Python => "Python",
        }
    }

    /// Argument that makes the tool print its version and exit.
    /// Note `java` takes a single dash and prints to stderr.
    pub fn version_args(&self) -> &'static [&'static str] {
        match self {
            Tool::Maven => &["--version"],
            Tool::Java => &["-version"],
            Tool::Python => &["--version"],
        }
    }

    pub fn remediation(&self) -> &'static str {
        match self {
            Tool::Maven => {
                "install Apache Maven (https://maven.apache.org/install.html) and ensure \
                 'mvn' is on PATH; the signature generator build will be skipped"
            }
            Tool::Java => {
                "install a JDK (e.g. Temurin 17+) and ensure 'java' is on PATH; the \
                 signature generator will be skipped"
            }
            Tool::Python => {
                "install Python 3 and ensure 'python' is on PATH; PDF extraction will \
                 be skipped"
            }
        }
    }

    /// Pull a short version string out of the tool's banner.
    fn parse_version(&self, stdout: &str, stderr: &str) -> Option<String> {
        match self {
            // "Apache Maven 3.9.9 (8e8579a9e76f7d01...)"
            Tool::Maven => stdout
                .lines()
                .next()
                .and_then(|line| line.split_whitespace().nth(2))
                .map(str::to_string),
            // `java -version` writes to stderr:
            //   openjdk version "21.0.2" 2024-01-16
            Tool::Java => {
                let banner = if stderr.trim().is_empty() { stdout } else { stderr };
                banner
                    .lines()
                    .next()
                    .and_then(|line| line.split('"').nth(1))
                    .map(str::to_string)
            }
            // "Python 3.12.1" (Python 2 printed this to stderr)
            Tool::Python => {
                let banner = if stdout.trim().is_empty() { stderr } else { stdout };
                banner
                    .lines()
                    .next()
                    .and_then(|line| line.split_whitespace().nth(1))
                    .map(str::to_string)
            }
        }
    }
}

/// Probe a single tool: run its version query and treat any failure
/// (spawn error or non-zero exit) as unavailable. `Some` carries the
/// parsed version, falling back to "unknown" when the banner is odd.
pub async fn probe_tool<R: ProcessRunner>(runner: &R, bin: &str, tool: Tool) -> Option<String> {
    let spec = CommandSpec::new(bin).args(tool.version_args().iter().copied());
    match runner.output(&spec).await {
        Ok(output) if output.status.success => Some(
            tool.parse_version(&output.stdout, &output.stderr)
                .unwrap_or_else(|| "unknown".to_string()),
        ),
        _ => None,
    }
}

/// Availability of all three tools, version string per available tool.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentReport {
    pub maven: Option<String>,
    pub java: Option<String>,
    pub python: Option<String>,
}

impl EnvironmentReport {
    pub fn java_pipeline_ready(&self) -> bool {
        self.maven.is_some() && self.java.is_some()
    }

    pub fn python_pipeline_ready(&self) -> bool {
        self.python.is_some()
    }

    pub fn missing_java_tools(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.maven.is_none() {
            missing.push("mvn");
        }
        if self.java.is_none() {
            missing.push("java");
        }
        missing
    }
}

/// Check all three prerequisites, logging a confirmation or a warning
/// with remediation guidance per tool. Console output is the only side
/// effect.
pub async fn probe_environment<R, C>(runner: &R, config: &C) -> EnvironmentReport
where
    R: ProcessRunner,
    C: ConfigProvider,
{
    tracing::info!("🔎 Checking toolchain prerequisites...");

    let checks = [
        (Tool::Maven, config.maven_bin()),
        (Tool::Java, config.java_bin()),
        (Tool::Python, config.python_bin()),
    ];

    let mut report = EnvironmentReport::default();
    for (tool, bin) in checks {
        match probe_tool(runner, bin, tool).await {
            Some(version) => {
                tracing::info!("✅ {} available ({})", tool.display_name(), version);
                let slot = match tool {
                    Tool::Maven => &mut report.maven,
                    Tool::Java => &mut report.java,
                    Tool::Python => &mut report.python,
                };
                *slot = Some(version);
            }
            None => {
                tracing::warn!(
                    "⚠️ {} not found ('{}' did not run): {}",
                    tool.display_name(),
                    bin,
                    tool.remediation()
                );
            }
        }
    }

    report
}
