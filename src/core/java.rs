use crate::core::{CommandSpec, ConfigProvider, ProcessRunner, Result};

/// Build the signature generator module and run its entry point.
///
/// Two Maven invocations: `clean package`, then `exec:java` with the
/// configured main class. Non-zero exits propagate as external-process
/// failures; there is no retry and no output validation.
pub async fn run<R, C>(runner: &R, config: &C) -> Result<()>
where
    R: ProcessRunner,
    C: ConfigProvider,
{
    let module_dir = config.workspace_root().join(config.module_dir());
    let pom = module_dir.join("pom.xml");
    let pom_arg = pom.to_string_lossy().into_owned();

    tracing::info!(
        "🔨 Building signature generator module at {}",
        module_dir.display()
    );
    let build = CommandSpec::new(config.maven_bin())
        .args(["-f", pom_arg.as_str(), "clean", "package"])
        .current_dir(config.workspace_root());
    runner.status(&build).await?.check(&build)?;

    tracing::info!(
        "⚙️ Regenerating instruction signatures via {}",
        config.main_class()
    );
    let exec = CommandSpec::new(config.maven_bin())
        .args([
            "-f",
            pom_arg.as_str(),
            "exec:java",
            &format!("-Dexec.mainClass={}", config.main_class()),
        ])
        .current_dir(config.workspace_root());
    runner.status(&exec).await?.check(&exec)?;

    tracing::info!("✅ Signature generation finished");
    Ok(())
}
