use clap::Parser;
use sigchain::config::file::{self, FileConfig};
use sigchain::utils::{logger, validation::Validate};
use sigchain::{CliConfig, Orchestrator, SystemRunner, ToolchainConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting sigchain");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let file_config = match load_file_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load config file: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let config = ToolchainConfig::resolve(&cli, file_config);
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = cli.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let runner = SystemRunner::new();
    let engine = Orchestrator::new_with_monitoring(runner, config, monitor_enabled);

    match engine.run().await {
        Ok(report) => {
            if let Some(path) = &cli.summary {
                std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
                tracing::info!("📁 Run summary written to {}", path.display());
            }
            println!("✅ Toolchain orchestration finished");
        }
        Err(e) => {
            tracing::error!(
                "❌ Orchestration failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                sigchain::utils::error::ErrorSeverity::Low => 0,
                sigchain::utils::error::ErrorSeverity::Medium => 2,
                sigchain::utils::error::ErrorSeverity::High => 1,
                sigchain::utils::error::ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn load_file_config(cli: &CliConfig) -> sigchain::Result<Option<FileConfig>> {
    match &cli.config {
        // An explicitly named file must exist and parse.
        Some(path) => Ok(Some(file::load(path)?)),
        None => file::discover(&cli.workspace),
    }
}
