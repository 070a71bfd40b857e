pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::SystemRunner, CliConfig, ToolchainConfig};
pub use core::engine::Orchestrator;
pub use core::{CommandSpec, RunReport, StageOutcome};
pub use utils::error::{Result, SigchainError};
