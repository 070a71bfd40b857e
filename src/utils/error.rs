use thiserror::Error;

#[derive(Error, Debug)]
pub enum SigchainError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Config file parse error: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("External command failed: {command}")]
    ExternalProcess {
        command: String,
        code: Option<i32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    ExternalProcess,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SigchainError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigParseError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ExternalProcess { .. } => ErrorCategory::ExternalProcess,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::ExternalProcess => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ExternalProcess { command, code } => match code {
                Some(code) => format!("Command '{}' exited with code {}", command, code),
                None => format!("Command '{}' was terminated by a signal", command),
            },
            Self::ConfigParseError(e) => format!("Could not parse sigchain.toml: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::IoError(_) => {
                "Check filesystem permissions and that the workspace path is accessible".to_string()
            }
            Self::SerializationError(_) => {
                "The run summary could not be written; re-run without --summary".to_string()
            }
            Self::ConfigParseError(_) => {
                "Fix the TOML syntax in the config file, or remove it to fall back to defaults"
                    .to_string()
            }
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Adjust the offending value on the command line or in sigchain.toml".to_string()
            }
            Self::ExternalProcess { command, .. } => {
                if command.contains("pip install") {
                    "Check network connectivity and PyPI availability, then re-run".to_string()
                } else if command.contains("package") || command.contains("exec:java") {
                    "Inspect the Maven output above for compilation errors in the \
                     SignatureGenerator module"
                        .to_string()
                } else {
                    "Inspect the tool output above; the orchestrator does not retry failed steps"
                        .to_string()
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SigchainError>;
