pub mod engine;
pub mod java;
pub mod probe;
pub mod python;

pub use crate::domain::model::{
    CommandOutput, CommandSpec, CommandStatus, RunReport, StageOutcome,
};
pub use crate::domain::ports::{ConfigProvider, ProcessRunner};
pub use crate::utils::error::Result;
