pub mod config;
pub mod orchestrator;
pub mod result;
pub mod worker;

pub use config::{CompareConfig, ConfigError};
pub use orchestrator::{compare, ExactOutcome, ExactRunner, IsolationError, SubprocessRunner};
pub use result::{ComparisonResult, ExactStatus};
