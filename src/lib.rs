pub mod browser;
pub mod error;
pub mod paths;
pub mod render;
pub mod report;
pub mod results;
pub mod step;

pub use error::{ReportError, Result};

use serde::{Deserialize, Serialize};

/// Outcome of a single executed test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultOutcome {
    Pass,
    Fail,
    Info,
    Warn,
    Error,
}

impl ResultOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultOutcome::Pass => "pass",
            ResultOutcome::Fail => "fail",
            ResultOutcome::Info => "info",
            ResultOutcome::Warn => "warn",
            ResultOutcome::Error => "error",
        }
    }
}

impl std::fmt::Display for ResultOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
