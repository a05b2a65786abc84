use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while producing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[cfg(feature = "html")]
    #[error("Failed to render the report template: {0}")]
    Template(#[from] tera::Error),

    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed results file '{}': {source}", path.display())]
    Results {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Report step has no working directory.")]
    MissingWorkdir,

    /// A report backend was requested but its support is not compiled in
    #[error("{0}")]
    MissingDependency(String),

    #[error("{0}")]
    Browser(String),
}

impl ReportError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
