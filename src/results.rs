use crate::error::{ReportError, Result};
use crate::ResultOutcome;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Machine a test was executed on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

/// A finished test as recorded by the execute step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    #[serde(default)]
    pub serialnumber: u32,
    pub result: ResultOutcome,
    #[serde(default)]
    pub note: Option<String>,
    /// Wall time formatted as `hh:mm:ss`
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub ids: BTreeMap<String, String>,
    /// Log files, relative to the execute step working directory
    #[serde(default)]
    pub log: Vec<PathBuf>,
    #[serde(default)]
    pub guest: Option<Guest>,
}

impl TestResult {
    pub fn new(name: impl Into<String>, result: ResultOutcome) -> Self {
        Self {
            name: name.into(),
            serialnumber: 0,
            result,
            note: None,
            duration: None,
            ids: BTreeMap::new(),
            log: Vec::new(),
            guest: None,
        }
    }
}

/// Plan the results belong to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
}

impl Plan {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: None,
        }
    }
}

/// Load results written by the execute step as a JSON array
pub fn load_results(path: &Path) -> Result<Vec<TestResult>> {
    let content = std::fs::read_to_string(path).map_err(|err| ReportError::io(path, err))?;

    serde_json::from_str(&content).map_err(|source| ReportError::Results {
        path: path.to_path_buf(),
        source,
    })
}
