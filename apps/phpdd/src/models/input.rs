//! Analysis result document: the hand-off between the analyzer and the
//! printers when they run as separate processes.

use super::Report;
use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Reports in scan order plus every file the analyzer looked at.
pub struct AnalysisResult {
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default)]
    pub scanned_files: Vec<String>,
}

/// Load an `AnalysisResult` from a `.json`, `.yaml|.yml` or `.toml` file.
pub fn load_file(path: &Path) -> Result<AnalysisResult, InputError> {
    let content = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    tracing::debug!("loading analysis result from {} ({ext})", path.display());
    match ext.as_str() {
        "json" => Ok(serde_json::from_str(&content)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(&content)?),
        "toml" => Ok(toml::from_str(&content)?),
        other => Err(InputError::UnsupportedExtension {
            ext: other.to_string(),
            path: path.to_path_buf(),
        }),
    }
}

/// Read a JSON `AnalysisResult` from any reader (stdin in the CLI).
pub fn load_reader<R: Read>(mut reader: R) -> Result<AnalysisResult, InputError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(InputError::Stdin)?;
    Ok(serde_json::from_str(&content)?)
}
