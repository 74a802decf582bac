use std::path::{Path, PathBuf};

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Optional `surveydash.json` next to the working directory:
///
/// ```json
/// { "data_path": "survey_sample.csv", "filter_column": "State", "time_column": "Year" }
/// ```
///
/// A missing file or a file that fails to parse falls back to the defaults
/// (with a warning for the latter). The filter column doubles as the series
/// key of the trend chart when the loaded table has it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Dataset loaded at startup; None means start with the file dialog.
    pub data_path: Option<PathBuf>,
    /// Categorical column offered in the filter widget.
    pub filter_column: String,
    /// Column treated as the trend chart's time axis.
    pub time_column: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: None,
            filter_column: "State".to_string(),
            time_column: "Year".to_string(),
        }
    }
}

impl DashboardConfig {
    /// File name probed in the working directory at startup.
    pub const FILE_NAME: &'static str = "surveydash.json";

    /// Read the config from `path`, falling back to defaults when the file
    /// is absent or malformed.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed {}: {e}", path.display());
                Self::default()
            }
        }
    }
}
