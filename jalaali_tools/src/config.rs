use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::ToolError;

pub const DEFAULT_INVALID_MESSAGE: &str = "تاریخ وارد شده معتبر نیست";

/// Settings read from the optional `--config` JSON file.
///
/// ```json
/// { "logLevel": "debug", "jsonOutput": false, "persianDigits": true }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ToolConfig {
    /// `EnvFilter` directive; `None` leaves the choice to `RUST_LOG`
    pub log_level: Option<String>,
    pub json_output: bool,
    pub persian_digits: bool,
    pub invalid_message: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            log_level: None,
            json_output: false,
            persian_digits: false,
            invalid_message: DEFAULT_INVALID_MESSAGE.to_string(),
        }
    }
}

impl ToolConfig {
    pub fn load(path: &Path) -> Result<Self, ToolError> {
        let text = fs::read_to_string(path).map_err(|source| ToolError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ToolError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// File settings (or defaults) with command line flags applied on top.
    pub fn resolve(cli: &Cli) -> Result<Self, ToolError> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(level) = &cli.log_level {
            config.log_level = Some(level.clone());
        }
        config.json_output |= cli.json;
        config.persian_digits |= cli.persian_digits;

        config.log_filter()?;
        Ok(config)
    }

    /// The configured log directive as a filter; `None` when unset.
    pub fn log_filter(&self) -> Result<Option<EnvFilter>, ToolError> {
        self.log_level
            .as_deref()
            .map(|level| {
                EnvFilter::try_new(level).map_err(|source| ToolError::LogFilter {
                    directive: level.to_string(),
                    source,
                })
            })
            .transpose()
    }
}
