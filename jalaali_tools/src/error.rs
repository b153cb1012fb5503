use std::path::PathBuf;

use jalaali_calendar::DateError;
use thiserror::Error;

use crate::config::ToolConfig;

/// A record of a batch file whose date could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    pub index: usize,
    pub value: String,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not valid JSON for this command: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid log filter {directive:?}: {source}")]
    LogFilter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
    #[error("could not render output: {0}")]
    Render(#[source] serde_json::Error),
    #[error(transparent)]
    InvalidDate(#[from] DateError),
    #[error("{} record(s) have an invalid date", .0.len())]
    InvalidRecords(Vec<RecordError>),
}

impl ToolError {
    /// Message shown to the user. Date errors use the configured localized text.
    pub fn user_message(&self, config: &ToolConfig) -> String {
        match self {
            Self::InvalidDate(err) => format!("{}: {}", config.invalid_message, err.input()),
            Self::InvalidRecords(records) => {
                let mut lines = vec![format!("{} ({})", config.invalid_message, records.len())];
                lines.extend(
                    records
                        .iter()
                        .map(|record| format!("  #{}: {}", record.index, record.value)),
                );
                lines.join("\n")
            }
            other => other.to_string(),
        }
    }
}
