use std::fs;
use std::path::{Path, PathBuf};

use jalaali_calendar::{
    jalaali_month_range, parse_jalaali_day, parse_jalaali_month, to_gregorian_iso_date,
    to_gregorian_year_month, to_jalaali_display, to_jalaali_period_display, to_persian_digits,
    Calendar,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::cli::Commands;
use crate::config::ToolConfig;
use crate::error::{RecordError, ToolError};

pub type Record = Map<String, Value>;

/// What a command produced, before it is rendered for the terminal.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CommandOutput {
    #[serde(rename_all = "camelCase")]
    Converted {
        input: String,
        output: String,
        calendar: Calendar,
    },
    #[serde(rename_all = "camelCase")]
    Range {
        input: String,
        first: String,
        last: String,
    },
    #[serde(rename_all = "camelCase")]
    Batch {
        converted: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        written_to: Option<PathBuf>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        records: Vec<Record>,
    },
}

impl CommandOutput {
    pub fn render(&self, config: &ToolConfig) -> Result<String, ToolError> {
        if config.json_output {
            return serde_json::to_string(self).map_err(ToolError::Render);
        }

        let text = match self {
            Self::Converted {
                output, calendar, ..
            } => match calendar {
                Calendar::Jalaali if config.persian_digits => to_persian_digits(output),
                _ => output.clone(),
            },
            Self::Range { first, last, .. } => format!("{first} {last}"),
            Self::Batch {
                converted,
                written_to: Some(path),
                ..
            } => format!("{converted} record(s) written to {}", path.display()),
            Self::Batch { records, .. } => {
                serde_json::to_string_pretty(records).map_err(ToolError::Render)?
            }
        };
        Ok(text)
    }
}

pub fn run(command: &Commands) -> Result<CommandOutput, ToolError> {
    match command {
        Commands::ToGregorian { date } => to_gregorian(date),
        Commands::ToGregorianMonth { period } => to_gregorian_month(period),
        Commands::ToJalaali { date } => Ok(CommandOutput::Converted {
            input: date.clone(),
            output: to_jalaali_display(date),
            calendar: Calendar::Jalaali,
        }),
        Commands::ToJalaaliMonth { period } => Ok(CommandOutput::Converted {
            input: period.clone(),
            output: to_jalaali_period_display(period),
            calendar: Calendar::Jalaali,
        }),
        Commands::MonthRange { period } => month_range(period),
        Commands::ConvertFile {
            file,
            field,
            target,
            out,
        } => convert_file(file, field, target, out.as_deref()),
    }
}

fn to_gregorian(input: &str) -> Result<CommandOutput, ToolError> {
    let date = parse_jalaali_day(input)?;
    let output = to_gregorian_iso_date(date.year(), date.month(), date.day())?;
    info!(input, %output, "converted day");
    Ok(CommandOutput::Converted {
        input: input.to_string(),
        output,
        calendar: Calendar::Gregorian,
    })
}

fn to_gregorian_month(input: &str) -> Result<CommandOutput, ToolError> {
    let period = parse_jalaali_month(input)?;
    let output = to_gregorian_year_month(period.year(), period.month())?;
    info!(input, %output, "converted period");
    Ok(CommandOutput::Converted {
        input: input.to_string(),
        output,
        calendar: Calendar::Gregorian,
    })
}

fn month_range(input: &str) -> Result<CommandOutput, ToolError> {
    let period = parse_jalaali_month(input)?;
    let (first, last) = jalaali_month_range(period.year(), period.month())?;
    Ok(CommandOutput::Range {
        input: input.to_string(),
        first: first.format("%Y-%m-%d").to_string(),
        last: last.format("%Y-%m-%d").to_string(),
    })
}

/// Converts `field` of every record into `target`.
///
/// Either every record converts or nothing is written: a single bad date
/// rejects the batch and all offending rows are reported together.
pub fn convert_records(
    mut records: Vec<Record>,
    field: &str,
    target: &str,
) -> Result<Vec<Record>, ToolError> {
    let mut invalid = Vec::new();
    let mut converted = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        let value = record.get(field);
        let iso = value.and_then(Value::as_str).and_then(|text| {
            parse_jalaali_day(text)
                .and_then(|date| to_gregorian_iso_date(date.year(), date.month(), date.day()))
                .ok()
        });

        match iso {
            Some(iso) => converted.push(iso),
            None => invalid.push(RecordError {
                index,
                value: match value {
                    Some(Value::String(text)) => text.clone(),
                    Some(other) => other.to_string(),
                    None => format!("<missing {field}>"),
                },
            }),
        }
    }

    if !invalid.is_empty() {
        warn!(rejected = invalid.len(), total = records.len(), "batch rejected");
        return Err(ToolError::InvalidRecords(invalid));
    }

    for (record, iso) in records.iter_mut().zip(converted) {
        record.insert(target.to_string(), Value::String(iso));
    }
    Ok(records)
}

fn convert_file(
    file: &Path,
    field: &str,
    target: &str,
    out: Option<&Path>,
) -> Result<CommandOutput, ToolError> {
    let text = fs::read_to_string(file).map_err(|source| ToolError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    let records: Vec<Record> = serde_json::from_str(&text).map_err(|source| ToolError::Json {
        path: file.to_path_buf(),
        source,
    })?;

    let records = convert_records(records, field, target)?;
    let converted = records.len();
    info!(file = %file.display(), converted, "batch converted");

    match out {
        Some(path) => {
            let body = serde_json::to_string_pretty(&records).map_err(|source| ToolError::Json {
                path: path.to_path_buf(),
                source,
            })?;
            fs::write(path, body).map_err(|source| ToolError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            Ok(CommandOutput::Batch {
                converted,
                written_to: Some(path.to_path_buf()),
                records: Vec::new(),
            })
        }
        None => Ok(CommandOutput::Batch {
            converted,
            written_to: None,
            records,
        }),
    }
}
