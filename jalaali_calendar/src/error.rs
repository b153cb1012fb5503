use thiserror::Error;

/// The single failure kind of the converter.
///
/// Malformed input and out-of-range values collapse into the same variant;
/// callers only need to know that the date was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateError {
    #[error("invalid date format: {input:?}")]
    InvalidDateFormat { input: String },
}

impl DateError {
    pub(crate) fn invalid(input: impl Into<String>) -> Self {
        Self::InvalidDateFormat {
            input: input.into(),
        }
    }

    /// The rejected input, as it was handed to the converter
    pub fn input(&self) -> &str {
        match self {
            Self::InvalidDateFormat { input } => input,
        }
    }
}
