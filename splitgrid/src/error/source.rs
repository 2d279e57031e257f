//! SourceError for input adapters

use crate::source::SourceType;

/// Error raised while normalizing source data.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Serialized input was not valid JSON.
    #[error("Source parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The input had the wrong overall shape.
    #[error("Malformed source: {message}")]
    Malformed { message: String },

    /// The input kind does not fit the configured source type.
    #[error("Source type '{source_type}' cannot read {input} input")]
    UnsupportedInput {
        source_type: SourceType,
        input: &'static str,
    },
}

impl SourceError {
    /// Creates a new malformed-source error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates a new unsupported-input error.
    pub fn unsupported(source_type: SourceType, input: &'static str) -> Self {
        Self::UnsupportedInput { source_type, input }
    }
}
