//! OptionsError for configuration merging

use splitdom::ColorError;

/// Error raised by a configuration value that cannot be honored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    /// A color option could not be parsed.
    #[error("Option '{option}': {source}")]
    Color {
        option: &'static str,
        #[source]
        source: ColorError,
    },

    /// More fixed columns were requested than the data has.
    #[error("Fixed column count {requested} exceeds column count {columns}")]
    FixedColumns { requested: usize, columns: usize },

    /// A column sorts with the `custom` type but no cleaner is set.
    #[error("Column {column} uses the custom sort type without a sort cleaner")]
    MissingCleaner { column: usize },
}

impl OptionsError {
    /// Creates a new color error for the named option.
    pub fn color(option: &'static str, source: ColorError) -> Self {
        Self::Color { option, source }
    }
}
