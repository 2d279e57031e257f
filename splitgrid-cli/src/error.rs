//! CliError for the command-line front end

use std::path::PathBuf;

use splitgrid::error::OptionsError;

/// Error raised while preparing or rendering a grid from the command line.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A file could not be read or created.
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A data or options file was not valid JSON.
    #[error("{path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An options file held a value the grid cannot honor.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// The logger could not be installed.
    #[error("Logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    /// The data did not produce a grid.
    #[error("Nothing to render from {0}")]
    Empty(PathBuf),
}

impl CliError {
    /// Creates a new I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JSON error for `path`.
    pub fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}
