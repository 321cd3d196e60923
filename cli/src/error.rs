//! Error types for the darlens CLI.
//!
//! Every failure that stops a command is wrapped here so `main` can print one
//! message and exit non-zero.

use crate::container::DarError;
use camino::Utf8PathBuf;
use darlens::config::ConfigError;
use darlens::error::DecodeError;
use thiserror::Error;

/// Errors that can stop a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The decoder configuration was invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The container could not be opened.
    #[error("container error: {0}")]
    Container(#[from] DarError),

    /// A module could not be decoded.
    #[error("failed to decode {module}: {source}")]
    Decode {
        /// Module path, as given on the command line or in the manifest.
        module: String,
        /// Underlying decode failure.
        #[source]
        source: DecodeError,
    },

    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A working directory could not be created.
    #[error("failed to create working directory: {0}")]
    Workdir(#[source] std::io::Error),

    /// Output could not be serialised.
    #[error("failed to serialise output: {0}")]
    Serialise(#[from] serde_json::Error),

    /// Output could not be written.
    #[error("failed to write output")]
    WriteFailed {
        /// The underlying error that caused the write to fail.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using [`CliError`].
pub type Result<T> = std::result::Result<T, CliError>;
