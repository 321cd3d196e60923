//! Decoder configuration loaded from TOML.
//!
//! `DecoderConfig` captures how a decode call runs rather than what it
//! extracts: how many worker threads walk modules and how long the whole
//! call may take. Values are deserialised from a TOML document when one is
//! supplied and fall back to single-threaded, unbounded decoding otherwise.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading a [`DecoderConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid configuration TOML.
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// `workers` was set to zero.
    #[error("workers must be at least 1")]
    ZeroWorkers,
}

/// Settings for one decode call.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DecoderConfig {
    /// Number of threads that walk modules. `1` walks on the caller's thread.
    #[serde(default = "DecoderConfig::default_workers")]
    pub workers: usize,
    /// Overall deadline for the decode in milliseconds, checked before each
    /// module walk.
    pub timeout_ms: Option<u64>,
}

impl DecoderConfig {
    const fn default_workers() -> usize {
        1
    }

    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::ZeroWorkers`] when `workers = 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use darlens::config::DecoderConfig;
    ///
    /// let config = DecoderConfig::from_toml_str("workers = 4\n").unwrap();
    /// assert_eq!(config.workers, 4);
    /// assert!(config.timeout().is_none());
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(source)?.validated()
    }

    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise
    /// as for [`Self::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with(path, |file| std::fs::read_to_string(file))
    }

    /// Loads configuration using the supplied reader.
    ///
    /// This exists so tests can simulate the file system.
    ///
    /// # Errors
    ///
    /// As for [`Self::load`].
    pub fn load_with<F>(path: &Path, reader: F) -> Result<Self, ConfigError>
    where
        F: FnOnce(&Path) -> std::io::Result<String>,
    {
        let source = reader(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Rejects settings that cannot drive a decode.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWorkers`] when `workers` is zero.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(self)
    }

    /// Returns the configured deadline as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            workers: Self::default_workers(),
            timeout_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io;

    #[rstest]
    fn defaults_are_sequential_and_unbounded() {
        let config = DecoderConfig::default();

        assert_eq!(config.workers, 1);
        assert!(config.timeout().is_none());
    }

    #[rstest]
    fn empty_document_yields_defaults() {
        let config = DecoderConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, DecoderConfig::default());
    }

    #[rstest]
    fn deserialises_overrides_from_toml() {
        let source = "workers = 8\ntimeout_ms = 1500\n";

        let config = DecoderConfig::from_toml_str(source)
            .expect("expected configuration to parse successfully");

        assert_eq!(config.workers, 8);
        assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));
    }

    #[rstest]
    #[case::non_numeric("workers = \"many\"\n")]
    #[case::unknown_key("threads = 2\n")]
    fn rejects_malformed_documents(#[case] source: &str) {
        assert!(matches!(
            DecoderConfig::from_toml_str(source),
            Err(ConfigError::Parse(_))
        ));
    }

    #[rstest]
    fn rejects_zero_workers() {
        assert!(matches!(
            DecoderConfig::from_toml_str("workers = 0\n"),
            Err(ConfigError::ZeroWorkers)
        ));
    }

    #[rstest]
    fn load_with_passes_through_the_requested_path() {
        let config = DecoderConfig::load_with(Path::new("darlens.toml"), |path| {
            assert_eq!(path, Path::new("darlens.toml"));
            Ok("timeout_ms = 10\n".to_owned())
        })
        .expect("stub reader succeeds");

        assert_eq!(config.timeout_ms, Some(10));
    }

    #[rstest]
    fn load_with_reports_read_failures() {
        let outcome = DecoderConfig::load_with(Path::new("missing.toml"), |_| {
            Err(io::Error::new(io::ErrorKind::NotFound, "gone"))
        });

        assert!(matches!(outcome, Err(ConfigError::Io { path, .. }) if path == Path::new("missing.toml")));
    }

    #[rstest]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("darlens.toml");
        std::fs::write(&path, "workers = 2\n").expect("write config");

        let config = DecoderConfig::load(&path).expect("load config");
        assert_eq!(config.workers, 2);
    }
}
