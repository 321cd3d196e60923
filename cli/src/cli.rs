//! CLI argument definitions for darlens.
//!
//! This module defines the command-line interface using clap. It is separated
//! from the main entrypoint to keep the binary small and focused on
//! orchestration.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use darlens::config::{ConfigError, DecoderConfig};
use log::LevelFilter;

/// Inspect the type model of packaged ledger applications.
#[derive(Parser, Debug)]
#[command(name = "darlens")]
#[command(version, about)]
#[command(long_about = concat!(
    "Inspect the type model of packaged ledger applications.\n\n",
    "darlens unpacks a container, decodes its modules and prints every ",
    "template, interface and data type it declares as JSON. Declarations the ",
    "decoder cannot describe are skipped and summarised on stderr.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Decode the main module of a container:\n",
    "    $ darlens inspect app.dar --pretty\n\n",
    "  Decode every bundled module on four threads:\n",
    "    $ darlens inspect app.dar --all --workers 4\n\n",
    "  Decode a raw module file:\n",
    "    $ darlens decode app.dalf\n\n",
    "  Show the container manifest:\n",
    "    $ darlens manifest app.dar\n\n",
    "Set RUST_LOG to override the log filter chosen by -v/-q.",
))]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Increase log verbosity (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbosity")]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Decode the modules of a container and print their type models.
    Inspect(InspectArgs),

    /// Decode a single raw module file.
    Decode(DecodeArgs),

    /// Print the parsed container manifest.
    Manifest(ManifestArgs),
}

/// Decoder settings shared by the decoding subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct DecoderArgs {
    /// TOML file with decoder settings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<Utf8PathBuf>,

    /// Number of threads that walk modules; overrides the config file.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Overall decode deadline in milliseconds; overrides the config file.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,
}

/// Arguments for the inspect command.
#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Container to inspect.
    #[arg(value_name = "DAR")]
    pub dar: Utf8PathBuf,

    /// Decode every listed module instead of the main module only.
    #[arg(long)]
    pub all: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Decoder settings.
    #[command(flatten)]
    pub decoder: DecoderArgs,
}

/// Arguments for the decode command.
#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Raw module file to decode.
    #[arg(value_name = "DALF")]
    pub dalf: Utf8PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Decoder settings.
    #[command(flatten)]
    pub decoder: DecoderArgs,
}

/// Arguments for the manifest command.
#[derive(Args, Debug, Clone)]
pub struct ManifestArgs {
    /// Container whose manifest to print.
    #[arg(value_name = "DAR")]
    pub dar: Utf8PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

impl DecoderArgs {
    /// Loads the config file, if any, and applies command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file cannot be read or parsed, or
    /// when the resulting worker count is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use darlens_cli::cli::DecoderArgs;
    ///
    /// let args = DecoderArgs {
    ///     workers: Some(4),
    ///     ..DecoderArgs::default()
    /// };
    /// let config = args.resolve().expect("valid settings");
    /// assert_eq!(config.workers, 4);
    /// assert_eq!(config.timeout_ms, None);
    /// ```
    pub fn resolve(&self) -> Result<DecoderConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => DecoderConfig::load(path.as_std_path())?,
            None => DecoderConfig::default(),
        };
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if self.timeout_ms.is_some() {
            config.timeout_ms = self.timeout_ms;
        }
        config.validated()
    }
}

impl Cli {
    /// Returns the default log filter implied by `-v` and `-q`.
    #[must_use]
    pub const fn log_filter(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
