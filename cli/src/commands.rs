//! Subcommand implementations.
//!
//! Each command writes its JSON result to `stdout` and any diagnostics
//! summaries to `stderr`, so callers and tests can capture both streams.

use crate::cli::{Cli, Command, DecodeArgs, InspectArgs, ManifestArgs};
use crate::container::Dar;
use crate::error::{CliError, Result};
use crate::output::{diagnostics_summary, write_json, write_stderr_line};
use darlens::archive::{ArchiveDecoder, DecodedArchive};
use darlens_common::model::Metadata;
use log::{debug, info};
use std::io::Write;
use tempfile::TempDir;

/// Runs the subcommand selected on the command line.
///
/// # Errors
///
/// Returns the first [`CliError`] raised by the selected command.
pub fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    match &cli.command {
        Command::Inspect(args) => inspect(args, cli.quiet, stdout, stderr),
        Command::Decode(args) => decode(args, cli.quiet, stdout, stderr),
        Command::Manifest(args) => manifest(args, stdout),
    }
}

/// Decodes the main module of a container, or every listed module with
/// `--all`, and prints the resulting package models.
///
/// The manifest's name, version and dependencies are applied to the main
/// module only; other modules keep the metadata their own IR carries.
///
/// # Errors
///
/// Returns [`CliError::Config`] for invalid decoder settings,
/// [`CliError::Container`] when the container cannot be opened and
/// [`CliError::Decode`] when a module fails to decode.
pub fn inspect(
    args: &InspectArgs,
    quiet: bool,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let decoder = ArchiveDecoder::new(args.decoder.resolve()?);
    let workdir = workdir()?;
    let dar = Dar::open(args.dar.as_std_path(), workdir.path())?;
    let main = dar.manifest().main_dalf.as_str();
    let metadata = dar.metadata();

    let modules = if args.all {
        dar.module_paths()
    } else {
        vec![main]
    };
    info!("inspecting {} module(s) from {}", modules.len(), args.dar);

    let mut packages = Vec::with_capacity(modules.len());
    for module in modules {
        let bytes = dar.read_module(module)?;
        let manifest_metadata = (module == main).then_some(&metadata);
        let decoded = decode_module(&decoder, module, &bytes, manifest_metadata)?;
        info!(
            "{module}: {} declarations, {} templates",
            decoded.package.structs.len(),
            decoded.package.templates().count()
        );
        report(stderr, module, &decoded, quiet);
        packages.push(decoded.package);
    }

    if args.all {
        write_json(stdout, &packages, args.pretty)
    } else {
        packages
            .first()
            .map_or(Ok(()), |package| write_json(stdout, package, args.pretty))
    }
}

/// Decodes a single raw module file and prints its package model.
///
/// # Errors
///
/// Returns [`CliError::Read`] when the file cannot be read, alongside the
/// configuration and decode errors of [`inspect`].
pub fn decode(
    args: &DecodeArgs,
    quiet: bool,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let decoder = ArchiveDecoder::new(args.decoder.resolve()?);
    let bytes = std::fs::read(&args.dalf).map_err(|source| CliError::Read {
        path: args.dalf.clone(),
        source,
    })?;
    let decoded = decode_module(&decoder, args.dalf.as_str(), &bytes, None)?;
    report(stderr, args.dalf.as_str(), &decoded, quiet);
    write_json(stdout, &decoded.package, args.pretty)
}

/// Prints the parsed manifest of a container.
///
/// # Errors
///
/// Returns [`CliError::Container`] when the container cannot be opened.
pub fn manifest(args: &ManifestArgs, stdout: &mut dyn Write) -> Result<()> {
    let workdir = workdir()?;
    let dar = Dar::open(args.dar.as_std_path(), workdir.path())?;
    write_json(stdout, dar.manifest(), args.pretty)
}

fn workdir() -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix("darlens-")
        .tempdir()
        .map_err(CliError::Workdir)
}

fn decode_module(
    decoder: &ArchiveDecoder,
    module: &str,
    bytes: &[u8],
    metadata: Option<&Metadata>,
) -> Result<DecodedArchive> {
    debug!("decoding {module} ({} bytes)", bytes.len());
    decoder
        .decode_with_metadata(bytes, metadata)
        .map_err(|source| CliError::Decode {
            module: module.to_owned(),
            source,
        })
}

fn report(stderr: &mut dyn Write, module: &str, decoded: &DecodedArchive, quiet: bool) {
    if quiet || decoded.diagnostics.is_empty() {
        return;
    }
    write_stderr_line(stderr, diagnostics_summary(module, &decoded.diagnostics));
}
