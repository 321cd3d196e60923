//! Archive envelope decoding and generation dispatch.
//!
//! An archive wraps an opaque payload together with its content hash. The
//! payload is tagged with the IR generation that encoded it; each generation
//! has its own [`PackageDecoder`], and both feed the shared walker.

use crate::config::DecoderConfig;
use crate::error::{DecodeError, Result};
use crate::intern::Interner;
use crate::ir::ModuleDecl;
use crate::lf1::Lf1Decoder;
use crate::lf2::Lf2Decoder;
use crate::walker::{PackageWalk, walk_package};
use darlens_common::diagnostics::{self, DiagnosticKind, Diagnostics};
use darlens_common::model::{Metadata, Package};
use log::info;
use prost::Message;
use sha2::{Digest, Sha256};
use std::fmt;

/// Hash algorithm declared by an archive envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum HashFunction {
    /// SHA-256 over the payload bytes.
    Sha256 = 0,
}

/// Outer envelope: the payload bytes and the hash that identifies them.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Archive {
    /// Raw [`HashFunction`] tag.
    #[prost(enumeration = "HashFunction", tag = "1")]
    pub hash_function: i32,
    /// Encoded [`ArchivePayload`].
    #[prost(bytes = "vec", tag = "3")]
    pub payload: Vec<u8>,
    /// Lower-case hex digest of `payload`.
    #[prost(string, tag = "4")]
    pub hash: String,
}

/// Version-tagged payload.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ArchivePayload {
    /// Minor version of the IR.
    #[prost(string, tag = "3")]
    pub minor: String,
    /// Which variant this message holds.
    #[prost(oneof = "archive_payload::Sum", tags = "2, 4")]
    pub sum: Option<archive_payload::Sum>,
}

/// Members of `ArchivePayload`.
pub mod archive_payload {
    /// Encoded package, tagged by generation.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Sum {
        /// First-generation package bytes.
        #[prost(bytes, tag = "2")]
        DamlLf1(Vec<u8>),
        /// Second-generation package bytes.
        #[prost(bytes, tag = "4")]
        DamlLf2(Vec<u8>),
    }
}

/// IR generation a payload was encoded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Generation {
    /// First generation: inline or interned names, legacy keys.
    Lf1,
    /// Second generation: interned names, expression keys.
    Lf2,
}

impl Generation {
    /// Major language version number.
    #[must_use]
    pub const fn major(self) -> u8 {
        match self {
            Self::Lf1 => 1,
            Self::Lf2 => 2,
        }
    }

    const fn decoder(self) -> &'static dyn PackageDecoder {
        match self {
            Self::Lf1 => &Lf1Decoder,
            Self::Lf2 => &Lf2Decoder,
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LF{}", self.major())
    }
}

/// A walked package, before the archive's identity and metadata are applied.
#[derive(Debug, Default)]
pub struct DecodedPackage {
    /// Merged declarations and walk diagnostics.
    pub walk: PackageWalk,
    /// Package name from the IR metadata, if present and resolvable.
    pub name: Option<String>,
    /// Package version from the IR metadata, if present and resolvable.
    pub version: Option<String>,
}

impl DecodedPackage {
    /// Walks `modules` and resolves the IR's own name and version indices.
    ///
    /// # Errors
    ///
    /// Propagates fatal errors from [`walk_package`].
    pub fn assemble<'a>(
        interner: &Interner<'a>,
        modules: &[ModuleDecl<'a>],
        metadata: Option<(i32, i32)>,
        config: &DecoderConfig,
    ) -> Result<Self> {
        let walk = walk_package(interner, modules, config)?;
        let lookup = |index: i32| {
            interner
                .string(index)
                .ok()
                .filter(|text| !text.is_empty())
                .map(str::to_owned)
        };
        Ok(Self {
            walk,
            name: metadata.and_then(|(name, _)| lookup(name)),
            version: metadata.and_then(|(_, version)| lookup(version)),
        })
    }
}

/// Capability shared by the generation-specific decoders.
pub trait PackageDecoder {
    /// The generation this decoder reads.
    fn generation(&self) -> Generation;

    /// Decodes and walks one generation-specific package.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedPackage`] when the bytes do not parse,
    /// or any fatal error raised while walking.
    fn decode_package(&self, bytes: &[u8], config: &DecoderConfig) -> Result<DecodedPackage>;
}

/// Outcome of decoding one archive.
#[derive(Debug)]
pub struct DecodedArchive {
    /// Hash recorded in the envelope; also the package identifier.
    pub hash: String,
    /// Extracted package model.
    pub package: Package,
    /// Every skip or fallback recorded while decoding.
    pub diagnostics: Diagnostics,
}

/// Decodes archive bytes into package models.
#[derive(Clone, Debug, Default)]
pub struct ArchiveDecoder {
    config: DecoderConfig,
}

impl ArchiveDecoder {
    /// Creates a decoder with the given configuration.
    #[must_use]
    pub const fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decodes `bytes` using only the metadata the IR carries.
    ///
    /// # Errors
    ///
    /// See [`ArchiveDecoder::decode_with_metadata`].
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedArchive> {
        self.decode_with_metadata(bytes, None)
    }

    /// Decodes `bytes`, preferring non-empty values from `manifest` over the
    /// IR's own package metadata.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MalformedArchive`] or
    /// [`DecodeError::MalformedPayload`] when the envelope does not parse,
    /// [`DecodeError::UnsupportedIrVersion`] when the payload carries no
    /// generation this build reads, and any fatal error from the generation
    /// decoder.
    pub fn decode_with_metadata(
        &self,
        bytes: &[u8],
        manifest: Option<&Metadata>,
    ) -> Result<DecodedArchive> {
        let archive = Archive::decode(bytes).map_err(DecodeError::MalformedArchive)?;
        let mut diagnostics = Diagnostics::new();
        verify_hash(&archive, &mut diagnostics);

        let payload =
            ArchivePayload::decode(archive.payload.as_slice()).map_err(DecodeError::MalformedPayload)?;
        let (generation, package_bytes) = match &payload.sum {
            Some(archive_payload::Sum::DamlLf1(package)) => (Generation::Lf1, package),
            Some(archive_payload::Sum::DamlLf2(package)) => (Generation::Lf2, package),
            None => {
                return Err(DecodeError::UnsupportedIrVersion {
                    minor: payload.minor,
                });
            }
        };

        info!(
            "decoding {generation}.{} package {}",
            payload.minor, archive.hash
        );
        let decoded = generation
            .decoder()
            .decode_package(package_bytes, &self.config)?;

        let metadata = merge_metadata(manifest, &decoded, generation, &payload.minor);
        diagnostics.extend(decoded.walk.diagnostics);
        let package = decoded.walk.builder.build(archive.hash.clone(), metadata);
        info!(
            "decoded package {} with {} declarations",
            archive.hash,
            package.structs.len()
        );

        Ok(DecodedArchive {
            hash: archive.hash,
            package,
            diagnostics,
        })
    }
}

/// Decodes `bytes` with the default configuration.
///
/// # Errors
///
/// See [`ArchiveDecoder::decode_with_metadata`].
///
/// # Examples
///
/// ```
/// use darlens::archive::{Archive, decode_archive};
/// use darlens::error::DecodeError;
/// use prost::Message;
///
/// let envelope = Archive::default().encode_to_vec();
/// assert!(matches!(
///     decode_archive(&envelope),
///     Err(DecodeError::UnsupportedIrVersion { .. })
/// ));
/// ```
pub fn decode_archive(bytes: &[u8]) -> Result<DecodedArchive> {
    ArchiveDecoder::default().decode(bytes)
}

/// Lower-case hex SHA-256 digest of `payload`.
#[must_use]
pub fn payload_hash(payload: &[u8]) -> String {
    format!("{:x}", Sha256::digest(payload))
}

fn verify_hash(archive: &Archive, diagnostics: &mut Diagnostics) {
    if !matches!(
        HashFunction::try_from(archive.hash_function),
        Ok(HashFunction::Sha256)
    ) {
        return;
    }
    let computed = payload_hash(&archive.payload);
    if !computed.eq_ignore_ascii_case(&archive.hash) {
        diagnostics.push(
            diagnostics::warning(
                DiagnosticKind::HashMismatch,
                format!(
                    "archive hash `{}` does not match payload digest `{computed}`",
                    archive.hash
                ),
            )
            .build(),
        );
    }
}

fn merge_metadata(
    manifest: Option<&Metadata>,
    decoded: &DecodedPackage,
    generation: Generation,
    minor: &str,
) -> Metadata {
    let prefer = |from_manifest: Option<&String>, from_ir: Option<&String>| {
        from_manifest
            .filter(|value| !value.is_empty())
            .or(from_ir)
            .cloned()
            .unwrap_or_default()
    };
    let mut metadata = manifest.cloned().unwrap_or_default();
    metadata.name = prefer(manifest.map(|meta| &meta.name), decoded.name.as_ref());
    metadata.version = prefer(manifest.map(|meta| &meta.version), decoded.version.as_ref());
    metadata.lang_version = format!("{}.{minor}", generation.major());
    metadata
}
