//! Container manifest parsing.
//!
//! A container describes itself in `META-INF/MANIFEST.MF`, a JAR-style
//! document of `Key: value` headers. Lines are wrapped at 72 columns; a line
//! starting with a single space continues the previous value verbatim. The
//! main section ends at the first blank line.

use darlens_common::model::Metadata;
use serde::Serialize;

/// Path of the manifest inside a container.
pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

/// Errors arising from manifest parsing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ManifestError {
    /// A header line had no `: ` separator.
    #[error("manifest line {line} is not a `Key: value` header")]
    MalformedHeader {
        /// One-based line number.
        line: usize,
    },

    /// A continuation line appeared before any header.
    #[error("manifest line {line} continues a header that does not exist")]
    OrphanContinuation {
        /// One-based line number.
        line: usize,
    },

    /// The manifest did not name its main module.
    #[error("manifest has no `Main-Dalf` header")]
    MissingMainDalf,
}

/// Parsed container manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DarManifest {
    /// `Manifest-Version`.
    pub manifest_version: String,
    /// `Created-By`: the tool that produced the container.
    pub created_by: String,
    /// `Name`: package name, usually suffixed with its version.
    pub name: String,
    /// `Sdk-Version`.
    pub sdk_version: String,
    /// `Main-Dalf`: container path of the entry-point module.
    pub main_dalf: String,
    /// `Dalfs`: container paths of every bundled module.
    pub dalfs: Vec<String>,
    /// `Format`.
    pub format: String,
    /// `Encryption`.
    pub encryption: String,
    /// `Created-At`, when present.
    pub created_at: Option<String>,
}

impl DarManifest {
    /// Parses manifest text.
    ///
    /// Unknown headers are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::MalformedHeader`] or
    /// [`ManifestError::OrphanContinuation`] for lines that break the header
    /// grammar, and [`ManifestError::MissingMainDalf`] when the entry point
    /// is not named.
    ///
    /// # Examples
    ///
    /// ```
    /// use darlens_cli::container::manifest::DarManifest;
    ///
    /// let text = "Manifest-Version: 1.0\nName: app-1.0.0\nMain-Dalf: app.dalf\nDalfs: app.dalf, dep.dalf\n";
    /// let manifest = DarManifest::parse(text).expect("valid manifest");
    /// assert_eq!(manifest.main_dalf, "app.dalf");
    /// assert_eq!(manifest.dalfs, vec!["app.dalf", "dep.dalf"]);
    /// ```
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        let mut manifest = Self::default();
        for (key, value) in headers(text)? {
            match key.as_str() {
                "Manifest-Version" => manifest.manifest_version = value,
                "Created-By" => manifest.created_by = value,
                "Name" => manifest.name = value,
                "Sdk-Version" => manifest.sdk_version = value,
                "Main-Dalf" => manifest.main_dalf = value,
                "Dalfs" => {
                    manifest.dalfs = value
                        .split(',')
                        .map(str::trim)
                        .filter(|path| !path.is_empty())
                        .map(str::to_owned)
                        .collect();
                }
                "Format" => manifest.format = value,
                "Encryption" => manifest.encryption = value,
                "Created-At" => manifest.created_at = Some(value),
                other => log::debug!("ignoring manifest header `{other}`"),
            }
        }
        if manifest.main_dalf.is_empty() {
            return Err(ManifestError::MissingMainDalf);
        }
        Ok(manifest)
    }

    /// Splits `Name` into package name and version.
    ///
    /// The version is the suffix after the last `-` when it starts with a
    /// digit; otherwise the whole value is the name and the version is empty.
    #[must_use]
    pub fn name_and_version(&self) -> (&str, &str) {
        match self.name.rsplit_once('-') {
            Some((name, version))
                if !name.is_empty() && version.starts_with(|c: char| c.is_ascii_digit()) =>
            {
                (name, version)
            }
            _ => (self.name.as_str(), ""),
        }
    }

    /// Converts the manifest into package metadata. Every listed module
    /// other than the main one is a dependency.
    #[must_use]
    pub fn to_metadata(&self) -> Metadata {
        let (name, version) = self.name_and_version();
        Metadata {
            name: name.to_owned(),
            version: version.to_owned(),
            dependencies: self
                .dalfs
                .iter()
                .filter(|path| **path != self.main_dalf)
                .cloned()
                .collect(),
            lang_version: String::new(),
            created_by: self.created_by.clone(),
            sdk_version: self.sdk_version.clone(),
            created_at: self.created_at.clone(),
        }
    }
}

/// Unfolds continuation lines and splits the main section into headers.
fn headers(text: &str) -> Result<Vec<(String, String)>, ManifestError> {
    let mut headers: Vec<(String, String)> = Vec::new();
    for (position, raw) in text.lines().enumerate() {
        let line = position + 1;
        let content = raw.strip_suffix('\r').unwrap_or(raw);
        if content.is_empty() {
            if headers.is_empty() {
                continue;
            }
            break;
        }
        if let Some(continued) = content.strip_prefix(' ') {
            let (_, value) = headers
                .last_mut()
                .ok_or(ManifestError::OrphanContinuation { line })?;
            value.push_str(continued);
            continue;
        }
        let (key, value) = content
            .split_once(':')
            .ok_or(ManifestError::MalformedHeader { line })?;
        headers.push((
            key.trim().to_owned(),
            value.strip_prefix(' ').unwrap_or(value).to_owned(),
        ));
    }
    Ok(headers)
}
