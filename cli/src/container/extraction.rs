//! Archive extraction for packaged application containers.
//!
//! Extracts `.dar` (zip) containers to a target directory with path
//! traversal protection to prevent zip-slip attacks.

use std::fs::File;
use std::path::{Component, Path};

/// Trait for extracting containers, enabling test mocking.
///
/// # Examples
///
/// ```
/// use darlens_cli::container::extraction::ZipExtractor;
///
/// let extractor = ZipExtractor;
/// // Use extractor.extract(archive_path, dest_dir) in production
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait DarExtractor {
    /// Extract the container at `archive_path` into `dest_dir`.
    ///
    /// Returns the archive-relative paths of the extracted files, in archive
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError::PathTraversal`] if any entry
    /// attempts to escape the destination directory.
    /// Returns [`ExtractionError::EmptyArchive`] if no files are found.
    /// Returns [`ExtractionError::Zip`] or [`ExtractionError::Io`] on read
    /// failures.
    fn extract(&self, archive_path: &Path, dest_dir: &Path)
    -> Result<Vec<String>, ExtractionError>;
}

/// Errors arising from container extraction.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// I/O error during extraction.
    #[error("extraction I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The container is not a readable zip archive.
    #[error("invalid container: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A path in the archive attempts to traverse outside the destination.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending path from the archive entry.
        path: String,
    },

    /// The archive contains no files.
    #[error("container holds no files")]
    EmptyArchive,
}

/// Default extractor using the `zip` crate.
///
/// Validates each entry path before extraction to guard against
/// path traversal attacks (zip-slip).
#[derive(Clone, Copy, Debug, Default)]
pub struct ZipExtractor;

impl DarExtractor for ZipExtractor {
    fn extract(
        &self,
        archive_path: &Path,
        dest_dir: &Path,
    ) -> Result<Vec<String>, ExtractionError> {
        let mut archive = zip::ZipArchive::new(File::open(archive_path)?)?;
        let mut extracted = Vec::new();

        for position in 0..archive.len() {
            let mut entry = archive.by_index(position)?;
            let entry_name = entry.name().to_owned();
            validate_entry_path(Path::new(&entry_name))?;

            let dest_path = dest_dir.join(&entry_name);
            if entry.is_dir() {
                std::fs::create_dir_all(&dest_path)?;
                continue;
            }
            if let Some(parent) = dest_path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let mut output = File::create(&dest_path)?;
            std::io::copy(&mut entry, &mut output)?;
            log::debug!("extracted `{entry_name}`");
            extracted.push(entry_name);
        }

        if extracted.is_empty() {
            return Err(ExtractionError::EmptyArchive);
        }

        Ok(extracted)
    }
}

/// Validate that an entry path does not escape the destination
/// directory via `..` components or absolute paths.
fn validate_entry_path(path: &Path) -> Result<(), ExtractionError> {
    let escapes = path.is_absolute()
        || path
            .components()
            .any(|component| matches!(component, Component::ParentDir | Component::RootDir));
    if escapes {
        return Err(ExtractionError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;
    use std::path::PathBuf;
    use zip::write::{SimpleFileOptions, ZipWriter};

    fn write_zip(path: &Path, entries: &[(&str, &[u8])]) {
        let file = File::create(path).expect("create archive");
        let mut writer = ZipWriter::new(file);
        for (name, contents) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .expect("start entry");
            writer.write_all(contents).expect("write entry");
        }
        writer.finish().expect("finish archive");
    }

    #[test]
    fn extract_real_archive() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("app.dar");
        let dest_dir = temp_dir.path().join("out");
        write_zip(
            &archive_path,
            &[
                ("META-INF/MANIFEST.MF", b"Manifest-Version: 1.0\n".as_slice()),
                ("app-1.0.0/app.dalf", b"payload".as_slice()),
            ],
        );

        let files = ZipExtractor
            .extract(&archive_path, &dest_dir)
            .expect("extract");
        assert_eq!(files, vec!["META-INF/MANIFEST.MF", "app-1.0.0/app.dalf"]);
        assert_eq!(
            std::fs::read(dest_dir.join("app-1.0.0/app.dalf")).expect("read dalf"),
            b"payload"
        );
    }

    #[rstest]
    #[case::parent_dir("../escape.txt")]
    #[case::nested_parent("foo/../../escape.txt")]
    #[case::absolute("/etc/passwd")]
    fn rejects_path_traversal(#[case] bad_path: &str) {
        let path = PathBuf::from(bad_path);
        let result = validate_entry_path(&path);
        assert!(
            matches!(result, Err(ExtractionError::PathTraversal { .. })),
            "expected PathTraversal for {bad_path}"
        );
    }

    #[test]
    fn accepts_normal_paths() {
        let path = PathBuf::from("META-INF/MANIFEST.MF");
        assert!(validate_entry_path(&path).is_ok());
    }

    #[test]
    fn traversing_entry_aborts_extraction() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("evil.dar");
        let dest_dir = temp_dir.path().join("out");
        write_zip(&archive_path, &[("../evil.dalf", b"payload".as_slice())]);

        let result = ZipExtractor.extract(&archive_path, &dest_dir);
        assert!(matches!(result, Err(ExtractionError::PathTraversal { .. })));
        assert!(!temp_dir.path().join("evil.dalf").exists());
    }

    #[test]
    fn extract_empty_archive() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("empty.dar");
        let dest_dir = temp_dir.path().join("out");
        write_zip(&archive_path, &[]);

        let result = ZipExtractor.extract(&archive_path, &dest_dir);
        assert!(matches!(result, Err(ExtractionError::EmptyArchive)));
    }

    #[test]
    fn non_zip_input_is_rejected() {
        let temp_dir = tempfile::tempdir().expect("temp dir");
        let archive_path = temp_dir.path().join("plain.dar");
        std::fs::write(&archive_path, b"not a zip").expect("write");

        let result = ZipExtractor.extract(&archive_path, temp_dir.path());
        assert!(matches!(result, Err(ExtractionError::Zip(_))));
    }
}
