//! An unpacked container: its manifest and the modules it bundles.

use super::extraction::{DarExtractor, ExtractionError, ZipExtractor};
use super::manifest::{DarManifest, MANIFEST_PATH, ManifestError};
use darlens_common::model::Metadata;
use std::path::{Path, PathBuf};

/// Errors arising from opening a container.
#[derive(Debug, thiserror::Error)]
pub enum DarError {
    /// The container could not be unpacked.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The manifest could not be parsed.
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The container has no manifest.
    #[error("container has no META-INF/MANIFEST.MF")]
    MissingManifest,

    /// The manifest names a module the container does not hold.
    #[error("module {path} is listed in the manifest but missing from the container")]
    MissingModule {
        /// Container path of the module.
        path: String,
    },

    /// A file extracted from the container could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Extracted file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// A container unpacked into a working directory.
#[derive(Debug)]
pub struct Dar {
    root: PathBuf,
    manifest: DarManifest,
    files: Vec<String>,
}

impl Dar {
    /// Unpacks `archive` into `workdir` with the zip extractor and parses its
    /// manifest.
    ///
    /// # Errors
    ///
    /// See [`Dar::open_with`].
    pub fn open(archive: &Path, workdir: &Path) -> Result<Self, DarError> {
        Self::open_with(&ZipExtractor, archive, workdir)
    }

    /// Unpacks `archive` into `workdir` with `extractor` and parses its
    /// manifest.
    ///
    /// # Errors
    ///
    /// Returns [`DarError::Extraction`] when unpacking fails,
    /// [`DarError::MissingManifest`] or [`DarError::Manifest`] when the
    /// manifest is absent or invalid, and [`DarError::MissingModule`] when
    /// the main module was not extracted.
    pub fn open_with(
        extractor: &dyn DarExtractor,
        archive: &Path,
        workdir: &Path,
    ) -> Result<Self, DarError> {
        let files = extractor.extract(archive, workdir)?;
        if !files.iter().any(|file| file == MANIFEST_PATH) {
            return Err(DarError::MissingManifest);
        }
        let manifest_path = workdir.join(MANIFEST_PATH);
        let text = std::fs::read_to_string(&manifest_path).map_err(|source| DarError::Read {
            path: manifest_path,
            source,
        })?;
        let manifest = DarManifest::parse(&text)?;
        if !files.contains(&manifest.main_dalf) {
            return Err(DarError::MissingModule {
                path: manifest.main_dalf,
            });
        }
        log::info!(
            "opened container `{}` with {} modules",
            manifest.name,
            manifest.dalfs.len()
        );

        Ok(Self {
            root: workdir.to_path_buf(),
            manifest,
            files,
        })
    }

    /// The parsed manifest.
    #[must_use]
    pub const fn manifest(&self) -> &DarManifest {
        &self.manifest
    }

    /// Archive-relative paths of every extracted file.
    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Container paths of every listed module, main module included.
    ///
    /// Falls back to the main module alone when the manifest lists none.
    #[must_use]
    pub fn module_paths(&self) -> Vec<&str> {
        if self.manifest.dalfs.is_empty() {
            return vec![self.manifest.main_dalf.as_str()];
        }
        self.manifest.dalfs.iter().map(String::as_str).collect()
    }

    /// Reads the bytes of the module at container path `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DarError::MissingModule`] when the container does not hold
    /// `path`, or [`DarError::Read`] when the extracted file cannot be read.
    pub fn read_module(&self, path: &str) -> Result<Vec<u8>, DarError> {
        if !self.files.iter().any(|file| file == path) {
            return Err(DarError::MissingModule {
                path: path.to_owned(),
            });
        }
        let full_path = self.root.join(path);
        std::fs::read(&full_path).map_err(|source| DarError::Read {
            path: full_path,
            source,
        })
    }

    /// Reads the bytes of the main module.
    ///
    /// # Errors
    ///
    /// See [`Dar::read_module`].
    pub fn main_module(&self) -> Result<Vec<u8>, DarError> {
        self.read_module(&self.manifest.main_dalf)
    }

    /// Package metadata described by the manifest.
    #[must_use]
    pub fn metadata(&self) -> Metadata {
        self.manifest.to_metadata()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::extraction::MockDarExtractor;
    use mockall::predicate::always;
    use rstest::rstest;

    const MANIFEST: &str =
        "Manifest-Version: 1.0\nName: app-1.0.0\nMain-Dalf: app/app.dalf\nDalfs: app/app.dalf, dep/dep.dalf\n";

    fn stage(workdir: &Path, files: &[(&str, &str)]) -> Vec<String> {
        for (path, contents) in files {
            let full = workdir.join(path);
            std::fs::create_dir_all(full.parent().expect("nested path")).expect("create dirs");
            std::fs::write(full, contents).expect("write file");
        }
        files.iter().map(|(path, _)| (*path).to_owned()).collect()
    }

    fn mock_with(files: Vec<String>) -> MockDarExtractor {
        let mut extractor = MockDarExtractor::new();
        extractor
            .expect_extract()
            .with(always(), always())
            .times(1)
            .return_once(move |_, _| Ok(files));
        extractor
    }

    #[rstest]
    fn opens_container_and_reads_modules() {
        let workdir = tempfile::tempdir().expect("temp dir");
        let files = stage(
            workdir.path(),
            &[
                (MANIFEST_PATH, MANIFEST),
                ("app/app.dalf", "main"),
                ("dep/dep.dalf", "dep"),
            ],
        );

        let dar = Dar::open_with(&mock_with(files), Path::new("app.dar"), workdir.path())
            .expect("open container");

        assert_eq!(dar.main_module().expect("main module"), b"main");
        assert_eq!(dar.module_paths(), vec!["app/app.dalf", "dep/dep.dalf"]);
        assert_eq!(dar.metadata().dependencies, vec!["dep/dep.dalf"]);
        assert_eq!(dar.metadata().name, "app");
    }

    #[rstest]
    fn missing_manifest_is_reported() {
        let workdir = tempfile::tempdir().expect("temp dir");
        let files = stage(workdir.path(), &[("app/app.dalf", "main")]);

        let result = Dar::open_with(&mock_with(files), Path::new("app.dar"), workdir.path());
        assert!(matches!(result, Err(DarError::MissingManifest)));
    }

    #[rstest]
    fn missing_main_module_is_reported() {
        let workdir = tempfile::tempdir().expect("temp dir");
        let files = stage(workdir.path(), &[(MANIFEST_PATH, MANIFEST)]);

        let result = Dar::open_with(&mock_with(files), Path::new("app.dar"), workdir.path());
        assert!(matches!(
            result,
            Err(DarError::MissingModule { ref path }) if path == "app/app.dalf"
        ));
    }

    #[rstest]
    fn extraction_failure_propagates() {
        let mut extractor = MockDarExtractor::new();
        extractor
            .expect_extract()
            .return_once(|_, _| Err(ExtractionError::EmptyArchive));

        let result = Dar::open_with(&extractor, Path::new("empty.dar"), Path::new("unused"));
        assert!(matches!(
            result,
            Err(DarError::Extraction(ExtractionError::EmptyArchive))
        ));
    }

    #[rstest]
    fn unlisted_module_cannot_be_read() {
        let workdir = tempfile::tempdir().expect("temp dir");
        let files = stage(
            workdir.path(),
            &[(MANIFEST_PATH, MANIFEST), ("app/app.dalf", "main")],
        );
        let dar = Dar::open_with(&mock_with(files), Path::new("app.dar"), workdir.path())
            .expect("open container");

        assert!(matches!(
            dar.read_module("dep/dep.dalf"),
            Err(DarError::MissingModule { .. })
        ));
    }
}
