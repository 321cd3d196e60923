//! Container fixtures for the CLI behaviour suites.
//!
//! Modules come from the decoder's synthetic archive builders; this module
//! packs them into zip containers with a manifest, the way a build tool
//! would.

#[path = "../../../tests/support/mod.rs"]
pub mod archives;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::{SimpleFileOptions, ZipWriter};

/// Container path of the main module written by [`write_dar`].
pub const MAIN_DALF: &str = "iou-1.0.0-abc/iou.dalf";

/// Container path of the dependency module written by [`write_dar`].
pub const DEP_DALF: &str = "iou-1.0.0-abc/dep.dalf";

/// Writes a container named `app.dar` into `dir` holding `main` and `dep`.
pub fn write_dar(dir: &Path, main: &[u8], dep: &[u8]) -> PathBuf {
    let manifest = format!(
        "Manifest-Version: 1.0\r\nCreated-By: damlc\r\nName: iou-1.0.0\r\nSdk-Version: 2.9.0\r\nMain-Dalf: {MAIN_DALF}\r\nDalfs: {MAIN_DALF}, {DEP_DALF}\r\nFormat: daml-lf\r\nEncryption: non-encrypted\r\n\r\n"
    );
    let path = dir.join("app.dar");
    let file = File::create(&path).expect("create container");
    let mut writer = ZipWriter::new(file);
    for (name, contents) in [
        ("META-INF/MANIFEST.MF", manifest.as_bytes()),
        (MAIN_DALF, main),
        (DEP_DALF, dep),
    ] {
        writer
            .start_file(name, SimpleFileOptions::default())
            .expect("start entry");
        writer.write_all(contents).expect("write entry");
    }
    writer.finish().expect("finish container");
    path
}
