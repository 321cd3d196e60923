//! Container unpacking.
//!
//! A container is a zip archive bundling one or more encoded modules and a
//! manifest naming the entry point.
//!
//! - [`extraction`] - Zip extraction with path-traversal protection
//! - [`manifest`] - `META-INF/MANIFEST.MF` parsing
//! - [`dar`] - Opened containers and module access

pub mod dar;
pub mod extraction;
pub mod manifest;

pub use dar::{Dar, DarError};
pub use extraction::{DarExtractor, ExtractionError, ZipExtractor};
pub use manifest::{DarManifest, ManifestError};
