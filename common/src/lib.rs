//! Shared package type model and diagnostics channel for darlens crates.
//!
//! The decoder produces these types and downstream consumers (emitters, the
//! CLI) read them; neither side needs to know how a package was encoded.

pub mod diagnostics;
pub mod model;

pub use diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticKind, Diagnostics, Severity};
pub use model::{
    Choice, Field, KeyInfo, Metadata, Package, PackageBuilder, Record, StructuredType,
};
