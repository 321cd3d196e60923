//! Structured diagnostics for lenient decoding.
//!
//! Every skip or fallback the decoder takes is recorded here instead of
//! aborting the decode. Callers may log the accumulated diagnostics or
//! assert against them in tests. Each pushed diagnostic is also mirrored to
//! the `log` facade under the `darlens::diagnostics` target.

use log::{Level, log};
use serde::Serialize;
use std::fmt;

/// Log target used when mirroring diagnostics.
pub const LOG_TARGET: &str = "darlens::diagnostics";

/// How serious a diagnostic is. Neither level aborts a decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational: expected degradation, such as an unextracted view.
    Info,
    /// Part of a declaration could not be extracted.
    Warning,
}

impl Severity {
    const fn log_level(self) -> Level {
        match self {
            Self::Info => Level::Info,
            Self::Warning => Level::Warn,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => f.write_str("info"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// The decision a diagnostic records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// An interned string, name or type index was out of range.
    UnresolvedIndex,
    /// A type expression had a shape that cannot be described.
    UnsupportedTypeShape,
    /// A choice carried no argument or return type.
    MissingChoiceType,
    /// A template had no backing record declaration.
    MissingTemplateRecord,
    /// A template's backing declaration was not a record.
    NonRecordTemplate,
    /// A data type had an unrecognised constructor shape.
    UnknownDataConstructor,
    /// No key field matched by name and type; the first field was used.
    KeyFieldFallback,
    /// An interface view was present but not extracted.
    UnresolvedInterfaceView,
    /// A primitive marker did not match any known family.
    UnnormalizedPrimitive,
    /// The package string table was empty, so its modules were skipped.
    EmptyStringTable,
    /// A declaration name resolved to the empty string.
    EmptyDeclarationName,
    /// The archive hash did not match its payload.
    HashMismatch,
}

impl DiagnosticKind {
    /// Stable snake-case code for the kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnresolvedIndex => "unresolved_index",
            Self::UnsupportedTypeShape => "unsupported_type_shape",
            Self::MissingChoiceType => "missing_choice_type",
            Self::MissingTemplateRecord => "missing_template_record",
            Self::NonRecordTemplate => "non_record_template",
            Self::UnknownDataConstructor => "unknown_data_constructor",
            Self::KeyFieldFallback => "key_field_fallback",
            Self::UnresolvedInterfaceView => "unresolved_interface_view",
            Self::UnnormalizedPrimitive => "unnormalized_primitive",
            Self::EmptyStringTable => "empty_string_table",
            Self::EmptyDeclarationName => "empty_declaration_name",
            Self::HashMismatch => "hash_mismatch",
        }
    }
}

/// A single recorded skip or fallback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    severity: Severity,
    kind: DiagnosticKind,
    message: String,
    declaration: Option<String>,
}

impl Diagnostic {
    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the kind of decision recorded.
    #[must_use]
    pub const fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the declaration the diagnostic concerns, if any.
    #[must_use]
    pub fn declaration(&self) -> Option<&str> {
        self.declaration.as_deref()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.severity, self.kind.code())?;
        if let Some(declaration) = &self.declaration {
            write!(f, " {declaration}")?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Builder for [`Diagnostic`] instances.
pub struct DiagnosticBuilder {
    diagnostic: Diagnostic,
}

impl DiagnosticBuilder {
    fn new(severity: Severity, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            diagnostic: Diagnostic {
                severity,
                kind,
                message: message.into(),
                declaration: None,
            },
        }
    }

    /// Attaches the declaration the diagnostic concerns.
    #[must_use]
    pub fn declaration(mut self, name: impl Into<String>) -> Self {
        self.diagnostic.declaration = Some(name.into());
        self
    }

    /// Completes the builder and returns the diagnostic.
    #[must_use]
    pub fn build(self) -> Diagnostic {
        self.diagnostic
    }
}

/// Starts building a warning.
///
/// # Examples
///
/// ```
/// use darlens_common::diagnostics::{DiagnosticKind, Severity, warning};
///
/// let diagnostic = warning(DiagnosticKind::MissingTemplateRecord, "no record")
///     .declaration("Iou")
///     .build();
/// assert_eq!(diagnostic.severity(), Severity::Warning);
/// assert_eq!(diagnostic.declaration(), Some("Iou"));
/// ```
#[must_use]
pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> DiagnosticBuilder {
    DiagnosticBuilder::new(Severity::Warning, kind, message)
}

/// Starts building an informational diagnostic.
#[must_use]
pub fn info(kind: DiagnosticKind, message: impl Into<String>) -> DiagnosticBuilder {
    DiagnosticBuilder::new(Severity::Info, kind, message)
}

/// Ordered accumulator returned alongside a decode result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic and mirrors it to the log facade.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log!(target: LOG_TARGET, diagnostic.severity.log_level(), "{diagnostic}");
        self.entries.push(diagnostic);
    }

    /// Appends another accumulator without logging its entries again.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Returns all diagnostics in the order they were recorded.
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Iterates over the diagnostics.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Iterates over diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }

    /// Returns `true` if a diagnostic of `kind` concerns `declaration`.
    #[must_use]
    pub fn mentions(&self, kind: DiagnosticKind, declaration: &str) -> bool {
        self.of_kind(kind)
            .any(|entry| entry.declaration() == Some(declaration))
    }

    /// Counts diagnostics at `severity`.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }

    /// Returns the number of diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn builds_diagnostic() {
        let diagnostic = warning(DiagnosticKind::KeyFieldFallback, "used first field")
            .declaration("Iou")
            .build();

        assert_eq!(diagnostic.kind(), DiagnosticKind::KeyFieldFallback);
        assert_eq!(diagnostic.message(), "used first field");
        assert_eq!(
            diagnostic.to_string(),
            "warning[key_field_fallback] Iou: used first field"
        );
    }

    #[rstest]
    fn display_omits_missing_declaration() {
        let diagnostic = info(DiagnosticKind::EmptyStringTable, "skipped 2 modules").build();
        assert_eq!(
            diagnostic.to_string(),
            "info[empty_string_table]: skipped 2 modules"
        );
    }

    #[rstest]
    fn accumulator_preserves_order_and_filters() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(info(DiagnosticKind::UnresolvedInterfaceView, "view").declaration("Asset").build());
        diagnostics.push(warning(DiagnosticKind::UnresolvedIndex, "index 9").declaration("Bad").build());

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics.count(Severity::Warning), 1);
        assert!(diagnostics.mentions(DiagnosticKind::UnresolvedIndex, "Bad"));
        assert!(!diagnostics.mentions(DiagnosticKind::UnresolvedIndex, "Asset"));
        let kinds: Vec<_> = diagnostics.iter().map(Diagnostic::kind).collect();
        assert_eq!(
            kinds,
            vec![
                DiagnosticKind::UnresolvedInterfaceView,
                DiagnosticKind::UnresolvedIndex
            ]
        );
    }

    #[rstest]
    fn extend_appends_in_order() {
        let mut first = Diagnostics::new();
        first.push(info(DiagnosticKind::EmptyStringTable, "a").build());
        let mut second = Diagnostics::new();
        second.push(warning(DiagnosticKind::HashMismatch, "b").build());

        first.extend(second);
        assert_eq!(first.entries().last().map(Diagnostic::message), Some("b"));
    }
}
