//! Output formatting for the darlens CLI.
//!
//! Package models go to stdout as JSON; diagnostics summaries go to stderr
//! as plain text.

use crate::error::{CliError, Result};
use darlens_common::diagnostics::{Diagnostics, Severity};
use serde::Serialize;
use std::io::Write;

/// Serialises `value` as JSON followed by a newline.
///
/// # Errors
///
/// Returns [`CliError::Serialise`] when serialisation fails and
/// [`CliError::WriteFailed`] when `out` rejects the write.
///
/// # Example
///
/// ```
/// use darlens_cli::output::write_json;
///
/// let mut out = Vec::new();
/// write_json(&mut out, &["Pair"], false).expect("write");
/// assert_eq!(out, b"[\"Pair\"]\n");
/// ```
pub fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T, pretty: bool) -> Result<()> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    writeln!(out, "{rendered}").map_err(|source| CliError::WriteFailed { source })
}

/// Formats a one-line count of diagnostics for `module`, followed by one
/// indented line per diagnostic.
///
/// # Example
///
/// ```
/// use darlens_cli::output::diagnostics_summary;
/// use darlens_common::diagnostics::Diagnostics;
///
/// let summary = diagnostics_summary("app.dalf", &Diagnostics::new());
/// assert_eq!(summary, "app.dalf: no diagnostics");
/// ```
#[must_use]
pub fn diagnostics_summary(module: &str, diagnostics: &Diagnostics) -> String {
    if diagnostics.is_empty() {
        return format!("{module}: no diagnostics");
    }
    let warnings = diagnostics.count(Severity::Warning);
    let infos = diagnostics.count(Severity::Info);
    let mut summary = format!(
        "{module}: {warnings} {}, {infos} {}",
        plural(warnings, "warning", "warnings"),
        plural(infos, "note", "notes"),
    );
    for diagnostic in diagnostics {
        summary.push_str("\n  ");
        summary.push_str(&diagnostic.to_string());
    }
    summary
}

/// Writes one line to `stderr`, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort reporting; nothing else can be done if stderr is gone.
    }
}

const fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darlens_common::diagnostics::{self, DiagnosticKind};
    use rstest::rstest;

    #[rstest]
    #[case::compact(false, "{\"name\":\"Pair\"}\n")]
    #[case::pretty(true, "{\n  \"name\": \"Pair\"\n}\n")]
    fn writes_json(#[case] pretty: bool, #[case] expected: &str) {
        #[derive(Serialize)]
        struct Named {
            name: &'static str,
        }

        let mut out = Vec::new();
        write_json(&mut out, &Named { name: "Pair" }, pretty).expect("write");
        assert_eq!(String::from_utf8(out).expect("utf-8"), expected);
    }

    #[test]
    fn summary_counts_and_lists_diagnostics() {
        let mut recorded = Diagnostics::new();
        recorded.push(
            diagnostics::warning(DiagnosticKind::KeyFieldFallback, "using first field")
                .declaration("Pair")
                .build(),
        );
        recorded.push(
            diagnostics::info(DiagnosticKind::UnresolvedInterfaceView, "view skipped")
                .declaration("Asset")
                .build(),
        );
        recorded.push(
            diagnostics::warning(DiagnosticKind::UnknownDataConstructor, "no shape")
                .declaration("Broken")
                .build(),
        );

        let summary = diagnostics_summary("app.dalf", &recorded);
        let mut lines = summary.lines();
        assert_eq!(lines.next(), Some("app.dalf: 2 warnings, 1 note"));
        assert_eq!(lines.count(), 3);
        assert!(summary.contains("Pair"));
        assert!(summary.contains("Broken"));
    }
}
