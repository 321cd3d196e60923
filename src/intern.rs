//! Interning resolver.
//!
//! Identifiers in the IR are integer indices into package-level tables.
//! [`Interner`] is the read-only context that resolves them; it is shared by
//! every resolver call for one package and is safe to share across worker
//! threads.

use crate::ir::{DottedRef, Ident, TypeExpr};
use std::fmt;
use thiserror::Error;

/// The interning table an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Table {
    /// Interned strings.
    Strings,
    /// Interned dotted names.
    DottedNames,
    /// Interned types.
    Types,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Strings => "string",
            Self::DottedNames => "dotted-name",
            Self::Types => "type",
        };
        f.write_str(name)
    }
}

/// Failures resolving an interned reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InternError {
    /// The index exceeds the table bound (or is negative).
    #[error("{table} index {index} out of range for table of {len} entries")]
    IndexOutOfRange {
        /// Table that was indexed.
        table: Table,
        /// Offending index.
        index: i32,
        /// Number of entries in the table.
        len: usize,
    },

    /// A dotted name had no segments.
    #[error("dotted name {index} has no segments")]
    EmptyDottedName {
        /// Index of the empty dotted name.
        index: i32,
    },

    /// The reference itself was absent from the encoded message.
    #[error("missing {what}")]
    Missing {
        /// What was expected.
        what: &'static str,
    },
}

/// Result type alias using [`InternError`].
pub type Result<T> = std::result::Result<T, InternError>;

fn lookup<T>(table: Table, entries: &[T], index: i32) -> Result<&T> {
    usize::try_from(index)
        .ok()
        .and_then(|position| entries.get(position))
        .ok_or(InternError::IndexOutOfRange {
            table,
            index,
            len: entries.len(),
        })
}

/// Resolves `index` against the interned string table.
///
/// # Errors
///
/// Returns [`InternError::IndexOutOfRange`] when `index` is negative or past
/// the end of `strings`.
///
/// # Examples
///
/// ```
/// use darlens::intern::resolve_string;
///
/// let strings = vec![String::new(), "owner".to_owned()];
/// assert_eq!(resolve_string(&strings, 1).unwrap(), "owner");
/// assert!(resolve_string(&strings, 2).is_err());
/// ```
pub fn resolve_string(strings: &[String], index: i32) -> Result<&str> {
    lookup(Table::Strings, strings, index).map(String::as_str)
}

/// Resolves `index` against the dotted-name table, returning its segments.
///
/// # Errors
///
/// Returns [`InternError::IndexOutOfRange`] if the dotted-name index or any
/// segment's string index is out of range.
pub fn resolve_dotted_name<'a, S>(
    strings: &'a [String],
    dotted_names: &[S],
    index: i32,
) -> Result<Vec<&'a str>>
where
    S: AsRef<[i32]>,
{
    lookup(Table::DottedNames, dotted_names, index)?
        .as_ref()
        .iter()
        .map(|segment| resolve_string(strings, *segment))
        .collect()
}

/// Read-only interning context for one package.
#[derive(Debug)]
pub struct Interner<'a> {
    strings: &'a [String],
    dotted_names: Vec<&'a [i32]>,
    types: Vec<TypeExpr<'a>>,
}

impl<'a> Interner<'a> {
    /// Builds the context from the package tables. `types` is the interned
    /// type table already lowered to the neutral view.
    #[must_use]
    pub const fn new(
        strings: &'a [String],
        dotted_names: Vec<&'a [i32]>,
        types: Vec<TypeExpr<'a>>,
    ) -> Self {
        Self {
            strings,
            dotted_names,
            types,
        }
    }

    /// Returns `true` if the string table is empty.
    #[must_use]
    pub fn has_no_strings(&self) -> bool {
        self.strings.is_empty()
    }

    /// Resolves an interned string.
    ///
    /// # Errors
    ///
    /// See [`resolve_string`].
    pub fn string(&self, index: i32) -> Result<&'a str> {
        resolve_string(self.strings, index)
    }

    /// Resolves an interned dotted name to its segments.
    ///
    /// # Errors
    ///
    /// See [`resolve_dotted_name`].
    pub fn dotted_name(&self, index: i32) -> Result<Vec<&'a str>> {
        resolve_dotted_name(self.strings, &self.dotted_names, index)
    }

    /// Resolves an identifier reference, inline or interned.
    ///
    /// # Errors
    ///
    /// Returns [`InternError::Missing`] for an absent identifier, otherwise
    /// see [`resolve_string`].
    pub fn ident(&self, ident: Ident<'a>) -> Result<&'a str> {
        match ident {
            Ident::Interned(index) => self.string(index),
            Ident::Inline(text) => Ok(text),
            Ident::Missing => Err(InternError::Missing { what: "identifier" }),
        }
    }

    /// Resolves the declaration name of a dotted reference: its last segment.
    ///
    /// # Errors
    ///
    /// Returns [`InternError::EmptyDottedName`] when the name has no
    /// segments and [`InternError::Missing`] when the reference is absent.
    pub fn declaration_name(&self, name: DottedRef<'a>) -> Result<&'a str> {
        match name {
            DottedRef::Interned(index) => self
                .dotted_name(index)?
                .last()
                .copied()
                .ok_or(InternError::EmptyDottedName { index }),
            DottedRef::Inline(segments) => segments
                .last()
                .map(String::as_str)
                .ok_or(InternError::EmptyDottedName { index: -1 }),
            DottedRef::Missing => Err(InternError::Missing { what: "name" }),
        }
    }

    /// Renders a dotted reference with all segments joined by `.`.
    ///
    /// # Errors
    ///
    /// As for [`Self::declaration_name`].
    pub fn qualified_name(&self, name: DottedRef<'a>) -> Result<String> {
        match name {
            DottedRef::Interned(index) => Ok(self.dotted_name(index)?.join(".")),
            DottedRef::Inline(segments) => Ok(segments.join(".")),
            DottedRef::Missing => Err(InternError::Missing { what: "name" }),
        }
    }

    /// Looks up an entry of the interned type table.
    ///
    /// # Errors
    ///
    /// Returns [`InternError::IndexOutOfRange`] for an unknown index.
    pub fn interned_type(&self, index: i32) -> Result<&TypeExpr<'a>> {
        lookup(Table::Types, &self.types, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn strings() -> Vec<String> {
        ["", "Main", "Iou", "owner"]
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    #[rstest]
    #[case::first(0, "")]
    #[case::last(3, "owner")]
    fn resolves_strings_in_range(strings: Vec<String>, #[case] index: i32, #[case] expected: &str) {
        assert_eq!(resolve_string(&strings, index), Ok(expected));
    }

    #[rstest]
    #[case::past_end(4)]
    #[case::negative(-1)]
    fn rejects_out_of_range_strings(strings: Vec<String>, #[case] index: i32) {
        assert_eq!(
            resolve_string(&strings, index),
            Err(InternError::IndexOutOfRange {
                table: Table::Strings,
                index,
                len: 4,
            })
        );
    }

    #[rstest]
    fn resolves_dotted_segments(strings: Vec<String>) {
        let dotted = vec![vec![1, 2]];
        assert_eq!(
            resolve_dotted_name(&strings, &dotted, 0),
            Ok(vec!["Main", "Iou"])
        );
    }

    #[rstest]
    fn dotted_name_with_bad_segment_fails(strings: Vec<String>) {
        let dotted = vec![vec![1, 42]];
        assert!(matches!(
            resolve_dotted_name(&strings, &dotted, 0),
            Err(InternError::IndexOutOfRange {
                table: Table::Strings,
                index: 42,
                ..
            })
        ));
    }

    #[rstest]
    fn declaration_name_is_last_segment(strings: Vec<String>) {
        let segments = [1, 2];
        let interner = Interner::new(&strings, vec![&segments[..]], Vec::new());

        assert_eq!(interner.declaration_name(DottedRef::Interned(0)), Ok("Iou"));
        assert_eq!(
            interner.qualified_name(DottedRef::Interned(0)).as_deref(),
            Ok("Main.Iou")
        );
    }

    #[rstest]
    fn empty_dotted_name_is_reported(strings: Vec<String>) {
        let interner = Interner::new(&strings, vec![&[][..]], Vec::new());
        assert_eq!(
            interner.declaration_name(DottedRef::Interned(0)),
            Err(InternError::EmptyDottedName { index: 0 })
        );
    }

    #[rstest]
    fn inline_references_bypass_tables() {
        let inline = vec!["Main".to_owned(), "Asset".to_owned()];
        let interner = Interner::new(&[], Vec::new(), Vec::new());

        assert_eq!(interner.declaration_name(DottedRef::Inline(&inline)), Ok("Asset"));
        assert_eq!(interner.ident(Ident::Inline("issuer")), Ok("issuer"));
        assert!(interner.has_no_strings());
    }

    #[rstest]
    fn missing_references_are_errors(strings: Vec<String>) {
        let interner = Interner::new(&strings, Vec::new(), Vec::new());
        assert!(matches!(
            interner.ident(Ident::Missing),
            Err(InternError::Missing { .. })
        ));
        assert!(matches!(
            interner.interned_type(0),
            Err(InternError::IndexOutOfRange {
                table: Table::Types,
                ..
            })
        ));
    }
}
