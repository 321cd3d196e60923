//! Key-expression interpreter and key-field selection.

use crate::intern::{InternError, Interner};
use crate::ir::{Ident, KeyExpr};
use darlens_common::model::Field;

/// Field names a key expression depends on, plus any names that failed to
/// resolve along the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyFields<'a> {
    /// Resolved names in extraction order; may contain duplicates.
    pub names: Vec<&'a str>,
    /// Identifiers that could not be resolved and were left out.
    pub unresolved: Vec<InternError>,
}

impl<'a> KeyFields<'a> {
    fn push(&mut self, interner: &Interner<'a>, ident: Ident<'a>) {
        match interner.ident(ident) {
            Ok(name) => self.names.push(name),
            Err(error) => self.unresolved.push(error),
        }
    }

    fn visit(&mut self, interner: &Interner<'a>, expr: &KeyExpr<'a>) {
        match expr {
            KeyExpr::Var(name) => self.push(interner, *name),
            KeyExpr::Projection { field, record } => {
                self.push(interner, *field);
                if let Some(projected) = record {
                    self.visit(interner, projected);
                }
            }
            KeyExpr::Construction(fields) => {
                for field in fields {
                    self.push(interner, *field);
                }
            }
            KeyExpr::Application { fun, args } => {
                if let Some(function) = fun {
                    self.visit(interner, function);
                }
                for arg in args {
                    self.visit(interner, arg);
                }
            }
            KeyExpr::Opaque => {}
        }
    }
}

/// Extracts the ordered field names a key expression depends on.
///
/// A projection contributes its field and then whatever the projected
/// expression contributes; a construction contributes its field names only;
/// an application contributes its function and then every argument.
///
/// # Examples
///
/// ```
/// use darlens::intern::Interner;
/// use darlens::ir::{Ident, KeyExpr};
/// use darlens::key::extract_key_fields;
///
/// let strings = vec!["this".to_owned(), "owner".to_owned()];
/// let interner = Interner::new(&strings, Vec::new(), Vec::new());
/// let key = KeyExpr::Projection {
///     field: Ident::Interned(1),
///     record: Some(Box::new(KeyExpr::Var(Ident::Interned(0)))),
/// };
/// assert_eq!(extract_key_fields(&interner, Some(&key)).names, vec!["owner", "this"]);
/// assert!(extract_key_fields(&interner, None).names.is_empty());
/// ```
#[must_use]
pub fn extract_key_fields<'a>(interner: &Interner<'a>, expr: Option<&KeyExpr<'a>>) -> KeyFields<'a> {
    let mut fields = KeyFields::default();
    if let Some(root) = expr {
        fields.visit(interner, root);
    }
    fields
}

/// How the representative key field was chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeySelection {
    /// An extracted name matched a field of the key's type.
    Matched(String),
    /// Nothing matched; the first declared field stands in.
    Fallback(String),
    /// The template has no fields.
    NoFields,
}

impl KeySelection {
    /// Returns the chosen field name, empty when there are no fields.
    #[must_use]
    pub fn field_name(&self) -> &str {
        match self {
            Self::Matched(name) | Self::Fallback(name) => name,
            Self::NoFields => "",
        }
    }
}

/// Picks the single field that represents a template key.
///
/// The first extracted name naming a field whose tag equals `key_tag` wins.
/// Failing that, the first declared field is used; this heuristic can pick
/// the wrong field for composite keys, so callers report it.
#[must_use]
pub fn select_key_field(names: &[&str], fields: &[Field], key_tag: &str) -> KeySelection {
    let matched = names.iter().find_map(|name| {
        fields
            .iter()
            .find(|field| field.name == *name && field.ty == key_tag)
    });
    if let Some(field) = matched {
        return KeySelection::Matched(field.name.clone());
    }
    fields
        .first()
        .map_or(KeySelection::NoFields, |field| {
            KeySelection::Fallback(field.name.clone())
        })
}
