//! Type resolver.
//!
//! Renders a [`TypeExpr`] into its raw diagnostic tag and normalises it.
//! Builtins render as `prim:NAME`, applied builtins as `prim:NAME(arg, ...)`
//! and declaration references as the referenced declaration's name.

use crate::intern::{InternError, Interner};
use crate::ir::{DottedRef, Ident, TypeExpr};
use crate::normalize::{Normalized, normalize};
use thiserror::Error;

/// Placeholder for a constructor reference without a name.
pub const UNKNOWN_CON: &str = "unknown_con_type";

/// Placeholder for a type variable without a name.
pub const UNNAMED_VAR: &str = "unnamed_var";

/// Prefix marking a synonym reference.
pub const SYN_PREFIX: &str = "syn_";

/// Interned entries followed before giving up on a chain.
pub const MAX_INTERNED_DEPTH: usize = 32;

/// Interned entries followed in total while rendering one type. Shared
/// entries referenced from several arguments count once per reference.
pub const MAX_INTERNED_EXPANSIONS: usize = 1024;

/// Failures describing a single type expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// An interned index could not be resolved.
    #[error(transparent)]
    Intern(#[from] InternError),

    /// The expression has a shape a field type cannot take.
    #[error("unsupported type shape `{shape}`")]
    UnsupportedTypeShape {
        /// Short name of the encountered shape.
        shape: &'static str,
    },
}

/// Result type alias using [`ResolveError`].
pub type Result<T> = std::result::Result<T, ResolveError>;

/// A resolved type: its raw rendering and normalised tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedType {
    raw: String,
    normalized: Normalized,
}

impl ResolvedType {
    fn new(raw: String) -> Self {
        let normalized = normalize(&raw);
        Self { raw, normalized }
    }

    /// Returns the raw diagnostic rendering.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Returns the canonical tag or referenced declaration name.
    #[must_use]
    pub fn tag(&self) -> &str {
        self.normalized.tag()
    }

    /// Returns `true` if the raw tag carried an unrecognised primitive marker.
    #[must_use]
    pub const fn is_unknown_primitive(&self) -> bool {
        matches!(self.normalized, Normalized::UnknownPrimitive(_))
    }

    /// Splits into `(tag, raw)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.normalized.into_tag(), self.raw)
    }
}

/// Resolves a field, choice or key type.
///
/// # Errors
///
/// Returns [`ResolveError::UnsupportedTypeShape`] when `ty` (or a builtin
/// argument) cannot describe a field, and [`ResolveError::Intern`] when an
/// interned index is out of range.
///
/// # Examples
///
/// ```
/// use darlens::intern::Interner;
/// use darlens::ir::TypeExpr;
/// use darlens::types::resolve_field_type;
///
/// let strings = vec!["Party".to_owned()];
/// let interner = Interner::new(&strings, Vec::new(), Vec::new());
/// let party = TypeExpr::Builtin { prim: Some("PARTY"), code: 8, args: Vec::new() };
/// let resolved = resolve_field_type(&interner, &party).unwrap();
/// assert_eq!(resolved.raw(), "prim:PARTY");
/// assert_eq!(resolved.tag(), "PARTY");
/// ```
pub fn resolve_field_type<'a>(interner: &Interner<'a>, ty: &TypeExpr<'a>) -> Result<ResolvedType> {
    render_type(interner, ty).map(ResolvedType::new)
}

/// Renders `ty` to its raw tag without normalising it.
///
/// An interned entry revisited on its own expansion path, or reached once
/// the depth or expansion budget is spent, renders as `interned:<n>`.
///
/// # Errors
///
/// As for [`resolve_field_type`].
pub fn render_type<'a>(interner: &Interner<'a>, ty: &TypeExpr<'a>) -> Result<String> {
    Renderer {
        interner,
        path: Vec::new(),
        expansions: 0,
    }
    .render(ty)
}

struct Renderer<'i, 'a> {
    interner: &'i Interner<'a>,
    path: Vec<i32>,
    expansions: usize,
}

impl<'a> Renderer<'_, 'a> {
    fn render(&mut self, ty: &TypeExpr<'a>) -> Result<String> {
        match ty {
            TypeExpr::Interned(index) => self.render_interned(*index),
            TypeExpr::Con(name) => con_name(self.interner, *name),
            TypeExpr::Var(name) => var_name(self.interner, *name),
            TypeExpr::Builtin { prim, code, args } => {
                let head = prim.map_or_else(|| format!("prim:#{code}"), |name| format!("prim:{name}"));
                if args.is_empty() {
                    return Ok(head);
                }
                let rendered = args
                    .iter()
                    .map(|arg| self.render(arg))
                    .collect::<Result<Vec<_>>>()?;
                Ok(format!("{head}({})", rendered.join(", ")))
            }
            TypeExpr::Syn(name) => syn_name(self.interner, *name),
            TypeExpr::Unsupported { shape } => Err(ResolveError::UnsupportedTypeShape { shape: *shape }),
        }
    }

    fn render_interned(&mut self, index: i32) -> Result<String> {
        if self.path.contains(&index)
            || self.path.len() >= MAX_INTERNED_DEPTH
            || self.expansions >= MAX_INTERNED_EXPANSIONS
        {
            return Ok(format!("interned:{index}"));
        }
        let interner = self.interner;
        match interner.interned_type(index)? {
            // Shapes the table cannot describe keep a diagnostic rendering.
            TypeExpr::Unsupported { .. } => Ok(format!("interned:{index}")),
            entry => {
                self.expansions += 1;
                self.path.push(index);
                let rendered = self.render(entry);
                self.path.pop();
                rendered
            }
        }
    }
}

fn con_name<'a>(interner: &Interner<'a>, name: DottedRef<'a>) -> Result<String> {
    match name {
        DottedRef::Missing => Ok(UNKNOWN_CON.to_owned()),
        reference => Ok(interner.declaration_name(reference)?.to_owned()),
    }
}

fn var_name<'a>(interner: &Interner<'a>, name: Ident<'a>) -> Result<String> {
    match name {
        Ident::Missing => Ok(UNNAMED_VAR.to_owned()),
        ident => Ok(interner.ident(ident)?.to_owned()),
    }
}

fn syn_name<'a>(interner: &Interner<'a>, name: DottedRef<'a>) -> Result<String> {
    match name {
        DottedRef::Missing => Ok(format!("{SYN_PREFIX}unknown")),
        reference => Ok(format!("{SYN_PREFIX}{}", interner.declaration_name(reference)?)),
    }
}
