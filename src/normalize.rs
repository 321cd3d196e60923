//! Type normalisation: maps raw type tags onto the canonical tag set.

/// Prefix that marks a builtin primitive in a raw tag.
pub const PRIM_MARKER: &str = "prim:";

/// Literal tag used for enum constructors.
pub const ENUM_TAG: &str = "enum";

/// Canonical tag for enum constructors.
pub const ENUM_CANONICAL: &str = "string";

/// Marker-to-canonical table, one entry per known primitive family.
const FAMILIES: &[(&str, &str)] = &[
    ("prim:PARTY", "PARTY"),
    ("prim:TEXT", "TEXT"),
    ("prim:INT64", "INT64"),
    ("prim:BOOL", "BOOL"),
    ("prim:DECIMAL", "DECIMAL"),
    ("prim:NUMERIC", "NUMERIC"),
    ("prim:DATE", "DATE"),
    ("prim:TIMESTAMP", "TIMESTAMP"),
    ("prim:UNIT", "UNIT"),
    ("prim:LIST", "LIST"),
    ("prim:MAP", "MAP"),
    ("prim:OPTIONAL", "OPTIONAL"),
    ("prim:CONTRACT_ID", "CONTRACT_ID"),
    ("prim:GENMAP", "GENMAP"),
    ("prim:TEXTMAP", "TEXTMAP"),
    ("prim:BIGNUMERIC", "BIGNUMERIC"),
    ("prim:ROUNDING_MODE", "ROUNDING_MODE"),
    ("prim:ANY", "ANY"),
];

/// Outcome of normalising a raw tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Normalized {
    /// The tag matched a known family or the enum literal.
    Canonical(&'static str),
    /// The tag carried a primitive marker no family recognises.
    UnknownPrimitive(String),
    /// A declaration name or placeholder, passed through unchanged.
    Passthrough(String),
}

impl Normalized {
    /// Returns the tag to store in the model.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Canonical(tag) => tag,
            Self::UnknownPrimitive(tag) | Self::Passthrough(tag) => tag,
        }
    }

    /// Consumes the outcome, returning the tag.
    #[must_use]
    pub fn into_tag(self) -> String {
        match self {
            Self::Canonical(tag) => tag.to_owned(),
            Self::UnknownPrimitive(tag) | Self::Passthrough(tag) => tag,
        }
    }
}

/// Returns `true` if `raw[end..]` does not continue the marker's identifier.
fn ends_on_boundary(raw: &str, end: usize) -> bool {
    raw.get(end..)
        .and_then(|rest| rest.chars().next())
        .is_none_or(|next| !(next.is_ascii_uppercase() || next.is_ascii_digit() || next == '_'))
}

/// Finds the earliest boundary-delimited occurrence of `marker` in `raw`.
fn find_marker(raw: &str, marker: &str) -> Option<usize> {
    raw.match_indices(marker)
        .map(|(start, _)| start)
        .find(|start| ends_on_boundary(raw, start + marker.len()))
}

/// Normalises a raw type tag.
///
/// The earliest primitive marker in `raw` decides the family, so an applied
/// builtin such as `prim:LIST(prim:PARTY)` normalises to its outer family.
///
/// # Examples
///
/// ```
/// use darlens::normalize::{Normalized, normalize};
///
/// assert_eq!(normalize("prim:PARTY"), Normalized::Canonical("PARTY"));
/// assert_eq!(normalize("prim:LIST(prim:TEXT)").tag(), "LIST");
/// assert_eq!(normalize("enum").tag(), "string");
/// assert_eq!(normalize("Address"), Normalized::Passthrough("Address".into()));
/// ```
#[must_use]
pub fn normalize(raw: &str) -> Normalized {
    if raw == ENUM_TAG {
        return Normalized::Canonical(ENUM_CANONICAL);
    }

    let earliest = FAMILIES
        .iter()
        .filter_map(|(marker, canonical)| find_marker(raw, marker).map(|start| (start, *canonical)))
        .min_by_key(|(start, _)| *start);

    match earliest {
        Some((_, canonical)) => Normalized::Canonical(canonical),
        None if raw.contains(PRIM_MARKER) => Normalized::UnknownPrimitive(raw.to_owned()),
        None => Normalized::Passthrough(raw.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::party("prim:PARTY", "PARTY")]
    #[case::text("prim:TEXT", "TEXT")]
    #[case::int("prim:INT64", "INT64")]
    #[case::boolean("prim:BOOL", "BOOL")]
    #[case::decimal("prim:DECIMAL", "DECIMAL")]
    #[case::numeric("prim:NUMERIC", "NUMERIC")]
    #[case::date("prim:DATE", "DATE")]
    #[case::timestamp("prim:TIMESTAMP", "TIMESTAMP")]
    #[case::unit("prim:UNIT", "UNIT")]
    #[case::list("prim:LIST(prim:PARTY)", "LIST")]
    #[case::optional("prim:OPTIONAL(prim:TEXT)", "OPTIONAL")]
    #[case::contract_id("prim:CONTRACT_ID(Iou)", "CONTRACT_ID")]
    #[case::genmap("prim:GENMAP(prim:TEXT, prim:INT64)", "GENMAP")]
    #[case::textmap("prim:TEXTMAP(prim:TEXT)", "TEXTMAP")]
    #[case::bignumeric("prim:BIGNUMERIC", "BIGNUMERIC")]
    #[case::rounding("prim:ROUNDING_MODE", "ROUNDING_MODE")]
    #[case::any("prim:ANY", "ANY")]
    #[case::enum_literal("enum", "string")]
    fn maps_known_families(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize(raw).tag(), expected);
    }

    #[rstest]
    #[case::textmap_is_not_text("prim:TEXTMAP")]
    #[case::bignumeric_is_not_numeric("prim:BIGNUMERIC")]
    #[case::genmap_is_not_map("prim:GENMAP")]
    fn markers_respect_token_boundaries(#[case] raw: &str) {
        assert_eq!(normalize(raw).tag(), raw.trim_start_matches(PRIM_MARKER));
    }

    #[rstest]
    #[case::type_rep("prim:TYPE_REP")]
    #[case::unknown_code("prim:#42")]
    #[case::any_exception("prim:ANY_EXCEPTION")]
    fn reports_unknown_primitives(#[case] raw: &str) {
        assert_eq!(normalize(raw), Normalized::UnknownPrimitive(raw.to_owned()));
    }

    #[rstest]
    #[case::declaration("USAddress")]
    #[case::synonym("syn_Amount")]
    #[case::placeholder("unknown_con_type")]
    fn passes_declaration_names_through(#[case] raw: &str) {
        assert_eq!(normalize(raw), Normalized::Passthrough(raw.to_owned()));
    }
}
