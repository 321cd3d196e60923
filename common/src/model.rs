//! Normalised, encoding-independent type model of a decoded package.
//!
//! This is the contract handed to downstream consumers such as code
//! emitters. Nothing here refers to the container layout or the wire
//! encoding the model was extracted from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named, typed slot of a record, or a constructor of a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field or constructor name.
    pub name: String,
    /// Canonical type tag (for example `PARTY`) or a referenced declaration name.
    #[serde(rename = "type")]
    pub ty: String,
    /// Diagnostic rendering of the type before normalisation.
    pub raw_type: String,
    /// Set for variant constructor payloads: at most one is present at a time.
    pub is_optional: bool,
}

impl Field {
    /// Creates a required field.
    ///
    /// # Examples
    ///
    /// ```
    /// use darlens_common::model::Field;
    ///
    /// let field = Field::new("owner", "PARTY", "prim:PARTY");
    /// assert!(!field.is_optional);
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<String>, raw_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            raw_type: raw_type.into(),
            is_optional: false,
        }
    }

    /// Marks the field as an optional (tagged-union) payload.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }
}

/// A named operation on a template or interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Choice name, unique within its owner.
    pub name: String,
    /// Whether exercising the choice archives the contract.
    pub is_consuming: bool,
    /// Normalised argument type.
    pub arg_type: String,
    /// Normalised return type.
    pub return_type: String,
}

/// Primary key description of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInfo {
    /// Best-effort single representative field; empty when the template has
    /// no fields.
    pub field_name: String,
    /// Canonical type tag of the key.
    #[serde(rename = "type")]
    pub ty: String,
    /// Diagnostic rendering of the key type.
    pub raw_type: String,
}

/// Record payload. Templates are records with choices and an optional key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// Choices in declaration order; always empty for plain records.
    pub choices: Vec<Choice>,
    /// Primary key, if the template declares one.
    pub key: Option<KeyInfo>,
    /// Distinguishes templates from plain records.
    pub is_template: bool,
}

impl Record {
    /// Creates a plain (non-template) record.
    #[must_use]
    pub fn plain(fields: Vec<Field>) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Creates a template record with no key.
    #[must_use]
    pub fn template(fields: Vec<Field>, choices: Vec<Choice>) -> Self {
        Self {
            fields,
            choices,
            key: None,
            is_template: true,
        }
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// The four structural shapes a declaration can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructuredType {
    /// A record or template.
    Record(Record),
    /// A tagged union; each entry names a constructor and its payload type.
    Variant {
        /// Constructors in declaration order.
        constructors: Vec<Field>,
    },
    /// A payload-free enumeration.
    Enum {
        /// Constructor names in declaration order.
        constructors: Vec<String>,
    },
    /// An interface and the choices it exposes.
    Interface {
        /// Choices in declaration order.
        choices: Vec<Choice>,
    },
}

impl StructuredType {
    /// Returns the record payload when this is a record or template.
    #[must_use]
    pub const fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Returns `true` for templates.
    #[must_use]
    pub const fn is_template(&self) -> bool {
        matches!(self, Self::Record(Record { is_template: true, .. }))
    }

    /// Returns a short label for the shape, used in logs and summaries.
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Record(Record { is_template: true, .. }) => "template",
            Self::Record(_) => "record",
            Self::Variant { .. } => "variant",
            Self::Enum { .. } => "enum",
            Self::Interface { .. } => "interface",
        }
    }
}

/// Descriptive metadata for a package, gathered from the IR and the
/// container manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Package name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Names of the other modules bundled alongside this one.
    pub dependencies: Vec<String>,
    /// IR language version (for example `1.17` or `2.1`).
    pub lang_version: String,
    /// Tool that produced the container.
    pub created_by: String,
    /// SDK version that produced the container.
    pub sdk_version: String,
    /// Creation timestamp, kept as the opaque string found in the container.
    pub created_at: Option<String>,
}

/// A fully decoded package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Content hash identifying the package.
    pub package_id: String,
    /// Descriptive metadata.
    pub metadata: Metadata,
    /// Declarations keyed by their (last-segment) name.
    pub structs: BTreeMap<String, StructuredType>,
}

impl Package {
    /// Looks up a declaration by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&StructuredType> {
        self.structs.get(name)
    }

    /// Iterates over template declarations.
    pub fn templates(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.structs.iter().filter_map(|(name, ty)| match ty {
            StructuredType::Record(record) if record.is_template => Some((name.as_str(), record)),
            _ => None,
        })
    }
}

/// Accumulates declarations under the "first write wins" rule.
#[derive(Debug, Default)]
pub struct PackageBuilder {
    structs: BTreeMap<String, StructuredType>,
}

impl PackageBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `ty` under `name` unless the name is empty or already taken.
    ///
    /// Returns `true` when the entry was stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use darlens_common::model::{PackageBuilder, StructuredType};
    ///
    /// let mut builder = PackageBuilder::new();
    /// assert!(builder.insert("Color", StructuredType::Enum { constructors: vec![] }));
    /// assert!(!builder.insert("Color", StructuredType::Interface { choices: vec![] }));
    /// ```
    pub fn insert(&mut self, name: impl Into<String>, ty: StructuredType) -> bool {
        let name = name.into();
        if name.is_empty() || self.structs.contains_key(&name) {
            return false;
        }
        self.structs.insert(name, ty);
        true
    }

    /// Returns `true` if `name` has already been written.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.structs.contains_key(name)
    }

    /// Finishes the package.
    #[must_use]
    pub fn build(self, package_id: impl Into<String>, metadata: Metadata) -> Package {
        Package {
            package_id: package_id.into(),
            metadata,
            structs: self.structs,
        }
    }
}
