//! Generation-neutral views of the declarations the walker reads.
//!
//! Each IR generation lowers its own wire schema into these borrowed views.
//! The walker, the type resolver and the key interpreter only ever see these
//! shapes, so the generations share one walker without sharing a schema.

/// Reference to a single identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ident<'a> {
    /// Index into the interned string table.
    Interned(i32),
    /// Identifier spelt out inline.
    Inline(&'a str),
    /// The identifier was absent from the message.
    Missing,
}

/// Reference to a dotted (module-qualified) name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DottedRef<'a> {
    /// Index into the interned dotted-name table.
    Interned(i32),
    /// Segments spelt out inline.
    Inline(&'a [String]),
    /// The name was absent from the message.
    Missing,
}

/// A type expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpr<'a> {
    /// Indirection into the package's interned type table.
    Interned(i32),
    /// Reference to a declared type constructor.
    Con(DottedRef<'a>),
    /// Type variable.
    Var(Ident<'a>),
    /// Builtin primitive, possibly applied to arguments.
    Builtin {
        /// Primitive name, `None` when the code is unknown to this build.
        prim: Option<&'static str>,
        /// Raw enumeration code.
        code: i32,
        /// Type arguments in order.
        args: Vec<TypeExpr<'a>>,
    },
    /// Reference to a type synonym.
    Syn(DottedRef<'a>),
    /// Any shape a field type cannot be described as.
    Unsupported {
        /// Short name of the encountered shape.
        shape: &'static str,
    },
}

/// A primary-key expression, reduced to the shapes that carry field names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyExpr<'a> {
    /// Variable reference.
    Var(Ident<'a>),
    /// `record.field`.
    Projection {
        /// Projected field.
        field: Ident<'a>,
        /// Expression being projected, if encoded.
        record: Option<Box<KeyExpr<'a>>>,
    },
    /// Record construction; the field names are authoritative.
    Construction(Vec<Ident<'a>>),
    /// Function application.
    Application {
        /// Function position, if encoded.
        fun: Option<Box<KeyExpr<'a>>>,
        /// Arguments in order.
        args: Vec<KeyExpr<'a>>,
    },
    /// Any other expression.
    Opaque,
}

/// A record field or variant constructor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldDecl<'a> {
    /// Field or constructor name.
    pub name: Ident<'a>,
    /// Declared type, if encoded.
    pub ty: Option<TypeExpr<'a>>,
}

/// Constructor shape of a data type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataCons<'a> {
    /// Record with named fields.
    Record(Vec<FieldDecl<'a>>),
    /// Variant with named constructors.
    Variant(Vec<FieldDecl<'a>>),
    /// Enumeration of constructor names.
    Enum(Vec<Ident<'a>>),
    /// Interface placeholder data type.
    Interface,
    /// Missing or unrecognised constructor shape.
    Unknown,
}

/// A declared data type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataTypeDecl<'a> {
    /// Qualified name.
    pub name: DottedRef<'a>,
    /// Whether values of the type may cross the ledger boundary.
    pub serializable: bool,
    /// Constructor shape.
    pub cons: DataCons<'a>,
}

/// A choice on a template or interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceDecl<'a> {
    /// Choice name.
    pub name: Ident<'a>,
    /// Whether exercising archives the contract.
    pub consuming: bool,
    /// Argument type, if encoded.
    pub arg_type: Option<TypeExpr<'a>>,
    /// Return type, if encoded.
    pub ret_type: Option<TypeExpr<'a>>,
}

/// A template primary key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyDecl<'a> {
    /// Declared key type, if encoded.
    pub ty: Option<TypeExpr<'a>>,
    /// Key expression, if encoded.
    pub expr: Option<KeyExpr<'a>>,
}

/// A declared template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateDecl<'a> {
    /// Qualified name; matches its backing data type.
    pub name: DottedRef<'a>,
    /// Choices in declaration order.
    pub choices: Vec<ChoiceDecl<'a>>,
    /// Primary key, if declared.
    pub key: Option<KeyDecl<'a>>,
}

/// A declared interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceDecl<'a> {
    /// Qualified name.
    pub name: DottedRef<'a>,
    /// Choices in declaration order.
    pub choices: Vec<ChoiceDecl<'a>>,
    /// Whether a view type is attached.
    pub has_view: bool,
}

/// A module and the declarations the walker visits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleDecl<'a> {
    /// Qualified module name.
    pub name: DottedRef<'a>,
    /// Data types in declaration order.
    pub data_types: Vec<DataTypeDecl<'a>>,
    /// Templates in declaration order.
    pub templates: Vec<TemplateDecl<'a>>,
    /// Interfaces in declaration order.
    pub interfaces: Vec<InterfaceDecl<'a>>,
}
