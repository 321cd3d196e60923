//! Wire schema for second-generation packages.
//!
//! Every identifier is interned; only the fields the walker reads are
//! declared.

/// Empty message used as a oneof marker.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Unit {}

/// Interned dotted name: indices into the string table.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct InternedDottedName {
    /// String-table index of each segment.
    #[prost(int32, repeated, tag = "1")]
    pub segments_interned_str: Vec<i32>,
}

/// Package name and version, as string-table indices.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PackageMetadata {
    /// String-table index of the name.
    #[prost(int32, tag = "1")]
    pub name_interned_str: i32,
    /// String-table index of the version.
    #[prost(int32, tag = "2")]
    pub version_interned_str: i32,
}

/// A decoded package: its modules plus the interning tables they index into.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Package {
    /// Modules in declaration order.
    #[prost(message, repeated, tag = "1")]
    pub modules: Vec<Module>,
    /// String table.
    #[prost(string, repeated, tag = "2")]
    pub interned_strings: Vec<String>,
    /// Dotted-name table.
    #[prost(message, repeated, tag = "3")]
    pub interned_dotted_names: Vec<InternedDottedName>,
    /// Package name and version, when present.
    #[prost(message, optional, tag = "4")]
    pub metadata: Option<PackageMetadata>,
    /// Type table.
    #[prost(message, repeated, tag = "5")]
    pub interned_types: Vec<Type>,
}

/// One module and the declarations it holds.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Module {
    /// Dotted-name table index of the module name.
    #[prost(int32, tag = "1")]
    pub name_interned_dname: i32,
    /// Data type declarations.
    #[prost(message, repeated, tag = "3")]
    pub data_types: Vec<DefDataType>,
    /// Template declarations.
    #[prost(message, repeated, tag = "5")]
    pub templates: Vec<DefTemplate>,
    /// Interface declarations.
    #[prost(message, repeated, tag = "11")]
    pub interfaces: Vec<DefInterface>,
}

/// A data type declaration.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DefDataType {
    /// Dotted-name table index of the name.
    #[prost(int32, tag = "1")]
    pub name_interned_dname: i32,
    /// Shape of the type.
    #[prost(oneof = "def_data_type::DataCons", tags = "3, 4, 5, 6")]
    pub data_cons: Option<def_data_type::DataCons>,
    /// Whether values of the type can be stored in contracts.
    #[prost(bool, tag = "7")]
    pub serializable: bool,
}

/// Members of `DefDataType`.
pub mod def_data_type {
    /// Ordered fields of a record or constructors of a variant.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Fields {
        /// Fields in declaration order.
        #[prost(message, repeated, tag = "1")]
        pub fields: Vec<super::FieldWithType>,
    }

    /// Constructor names of an enum.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct EnumConstructors {
        /// String-table index of each constructor name.
        #[prost(int32, repeated, tag = "1")]
        pub constructors_interned_str: Vec<i32>,
    }

    /// Shape of a data type.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum DataCons {
        /// Record with named fields.
        #[prost(message, tag = "3")]
        Record(Fields),
        /// Variant with named constructors.
        #[prost(message, tag = "4")]
        Variant(Fields),
        /// Enum with nullary constructors.
        #[prost(message, tag = "5")]
        Enum(EnumConstructors),
        /// Interface marker.
        #[prost(message, tag = "6")]
        Interface(super::Unit),
    }
}

/// A named field or constructor and its type.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldWithType {
    /// String-table index of the field name.
    #[prost(int32, tag = "1")]
    pub field_interned_str: i32,
    /// Field type.
    #[prost(message, optional, tag = "2")]
    pub r#type: Option<Type>,
}

/// A binder and its type.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VarWithType {
    /// String-table index of the variable name.
    #[prost(int32, tag = "1")]
    pub var_interned_str: i32,
    /// Type of the binder.
    #[prost(message, optional, tag = "2")]
    pub r#type: Option<Type>,
}

/// Reference to a type constructor or synonym. The module reference at
/// tag 1 is not read.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TypeConId {
    /// Dotted-name table index of the name.
    #[prost(int32, tag = "2")]
    pub name_interned_dname: i32,
}

/// Builtin type tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum BuiltinType {
    /// `UNIT`.
    Unit = 0,
    /// `BOOL`.
    Bool = 1,
    /// `INT64`.
    Int64 = 2,
    /// `DATE`.
    Date = 3,
    /// `TIMESTAMP`.
    Timestamp = 4,
    /// `NUMERIC`.
    Numeric = 5,
    /// `PARTY`.
    Party = 6,
    /// `TEXT`.
    Text = 7,
    /// `CONTRACT_ID`.
    ContractId = 8,
    /// `OPTIONAL`.
    Optional = 9,
    /// `LIST`.
    List = 10,
    /// `TEXTMAP`.
    Textmap = 11,
    /// `GENMAP`.
    Genmap = 12,
    /// `ANY`.
    Any = 13,
    /// `TYPE_REP`.
    TypeRep = 14,
    /// `UPDATE`.
    Update = 15,
    /// `ARROW`.
    Arrow = 16,
    /// `BIGNUMERIC`.
    Bignumeric = 17,
    /// `ROUNDING_MODE`.
    RoundingMode = 18,
    /// `ANY_EXCEPTION`.
    AnyException = 19,
}

impl BuiltinType {
    /// Upper-case name used in `prim:` markers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unit => "UNIT",
            Self::Bool => "BOOL",
            Self::Int64 => "INT64",
            Self::Date => "DATE",
            Self::Timestamp => "TIMESTAMP",
            Self::Numeric => "NUMERIC",
            Self::Party => "PARTY",
            Self::Text => "TEXT",
            Self::ContractId => "CONTRACT_ID",
            Self::Optional => "OPTIONAL",
            Self::List => "LIST",
            Self::Textmap => "TEXTMAP",
            Self::Genmap => "GENMAP",
            Self::Any => "ANY",
            Self::TypeRep => "TYPE_REP",
            Self::Update => "UPDATE",
            Self::Arrow => "ARROW",
            Self::Bignumeric => "BIGNUMERIC",
            Self::RoundingMode => "ROUNDING_MODE",
            Self::AnyException => "ANY_EXCEPTION",
        }
    }
}

/// A type expression.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Type {
    /// Which variant this message holds.
    #[prost(oneof = "r#type::Sum", tags = "1, 2, 3, 4, 5, 6, 7, 8")]
    pub sum: Option<r#type::Sum>,
}

/// Members of `Type`.
pub mod r#type {
    /// Type variable applied to arguments.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Var {
        /// String-table index of the variable name.
        #[prost(int32, tag = "1")]
        pub var_interned_str: i32,
        /// Type arguments.
        #[prost(message, repeated, tag = "2")]
        pub args: Vec<super::Type>,
    }

    /// Type constructor applied to arguments.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Con {
        /// Referenced constructor.
        #[prost(message, optional, tag = "1")]
        pub tycon: Option<super::TypeConId>,
        /// Type arguments.
        #[prost(message, repeated, tag = "2")]
        pub args: Vec<super::Type>,
    }

    /// Builtin type applied to arguments.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Builtin {
        /// Raw [`BuiltinType`](super::BuiltinType) tag.
        #[prost(enumeration = "super::BuiltinType", tag = "1")]
        pub builtin: i32,
        /// Type arguments.
        #[prost(message, repeated, tag = "2")]
        pub args: Vec<super::Type>,
    }

    /// Type synonym applied to arguments.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Syn {
        /// Referenced synonym.
        #[prost(message, optional, tag = "1")]
        pub tysyn: Option<super::TypeConId>,
        /// Type arguments.
        #[prost(message, repeated, tag = "2")]
        pub args: Vec<super::Type>,
    }

    /// Kinds of type expression.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Sum {
        /// Type variable.
        #[prost(message, tag = "1")]
        Var(Var),
        /// Type constructor.
        #[prost(message, tag = "2")]
        Con(Con),
        /// Builtin type.
        #[prost(message, tag = "3")]
        Builtin(Builtin),
        /// Universally quantified type.
        #[prost(message, tag = "4")]
        Forall(super::Unit),
        /// Structural record type.
        #[prost(message, tag = "5")]
        Struct(super::Unit),
        /// Type-level natural number.
        #[prost(int64, tag = "6")]
        Nat(i64),
        /// Type synonym.
        #[prost(message, tag = "7")]
        Syn(Syn),
        /// Type-table index.
        #[prost(int32, tag = "8")]
        Interned(i32),
    }
}

/// A template declaration.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DefTemplate {
    /// Dotted-name table index of the type name.
    #[prost(int32, tag = "1")]
    pub tycon_interned_dname: i32,
    /// String-table index of the parameter name.
    #[prost(int32, tag = "2")]
    pub param_interned_str: i32,
    /// Declared choices.
    #[prost(message, repeated, tag = "6")]
    pub choices: Vec<TemplateChoice>,
    /// Contract key, when declared.
    #[prost(message, optional, tag = "8")]
    pub key: Option<def_template::DefKey>,
}

/// Members of `DefTemplate`.
pub mod def_template {
    /// Contract key of a template.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DefKey {
        /// Key type.
        #[prost(message, optional, tag = "1")]
        pub r#type: Option<super::Type>,
        /// Key body.
        #[prost(message, optional, tag = "2")]
        pub key_expr: Option<super::Expr>,
    }
}

/// A choice declared by a template or interface.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TemplateChoice {
    /// String-table index of the name.
    #[prost(int32, tag = "1")]
    pub name_interned_str: i32,
    /// Whether exercising the choice archives the contract.
    #[prost(bool, tag = "2")]
    pub consuming: bool,
    /// Choice argument binder.
    #[prost(message, optional, tag = "6")]
    pub arg_binder: Option<VarWithType>,
    /// Return type.
    #[prost(message, optional, tag = "7")]
    pub ret_type: Option<Type>,
}

/// An interface declaration.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DefInterface {
    /// Dotted-name table index of the type name.
    #[prost(int32, tag = "2")]
    pub tycon_interned_dname: i32,
    /// String-table index of the parameter name.
    #[prost(int32, tag = "4")]
    pub param_interned_str: i32,
    /// Declared choices.
    #[prost(message, repeated, tag = "5")]
    pub choices: Vec<TemplateChoice>,
    /// View type of the interface.
    #[prost(message, optional, tag = "8")]
    pub view: Option<Type>,
}

/// General expression; only the arms that can carry key field names are
/// declared.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Expr {
    /// Which variant this message holds.
    #[prost(oneof = "expr::Sum", tags = "2, 7, 8, 11")]
    pub sum: Option<expr::Sum>,
}

/// Members of `Expr`.
pub mod expr {
    /// A named field and the expression that fills it.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct FieldWithExpr {
        /// String-table index of the field name.
        #[prost(int32, tag = "1")]
        pub field_interned_str: i32,
        /// Value of the field.
        #[prost(message, optional, tag = "2")]
        pub expr: Option<super::Expr>,
    }

    /// Record construction.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct RecCon {
        /// Record type being built.
        #[prost(message, optional, tag = "1")]
        pub tycon: Option<super::r#type::Con>,
        /// Fields in declaration order.
        #[prost(message, repeated, tag = "2")]
        pub fields: Vec<FieldWithExpr>,
    }

    /// Record projection.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct RecProj {
        /// Record type being projected.
        #[prost(message, optional, tag = "1")]
        pub tycon: Option<super::r#type::Con>,
        /// String-table index of the field name.
        #[prost(int32, tag = "2")]
        pub field_interned_str: i32,
        /// Expression producing the record.
        #[prost(message, optional, tag = "3")]
        pub record: Option<Box<super::Expr>>,
    }

    /// Function application.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct App {
        /// Function being applied.
        #[prost(message, optional, tag = "1")]
        pub fun: Option<Box<super::Expr>>,
        /// Arguments in application order.
        #[prost(message, repeated, tag = "2")]
        pub args: Vec<super::Expr>,
    }

    /// Kinds of expression.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Sum {
        /// Variable, named by string-table index.
        #[prost(int32, tag = "2")]
        VarInternedStr(i32),
        /// Record construction.
        #[prost(message, tag = "7")]
        RecCon(RecCon),
        /// Record projection.
        #[prost(message, tag = "8")]
        RecProj(Box<RecProj>),
        /// Function application.
        #[prost(message, tag = "11")]
        App(Box<App>),
    }
}
