//! Wire schema for first-generation packages.
//!
//! Only the fields the walker reads are declared; protobuf skips the rest.
//! Names may be spelt out inline or interned, so most identifiers are a
//! `oneof` of both forms.

/// Empty message used as a oneof marker.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Unit {}

/// Inline dotted name.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DottedName {
    /// Name segments.
    #[prost(string, repeated, tag = "1")]
    pub segments: Vec<String>,
}

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

/// Name of a declaration: inline or interned.
#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum DeclName {
    /// Inline dotted name.
    #[prost(message, tag = "1")]
    NameDname(DottedName),
    /// Dotted-name table index.
    #[prost(int32, tag = "8")]
    NameInternedDname(i32),
}

/// One module and the declarations it holds.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Module {
    /// Module name.
    #[prost(oneof = "DeclName", tags = "1, 8")]
    pub name: Option<DeclName>,
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
    /// Declaration name.
    #[prost(oneof = "DeclName", tags = "1, 8")]
    pub name: Option<DeclName>,
    /// Shape of the type.
    #[prost(oneof = "def_data_type::DataCons", tags = "3, 4, 7, 9")]
    pub data_cons: Option<def_data_type::DataCons>,
    /// Whether values of the type can be stored in contracts.
    #[prost(bool, tag = "5")]
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
        /// Inline constructor names.
        #[prost(string, repeated, tag = "1")]
        pub constructors_str: Vec<String>,
        /// String-table index of each constructor name.
        #[prost(int32, repeated, tag = "2")]
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
        #[prost(message, tag = "7")]
        Enum(EnumConstructors),
        /// Interface marker.
        #[prost(message, tag = "9")]
        Interface(super::Unit),
    }
}

/// A field or constructor name: inline or interned.
#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum FieldName {
    /// Inline name.
    #[prost(string, tag = "1")]
    FieldStr(String),
    /// String-table index of the name.
    #[prost(int32, tag = "3")]
    FieldInternedStr(i32),
}

/// A named field or constructor and its type.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldWithType {
    /// Field name.
    #[prost(oneof = "FieldName", tags = "1, 3")]
    pub field: Option<FieldName>,
    /// Field type.
    #[prost(message, optional, tag = "2")]
    pub r#type: Option<Type>,
}

/// A binder and its type.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VarWithType {
    /// Variable name.
    #[prost(oneof = "FieldName", tags = "1, 3")]
    pub var: Option<FieldName>,
    /// Type of the binder.
    #[prost(message, optional, tag = "2")]
    pub r#type: Option<Type>,
}

/// Reference to a type constructor or synonym. The module reference at
/// tag 1 is not read.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TypeConName {
    /// Constructor name.
    #[prost(oneof = "type_con_name::Name", tags = "2, 3")]
    pub name: Option<type_con_name::Name>,
}

/// Members of `TypeConName`.
pub mod type_con_name {
    /// Name of the referenced constructor.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Name {
        /// Inline dotted name.
        #[prost(message, tag = "2")]
        NameDname(super::DottedName),
        /// Dotted-name table index.
        #[prost(int32, tag = "3")]
        NameInternedDname(i32),
    }
}

/// Primitive type tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum PrimType {
    /// `UNIT`.
    Unit = 0,
    /// `BOOL`.
    Bool = 1,
    /// `INT64`.
    Int64 = 2,
    /// `DECIMAL`.
    Decimal = 3,
    /// `TEXT`.
    Text = 5,
    /// `TIMESTAMP`.
    Timestamp = 6,
    /// `PARTY`.
    Party = 8,
    /// `LIST`.
    List = 9,
    /// `UPDATE`.
    Update = 10,
    /// `SCENARIO`.
    Scenario = 11,
    /// `DATE`.
    Date = 12,
    /// `CONTRACT_ID`.
    ContractId = 13,
    /// `OPTIONAL`.
    Optional = 14,
    /// `ARROW`.
    Arrow = 15,
    /// `TEXTMAP`.
    Textmap = 16,
    /// `NUMERIC`.
    Numeric = 17,
    /// `ANY`.
    Any = 18,
    /// `TYPE_REP`.
    TypeRep = 19,
    /// `GENMAP`.
    Genmap = 20,
    /// `BIGNUMERIC`.
    Bignumeric = 21,
    /// `ROUNDING_MODE`.
    RoundingMode = 22,
    /// `ANY_EXCEPTION`.
    AnyException = 23,
}

impl PrimType {
    /// Upper-case name used in `prim:` markers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unit => "UNIT",
            Self::Bool => "BOOL",
            Self::Int64 => "INT64",
            Self::Decimal => "DECIMAL",
            Self::Text => "TEXT",
            Self::Timestamp => "TIMESTAMP",
            Self::Party => "PARTY",
            Self::List => "LIST",
            Self::Update => "UPDATE",
            Self::Scenario => "SCENARIO",
            Self::Date => "DATE",
            Self::ContractId => "CONTRACT_ID",
            Self::Optional => "OPTIONAL",
            Self::Arrow => "ARROW",
            Self::Textmap => "TEXTMAP",
            Self::Numeric => "NUMERIC",
            Self::Any => "ANY",
            Self::TypeRep => "TYPE_REP",
            Self::Genmap => "GENMAP",
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
    #[prost(oneof = "r#type::Sum", tags = "1, 2, 3, 5, 7, 8, 9, 10")]
    pub sum: Option<r#type::Sum>,
}

/// Members of `Type`.
pub mod r#type {
    /// Type variable applied to arguments.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Var {
        /// Variable name.
        #[prost(oneof = "super::FieldName", tags = "1, 3")]
        pub var: Option<super::FieldName>,
        /// Type arguments.
        #[prost(message, repeated, tag = "2")]
        pub args: Vec<super::Type>,
    }

    /// Type constructor applied to arguments.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Con {
        /// Referenced constructor.
        #[prost(message, optional, tag = "1")]
        pub tycon: Option<super::TypeConName>,
        /// Type arguments.
        #[prost(message, repeated, tag = "2")]
        pub args: Vec<super::Type>,
    }

    /// Primitive type applied to arguments.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Prim {
        /// Raw [`PrimType`](super::PrimType) tag.
        #[prost(enumeration = "super::PrimType", tag = "1")]
        pub prim: i32,
        /// Type arguments.
        #[prost(message, repeated, tag = "2")]
        pub args: Vec<super::Type>,
    }

    /// Type synonym applied to arguments.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Syn {
        /// Referenced synonym.
        #[prost(message, optional, tag = "1")]
        pub tysyn: Option<super::TypeConName>,
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
        /// Primitive type.
        #[prost(message, tag = "3")]
        Prim(Prim),
        /// Universally quantified type.
        #[prost(message, tag = "5")]
        Forall(super::Unit),
        /// Structural record type.
        #[prost(message, tag = "7")]
        Struct(super::Unit),
        /// Type-level natural number.
        #[prost(int64, tag = "8")]
        Nat(i64),
        /// Type synonym.
        #[prost(message, tag = "9")]
        Syn(Syn),
        /// Type-table index.
        #[prost(int32, tag = "10")]
        Interned(i32),
    }
}

/// A template declaration.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DefTemplate {
    /// Payload type name.
    #[prost(oneof = "def_template::Tycon", tags = "1, 12")]
    pub tycon: Option<def_template::Tycon>,
    /// Name bound to the payload.
    #[prost(oneof = "def_template::Param", tags = "2, 11")]
    pub param: Option<def_template::Param>,
    /// Declared choices.
    #[prost(message, repeated, tag = "7")]
    pub choices: Vec<TemplateChoice>,
    /// Contract key, when declared.
    #[prost(message, optional, tag = "9")]
    pub key: Option<def_template::DefKey>,
}

/// Members of `DefTemplate`.
pub mod def_template {
    /// Name of the template's payload type.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Tycon {
        /// Inline dotted name.
        #[prost(message, tag = "1")]
        TyconDname(super::DottedName),
        /// Dotted-name table index.
        #[prost(int32, tag = "12")]
        TyconInternedDname(i32),
    }

    /// Name the template binds its payload to.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Param {
        /// Inline name.
        #[prost(string, tag = "2")]
        ParamStr(String),
        /// String-table index of the name.
        #[prost(int32, tag = "11")]
        ParamInternedStr(i32),
    }

    /// Contract key of a template.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct DefKey {
        /// Key type.
        #[prost(message, optional, tag = "1")]
        pub r#type: Option<super::Type>,
        /// Key body.
        #[prost(oneof = "def_key::KeyExpr", tags = "2, 4")]
        pub key_expr: Option<def_key::KeyExpr>,
    }

    /// Members of `DefKey`.
    pub mod def_key {
        /// Key body: the legacy form or a general expression.
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum KeyExpr {
            /// Legacy key expression.
            #[prost(message, tag = "2")]
            Key(super::super::KeyExpr),
            /// General expression.
            #[prost(message, tag = "4")]
            ComplexKey(super::super::Expr),
        }
    }
}

/// Legacy key expression: a projection chain or a record of them.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeyExpr {
    /// Which variant this message holds.
    #[prost(oneof = "key_expr::Sum", tags = "1, 2")]
    pub sum: Option<key_expr::Sum>,
}

/// Key body.
pub mod key_expr {
    /// One step of a projection chain.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Projection {
        /// Record type being projected.
        #[prost(message, optional, tag = "1")]
        pub tycon: Option<super::r#type::Con>,
        /// Field name.
        #[prost(oneof = "projection::Field", tags = "2, 3")]
        pub field: Option<projection::Field>,
    }

    /// Members of `Projection`.
    pub mod projection {
        /// Projected field name.
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Field {
            /// Inline name.
            #[prost(string, tag = "2")]
            FieldStr(String),
            /// String-table index of the name.
            #[prost(int32, tag = "3")]
            FieldInternedStr(i32),
        }
    }

    /// A projection chain from the template parameter.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Projections {
        /// Projection steps, outermost first.
        #[prost(message, repeated, tag = "2")]
        pub projections: Vec<Projection>,
    }

    /// A named field of a key record.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct RecordField {
        /// Field name.
        #[prost(oneof = "super::FieldName", tags = "1, 3")]
        pub field: Option<super::FieldName>,
        /// Value of the field.
        #[prost(message, optional, tag = "2")]
        pub expr: Option<super::KeyExpr>,
    }

    /// Record built from key expressions.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Record {
        /// Record type being built.
        #[prost(message, optional, tag = "1")]
        pub tycon: Option<super::r#type::Con>,
        /// Fields of the record.
        #[prost(message, repeated, tag = "2")]
        pub fields: Vec<RecordField>,
    }

    /// Kinds of legacy key expression.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Sum {
        /// Projection chain.
        #[prost(message, tag = "1")]
        Projections(Projections),
        /// Record of key expressions.
        #[prost(message, tag = "2")]
        Record(Record),
    }
}

/// A choice declared by a template or interface.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TemplateChoice {
    /// Choice name.
    #[prost(oneof = "template_choice::Name", tags = "1, 9")]
    pub name: Option<template_choice::Name>,
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

/// Members of `TemplateChoice`.
pub mod template_choice {
    /// Name of the choice.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Name {
        /// Inline name.
        #[prost(string, tag = "1")]
        NameStr(String),
        /// String-table index of the name.
        #[prost(int32, tag = "9")]
        NameInternedStr(i32),
    }
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
    #[prost(oneof = "expr::Sum", tags = "1, 6, 7, 11, 33")]
    pub sum: Option<expr::Sum>,
}

/// Members of `Expr`.
pub mod expr {
    /// A named field and the expression that fills it.
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct FieldWithExpr {
        /// Field name.
        #[prost(oneof = "super::FieldName", tags = "1, 3")]
        pub field: Option<super::FieldName>,
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
        /// Field name.
        #[prost(oneof = "rec_proj::Field", tags = "2, 4")]
        pub field: Option<rec_proj::Field>,
        /// Expression producing the record.
        #[prost(message, optional, tag = "3")]
        pub record: Option<Box<super::Expr>>,
    }

    /// Members of `RecProj`.
    pub mod rec_proj {
        /// Projected field name.
        #[derive(Clone, PartialEq, ::prost::Oneof)]
        pub enum Field {
            /// Inline name.
            #[prost(string, tag = "2")]
            FieldStr(String),
            /// String-table index of the name.
            #[prost(int32, tag = "4")]
            FieldInternedStr(i32),
        }
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
        /// Variable, named inline.
        #[prost(string, tag = "1")]
        VarStr(String),
        /// Record construction.
        #[prost(message, tag = "6")]
        RecCon(RecCon),
        /// Record projection.
        #[prost(message, tag = "7")]
        RecProj(Box<RecProj>),
        /// Function application.
        #[prost(message, tag = "11")]
        App(Box<App>),
        /// Variable, named by string-table index.
        #[prost(int32, tag = "33")]
        VarInternedStr(i32),
    }
}
