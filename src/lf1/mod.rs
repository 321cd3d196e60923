//! First-generation package decoder.
//!
//! Lowers the generation-1 schema into the neutral views of [`crate::ir`].
//! Identifiers may be inline or interned; legacy primary keys (projection
//! chains and records of projections) lower to nested projections rooted at
//! the template parameter.

pub mod proto;

use crate::archive::{DecodedPackage, Generation, PackageDecoder};
use crate::config::DecoderConfig;
use crate::error::{DecodeError, Result};
use crate::intern::Interner;
use crate::ir::{
    ChoiceDecl, DataCons, DataTypeDecl, DottedRef, FieldDecl, Ident, InterfaceDecl, KeyDecl,
    KeyExpr, ModuleDecl, TemplateDecl, TypeExpr,
};
use prost::Message;
use proto::{DeclName, FieldName, PrimType};

/// Decoder for `daml_lf_1` payloads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lf1Decoder;

impl PackageDecoder for Lf1Decoder {
    fn generation(&self) -> Generation {
        Generation::Lf1
    }

    fn decode_package(&self, bytes: &[u8], config: &DecoderConfig) -> Result<DecodedPackage> {
        let package = proto::Package::decode(bytes).map_err(|source| DecodeError::MalformedPackage {
            generation: Generation::Lf1,
            source,
        })?;

        let interner = Interner::new(
            &package.interned_strings,
            package
                .interned_dotted_names
                .iter()
                .map(|dotted| dotted.segments_interned_str.as_slice())
                .collect(),
            package.interned_types.iter().map(lower_type).collect(),
        );
        let modules: Vec<ModuleDecl<'_>> = package.modules.iter().map(lower_module).collect();
        let metadata = package
            .metadata
            .as_ref()
            .map(|meta| (meta.name_interned_str, meta.version_interned_str));

        DecodedPackage::assemble(&interner, &modules, metadata, config)
    }
}

fn decl_name(name: Option<&DeclName>) -> DottedRef<'_> {
    match name {
        Some(DeclName::NameDname(dotted)) => DottedRef::Inline(&dotted.segments),
        Some(DeclName::NameInternedDname(index)) => DottedRef::Interned(*index),
        None => DottedRef::Missing,
    }
}

fn field_name(name: Option<&FieldName>) -> Ident<'_> {
    match name {
        Some(FieldName::FieldStr(text)) => Ident::Inline(text),
        Some(FieldName::FieldInternedStr(index)) => Ident::Interned(*index),
        None => Ident::Missing,
    }
}

fn tycon_name(tycon: Option<&proto::TypeConName>) -> DottedRef<'_> {
    use proto::type_con_name::Name;

    match tycon.and_then(|reference| reference.name.as_ref()) {
        Some(Name::NameDname(dotted)) => DottedRef::Inline(&dotted.segments),
        Some(Name::NameInternedDname(index)) => DottedRef::Interned(*index),
        None => DottedRef::Missing,
    }
}

fn lower_type(ty: &proto::Type) -> TypeExpr<'_> {
    use proto::r#type::Sum;

    match &ty.sum {
        Some(Sum::Var(var)) => TypeExpr::Var(field_name(var.var.as_ref())),
        Some(Sum::Con(con)) => TypeExpr::Con(tycon_name(con.tycon.as_ref())),
        Some(Sum::Prim(prim)) => TypeExpr::Builtin {
            prim: PrimType::try_from(prim.prim).ok().map(PrimType::name),
            code: prim.prim,
            args: prim.args.iter().map(lower_type).collect(),
        },
        Some(Sum::Syn(syn)) => TypeExpr::Syn(tycon_name(syn.tysyn.as_ref())),
        Some(Sum::Interned(index)) => TypeExpr::Interned(*index),
        Some(Sum::Forall(_)) => TypeExpr::Unsupported { shape: "forall" },
        Some(Sum::Struct(_)) => TypeExpr::Unsupported { shape: "struct" },
        Some(Sum::Nat(_)) => TypeExpr::Unsupported { shape: "nat" },
        None => TypeExpr::Unsupported { shape: "empty" },
    }
}

fn lower_fields(fields: &[proto::FieldWithType]) -> Vec<FieldDecl<'_>> {
    fields
        .iter()
        .map(|field| FieldDecl {
            name: field_name(field.field.as_ref()),
            ty: field.r#type.as_ref().map(lower_type),
        })
        .collect()
}

fn lower_data_type(data_type: &proto::DefDataType) -> DataTypeDecl<'_> {
    use proto::def_data_type::DataCons as Cons;

    let cons = match &data_type.data_cons {
        Some(Cons::Record(record)) => DataCons::Record(lower_fields(&record.fields)),
        Some(Cons::Variant(variant)) => DataCons::Variant(lower_fields(&variant.fields)),
        Some(Cons::Enum(constructors)) if constructors.constructors_interned_str.is_empty() => {
            DataCons::Enum(
                constructors
                    .constructors_str
                    .iter()
                    .map(|text| Ident::Inline(text))
                    .collect(),
            )
        }
        Some(Cons::Enum(constructors)) => DataCons::Enum(
            constructors
                .constructors_interned_str
                .iter()
                .map(|index| Ident::Interned(*index))
                .collect(),
        ),
        Some(Cons::Interface(_)) => DataCons::Interface,
        None => DataCons::Unknown,
    };
    DataTypeDecl {
        name: decl_name(data_type.name.as_ref()),
        serializable: data_type.serializable,
        cons,
    }
}

fn lower_expr(expr: &proto::Expr) -> KeyExpr<'_> {
    use proto::expr::Sum;
    use proto::expr::rec_proj::Field;

    match &expr.sum {
        Some(Sum::VarStr(text)) => KeyExpr::Var(Ident::Inline(text)),
        Some(Sum::VarInternedStr(index)) => KeyExpr::Var(Ident::Interned(*index)),
        Some(Sum::RecProj(projection)) => KeyExpr::Projection {
            field: match &projection.field {
                Some(Field::FieldStr(text)) => Ident::Inline(text),
                Some(Field::FieldInternedStr(index)) => Ident::Interned(*index),
                None => Ident::Missing,
            },
            record: projection
                .record
                .as_deref()
                .map(|record| Box::new(lower_expr(record))),
        },
        Some(Sum::RecCon(construction)) => KeyExpr::Construction(
            construction
                .fields
                .iter()
                .map(|field| field_name(field.field.as_ref()))
                .collect(),
        ),
        Some(Sum::App(application)) => KeyExpr::Application {
            fun: application
                .fun
                .as_deref()
                .map(|function| Box::new(lower_expr(function))),
            args: application.args.iter().map(lower_expr).collect(),
        },
        None => KeyExpr::Opaque,
    }
}

/// Lowers a legacy key: a projection chain becomes nested projections
/// rooted at `param`; a record becomes a construction.
fn lower_legacy_key<'a>(key: &'a proto::KeyExpr, param: Ident<'a>) -> KeyExpr<'a> {
    use proto::key_expr::Sum;
    use proto::key_expr::projection::Field;

    match &key.sum {
        Some(Sum::Projections(chain)) => {
            chain
                .projections
                .iter()
                .fold(KeyExpr::Var(param), |record, projection| KeyExpr::Projection {
                    field: match &projection.field {
                        Some(Field::FieldStr(text)) => Ident::Inline(text),
                        Some(Field::FieldInternedStr(index)) => Ident::Interned(*index),
                        None => Ident::Missing,
                    },
                    record: Some(Box::new(record)),
                })
        }
        Some(Sum::Record(record)) => KeyExpr::Construction(
            record
                .fields
                .iter()
                .map(|field| field_name(field.field.as_ref()))
                .collect(),
        ),
        None => KeyExpr::Opaque,
    }
}

fn lower_key<'a>(key: &'a proto::def_template::DefKey, param: Ident<'a>) -> KeyDecl<'a> {
    use proto::def_template::def_key::KeyExpr as Body;

    KeyDecl {
        ty: key.r#type.as_ref().map(lower_type),
        expr: key.key_expr.as_ref().map(|body| match body {
            Body::Key(legacy) => lower_legacy_key(legacy, param),
            Body::ComplexKey(expr) => lower_expr(expr),
        }),
    }
}

fn lower_choice(choice: &proto::TemplateChoice) -> ChoiceDecl<'_> {
    use proto::template_choice::Name;

    ChoiceDecl {
        name: match &choice.name {
            Some(Name::NameStr(text)) => Ident::Inline(text),
            Some(Name::NameInternedStr(index)) => Ident::Interned(*index),
            None => Ident::Missing,
        },
        consuming: choice.consuming,
        arg_type: choice
            .arg_binder
            .as_ref()
            .and_then(|binder| binder.r#type.as_ref())
            .map(lower_type),
        ret_type: choice.ret_type.as_ref().map(lower_type),
    }
}

fn lower_template(template: &proto::DefTemplate) -> TemplateDecl<'_> {
    use proto::def_template::{Param, Tycon};

    let param = match &template.param {
        Some(Param::ParamStr(text)) => Ident::Inline(text),
        Some(Param::ParamInternedStr(index)) => Ident::Interned(*index),
        None => Ident::Missing,
    };
    TemplateDecl {
        name: match &template.tycon {
            Some(Tycon::TyconDname(dotted)) => DottedRef::Inline(&dotted.segments),
            Some(Tycon::TyconInternedDname(index)) => DottedRef::Interned(*index),
            None => DottedRef::Missing,
        },
        choices: template.choices.iter().map(lower_choice).collect(),
        key: template.key.as_ref().map(|key| lower_key(key, param)),
    }
}

fn lower_interface(interface: &proto::DefInterface) -> InterfaceDecl<'_> {
    InterfaceDecl {
        name: DottedRef::Interned(interface.tycon_interned_dname),
        choices: interface.choices.iter().map(lower_choice).collect(),
        has_view: interface.view.is_some(),
    }
}

fn lower_module(module: &proto::Module) -> ModuleDecl<'_> {
    ModuleDecl {
        name: decl_name(module.name.as_ref()),
        data_types: module.data_types.iter().map(lower_data_type).collect(),
        templates: module.templates.iter().map(lower_template).collect(),
        interfaces: module.interfaces.iter().map(lower_interface).collect(),
    }
}
