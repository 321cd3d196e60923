//! Second-generation package decoder.
//!
//! Every identifier in this generation is an interned index, and primary
//! keys are general expressions.

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
use proto::BuiltinType;

/// Decoder for `daml_lf_2` payloads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Lf2Decoder;

impl PackageDecoder for Lf2Decoder {
    fn generation(&self) -> Generation {
        Generation::Lf2
    }

    fn decode_package(&self, bytes: &[u8], config: &DecoderConfig) -> Result<DecodedPackage> {
        let package = proto::Package::decode(bytes).map_err(|source| DecodeError::MalformedPackage {
            generation: Generation::Lf2,
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

fn tycon_name(tycon: Option<&proto::TypeConId>) -> DottedRef<'static> {
    tycon.map_or(DottedRef::Missing, |id| {
        DottedRef::Interned(id.name_interned_dname)
    })
}

fn lower_type(ty: &proto::Type) -> TypeExpr<'static> {
    use proto::r#type::Sum;

    match &ty.sum {
        Some(Sum::Var(var)) => TypeExpr::Var(Ident::Interned(var.var_interned_str)),
        Some(Sum::Con(con)) => TypeExpr::Con(tycon_name(con.tycon.as_ref())),
        Some(Sum::Builtin(builtin)) => TypeExpr::Builtin {
            prim: BuiltinType::try_from(builtin.builtin)
                .ok()
                .map(BuiltinType::name),
            code: builtin.builtin,
            args: builtin.args.iter().map(lower_type).collect(),
        },
        Some(Sum::Syn(syn)) => TypeExpr::Syn(tycon_name(syn.tysyn.as_ref())),
        Some(Sum::Interned(index)) => TypeExpr::Interned(*index),
        Some(Sum::Forall(_)) => TypeExpr::Unsupported { shape: "forall" },
        Some(Sum::Struct(_)) => TypeExpr::Unsupported { shape: "struct" },
        Some(Sum::Nat(_)) => TypeExpr::Unsupported { shape: "nat" },
        None => TypeExpr::Unsupported { shape: "empty" },
    }
}

fn lower_fields(fields: &[proto::FieldWithType]) -> Vec<FieldDecl<'static>> {
    fields
        .iter()
        .map(|field| FieldDecl {
            name: Ident::Interned(field.field_interned_str),
            ty: field.r#type.as_ref().map(lower_type),
        })
        .collect()
}

fn lower_data_type(data_type: &proto::DefDataType) -> DataTypeDecl<'static> {
    use proto::def_data_type::DataCons as Cons;

    let cons = match &data_type.data_cons {
        Some(Cons::Record(record)) => DataCons::Record(lower_fields(&record.fields)),
        Some(Cons::Variant(variant)) => DataCons::Variant(lower_fields(&variant.fields)),
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
        name: DottedRef::Interned(data_type.name_interned_dname),
        serializable: data_type.serializable,
        cons,
    }
}

fn lower_expr(expr: &proto::Expr) -> KeyExpr<'static> {
    use proto::expr::Sum;

    match &expr.sum {
        Some(Sum::VarInternedStr(index)) => KeyExpr::Var(Ident::Interned(*index)),
        Some(Sum::RecProj(projection)) => KeyExpr::Projection {
            field: Ident::Interned(projection.field_interned_str),
            record: projection
                .record
                .as_deref()
                .map(|record| Box::new(lower_expr(record))),
        },
        Some(Sum::RecCon(construction)) => KeyExpr::Construction(
            construction
                .fields
                .iter()
                .map(|field| Ident::Interned(field.field_interned_str))
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

fn lower_choice(choice: &proto::TemplateChoice) -> ChoiceDecl<'static> {
    ChoiceDecl {
        name: Ident::Interned(choice.name_interned_str),
        consuming: choice.consuming,
        arg_type: choice
            .arg_binder
            .as_ref()
            .and_then(|binder| binder.r#type.as_ref())
            .map(lower_type),
        ret_type: choice.ret_type.as_ref().map(lower_type),
    }
}

fn lower_template(template: &proto::DefTemplate) -> TemplateDecl<'static> {
    TemplateDecl {
        name: DottedRef::Interned(template.tycon_interned_dname),
        choices: template.choices.iter().map(lower_choice).collect(),
        key: template.key.as_ref().map(|key| KeyDecl {
            ty: key.r#type.as_ref().map(lower_type),
            expr: key.key_expr.as_ref().map(lower_expr),
        }),
    }
}

fn lower_interface(interface: &proto::DefInterface) -> InterfaceDecl<'static> {
    InterfaceDecl {
        name: DottedRef::Interned(interface.tycon_interned_dname),
        choices: interface.choices.iter().map(lower_choice).collect(),
        has_view: interface.view.is_some(),
    }
}

fn lower_module(module: &proto::Module) -> ModuleDecl<'static> {
    ModuleDecl {
        name: DottedRef::Interned(module.name_interned_dname),
        data_types: module.data_types.iter().map(lower_data_type).collect(),
        templates: module.templates.iter().map(lower_template).collect(),
        interfaces: module.interfaces.iter().map(lower_interface).collect(),
    }
}
