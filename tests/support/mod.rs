//! Synthetic archive builders shared by the decoder's integration suites.
//!
//! Modules are assembled from the second-generation wire schema, where every
//! identifier is interned, and wrapped in a correctly hashed envelope. No
//! binary fixtures are checked in; every archive a test decodes is built
//! here.

use darlens::archive::{Archive, ArchivePayload, HashFunction, archive_payload, payload_hash};
use darlens::lf2::proto::{self, BuiltinType, def_data_type, def_template, expr, r#type};
use prost::Message;

/// Builds a single-module package named `Main`.
#[derive(Debug)]
pub struct PackageBuilder {
    strings: Vec<String>,
    dotted: Vec<proto::InternedDottedName>,
    data_types: Vec<proto::DefDataType>,
    templates: Vec<proto::DefTemplate>,
}

impl Default for PackageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageBuilder {
    /// Starts a package whose only module is `Main`.
    pub fn new() -> Self {
        let mut builder = Self {
            strings: vec![String::new()],
            dotted: Vec::new(),
            data_types: Vec::new(),
            templates: Vec::new(),
        };
        builder.dotted(&["Main"]);
        builder
    }

    fn intern(&mut self, text: &str) -> i32 {
        let position = self
            .strings
            .iter()
            .position(|existing| existing == text)
            .unwrap_or_else(|| {
                self.strings.push(text.to_owned());
                self.strings.len() - 1
            });
        i32::try_from(position).expect("string table fits in i32")
    }

    fn dotted(&mut self, segments: &[&str]) -> i32 {
        let interned = proto::InternedDottedName {
            segments_interned_str: segments.iter().map(|segment| self.intern(segment)).collect(),
        };
        self.dotted.push(interned);
        i32::try_from(self.dotted.len() - 1).expect("dotted table fits in i32")
    }

    fn builtin(builtin: BuiltinType) -> proto::Type {
        proto::Type {
            sum: Some(r#type::Sum::Builtin(r#type::Builtin {
                builtin: builtin.into(),
                args: Vec::new(),
            })),
        }
    }

    fn con(&mut self, name: &str) -> proto::Type {
        proto::Type {
            sum: Some(r#type::Sum::Con(r#type::Con {
                tycon: Some(proto::TypeConId {
                    name_interned_dname: self.dotted(&["Main", name]),
                }),
                args: Vec::new(),
            })),
        }
    }

    /// Declares a serializable record with builtin-typed fields.
    pub fn record(&mut self, name: &str, fields: &[(&str, BuiltinType)]) -> &mut Self {
        let fields = fields
            .iter()
            .map(|(field, builtin)| proto::FieldWithType {
                field_interned_str: self.intern(field),
                r#type: Some(Self::builtin(*builtin)),
            })
            .collect();
        let name_interned_dname = self.dotted(&["Main", name]);
        self.data_types.push(proto::DefDataType {
            name_interned_dname,
            data_cons: Some(def_data_type::DataCons::Record(def_data_type::Fields { fields })),
            serializable: true,
        });
        self
    }

    /// Declares a serializable variant whose constructors each carry a
    /// declared type of the same module.
    pub fn variant(&mut self, name: &str, constructors: &[(&str, &str)]) -> &mut Self {
        let fields = constructors
            .iter()
            .map(|(constructor, payload)| proto::FieldWithType {
                field_interned_str: self.intern(constructor),
                r#type: Some(self.con(payload)),
            })
            .collect();
        let name_interned_dname = self.dotted(&["Main", name]);
        self.data_types.push(proto::DefDataType {
            name_interned_dname,
            data_cons: Some(def_data_type::DataCons::Variant(def_data_type::Fields { fields })),
            serializable: true,
        });
        self
    }

    /// Declares a serializable data type with no constructor shape.
    pub fn shapeless(&mut self, name: &str) -> &mut Self {
        let name_interned_dname = self.dotted(&["Main", name]);
        self.data_types.push(proto::DefDataType {
            name_interned_dname,
            data_cons: None,
            serializable: true,
        });
        self
    }

    /// Declares a template over the record `name` with one consuming
    /// `Accept` choice from `Unit` to `Unit`.
    pub fn template(&mut self, name: &str) -> &mut Self {
        let choice = proto::TemplateChoice {
            name_interned_str: self.intern("Accept"),
            consuming: true,
            arg_binder: Some(proto::VarWithType {
                var_interned_str: self.intern("arg"),
                r#type: Some(Self::builtin(BuiltinType::Unit)),
            }),
            ret_type: Some(Self::builtin(BuiltinType::Unit)),
        };
        let template = proto::DefTemplate {
            tycon_interned_dname: self.dotted(&["Main", name]),
            param_interned_str: self.intern("this"),
            choices: vec![choice],
            key: None,
        };
        self.templates.push(template);
        self
    }

    /// Keys the most recently declared template by `this.field`.
    pub fn keyed_by(&mut self, field: &str, ty: BuiltinType) -> &mut Self {
        let key_expr = proto::Expr {
            sum: Some(expr::Sum::RecProj(Box::new(expr::RecProj {
                tycon: None,
                field_interned_str: self.intern(field),
                record: Some(Box::new(proto::Expr {
                    sum: Some(expr::Sum::VarInternedStr(self.intern("this"))),
                })),
            }))),
        };
        if let Some(template) = self.templates.last_mut() {
            template.key = Some(def_template::DefKey {
                r#type: Some(Self::builtin(ty)),
                key_expr: Some(key_expr),
            });
        }
        self
    }

    /// Encodes the package.
    pub fn package_bytes(&self) -> Vec<u8> {
        proto::Package {
            modules: vec![proto::Module {
                name_interned_dname: 0,
                data_types: self.data_types.clone(),
                templates: self.templates.clone(),
                interfaces: Vec::new(),
            }],
            interned_strings: self.strings.clone(),
            interned_dotted_names: self.dotted.clone(),
            metadata: None,
            interned_types: Vec::new(),
        }
        .encode_to_vec()
    }

    /// Encodes the package inside a correctly hashed archive envelope.
    pub fn archive_bytes(&self) -> Vec<u8> {
        envelope(&ArchivePayload {
            minor: "1".to_owned(),
            sum: Some(archive_payload::Sum::DamlLf2(self.package_bytes())),
        })
    }
}

/// Wraps `payload` in an envelope carrying its SHA-256 hash.
pub fn envelope(payload: &ArchivePayload) -> Vec<u8> {
    let payload_bytes = payload.encode_to_vec();
    Archive {
        hash_function: HashFunction::Sha256.into(),
        hash: payload_hash(&payload_bytes),
        payload: payload_bytes,
    }
    .encode_to_vec()
}

/// An archive whose payload names no generation.
pub fn generationless_archive() -> Vec<u8> {
    envelope(&ArchivePayload {
        minor: "dev".to_owned(),
        sum: None,
    })
}
