//! Module walker and package assembly.
//!
//! [`walk_module`] extracts one module's templates, interfaces and residual
//! data types into a [`ModuleExtract`] without touching shared state.
//! [`walk_package`] runs it over every module, sequentially or on a worker
//! pool, and merges the extracts in kind order once every walk has finished.

use crate::config::DecoderConfig;
use crate::error::{DecodeError, Result};
use crate::intern::{InternError, Interner};
use crate::ir::{
    ChoiceDecl, DataCons, DataTypeDecl, DottedRef, FieldDecl, Ident, InterfaceDecl, KeyDecl,
    ModuleDecl, TemplateDecl, TypeExpr,
};
use crate::key::{KeySelection, extract_key_fields, select_key_field};
use crate::types::{ResolveError, resolve_field_type};
use darlens_common::diagnostics::{self, DiagnosticKind, Diagnostics};
use darlens_common::model::{Choice, Field, KeyInfo, PackageBuilder, Record, StructuredType};
use log::{debug, info};
use rayon::prelude::*;
use std::time::Instant;

/// Declarations extracted from one module, grouped by pass.
#[derive(Debug, Default)]
pub struct ModuleExtract {
    /// Qualified module name, or empty when it could not be resolved.
    pub module: String,
    /// Templates in declaration order.
    pub templates: Vec<(String, StructuredType)>,
    /// Interfaces in declaration order.
    pub interfaces: Vec<(String, StructuredType)>,
    /// Residual serializable data types in declaration order.
    pub data_types: Vec<(String, StructuredType)>,
    /// Diagnostics recorded while walking.
    pub diagnostics: Diagnostics,
}

impl ModuleExtract {
    fn produced(&self, name: &str) -> bool {
        self.templates
            .iter()
            .chain(&self.interfaces)
            .any(|(existing, _)| existing == name)
    }
}

/// Result of walking every module of a package.
#[derive(Debug, Default)]
pub struct PackageWalk {
    /// Merged declarations.
    pub builder: PackageBuilder,
    /// Diagnostics from every module, in module order.
    pub diagnostics: Diagnostics,
}

struct ModuleWalker<'i, 'a> {
    interner: &'i Interner<'a>,
    extract: ModuleExtract,
}

/// Extracts every declaration of `module`.
///
/// Failures confined to a field, choice or declaration are recorded in the
/// returned diagnostics; nothing here aborts the walk.
#[must_use]
pub fn walk_module<'a>(interner: &Interner<'a>, module: &ModuleDecl<'a>) -> ModuleExtract {
    let (module_name, unresolved_name) = match interner.qualified_name(module.name) {
        Ok(name) => (name, None),
        Err(error) => (String::new(), Some(error)),
    };
    info!(
        "walking module `{module_name}`: {} data types, {} templates, {} interfaces",
        module.data_types.len(),
        module.templates.len(),
        module.interfaces.len()
    );

    let mut walker = ModuleWalker {
        interner,
        extract: ModuleExtract {
            module: module_name,
            ..ModuleExtract::default()
        },
    };
    if let Some(error) = unresolved_name {
        walker.extract.diagnostics.push(
            diagnostics::info(
                DiagnosticKind::UnresolvedIndex,
                format!("module name unresolved ({error}); declarations walked without a module label"),
            )
            .build(),
        );
    }
    for template in &module.templates {
        walker.template(template, &module.data_types);
    }
    for interface in &module.interfaces {
        walker.interface(interface);
    }
    for data_type in &module.data_types {
        walker.data_type(data_type);
    }
    walker.extract
}

impl<'a> ModuleWalker<'_, 'a> {
    fn warn(&mut self, kind: DiagnosticKind, declaration: &str, message: impl Into<String>) {
        self.extract
            .diagnostics
            .push(diagnostics::warning(kind, message).declaration(declaration).build());
    }

    fn declaration_name(&mut self, name: DottedRef<'a>, what: &str) -> Option<&'a str> {
        match self.interner.declaration_name(name) {
            Ok("") | Err(InternError::EmptyDottedName { .. }) => {
                self.extract.diagnostics.push(
                    diagnostics::warning(
                        DiagnosticKind::EmptyDeclarationName,
                        format!("skipped {what} with an empty name in `{}`", self.extract.module),
                    )
                    .build(),
                );
                None
            }
            Ok(resolved) => Some(resolved),
            Err(error) => {
                self.extract.diagnostics.push(
                    diagnostics::warning(
                        DiagnosticKind::UnresolvedIndex,
                        format!("skipped {what} in `{}`: {error}", self.extract.module),
                    )
                    .build(),
                );
                None
            }
        }
    }

    /// Resolves a type, reporting failures against `declaration`.
    fn resolve_type(&mut self, declaration: &str, what: &str, ty: &TypeExpr<'a>) -> Option<(String, String)> {
        match resolve_field_type(self.interner, ty) {
            Ok(resolved) => {
                if resolved.is_unknown_primitive() {
                    self.warn(
                        DiagnosticKind::UnnormalizedPrimitive,
                        declaration,
                        format!("{what} has unrecognised primitive `{}`", resolved.raw()),
                    );
                }
                Some(resolved.into_parts())
            }
            Err(ResolveError::Intern(error)) => {
                self.warn(DiagnosticKind::UnresolvedIndex, declaration, format!("{what}: {error}"));
                None
            }
            Err(error @ ResolveError::UnsupportedTypeShape { .. }) => {
                self.warn(DiagnosticKind::UnsupportedTypeShape, declaration, format!("{what}: {error}"));
                None
            }
        }
    }

    fn ident(&mut self, declaration: &str, what: &str, ident: Ident<'a>) -> Option<&'a str> {
        match self.interner.ident(ident) {
            Ok(name) => Some(name),
            Err(error) => {
                self.warn(
                    DiagnosticKind::UnresolvedIndex,
                    declaration,
                    format!("dropped {what}: {error}"),
                );
                None
            }
        }
    }

    fn fields(&mut self, declaration: &str, decls: &[FieldDecl<'a>], optional: bool) -> Vec<Field> {
        let mut fields = Vec::with_capacity(decls.len());
        for decl in decls {
            let Some(name) = self.ident(declaration, "field", decl.name) else {
                continue;
            };
            let what = format!("field `{name}`");
            let (ty, raw) = match &decl.ty {
                Some(ty) => self.resolve_type(declaration, &what, ty).unwrap_or_default(),
                None => {
                    self.warn(
                        DiagnosticKind::UnsupportedTypeShape,
                        declaration,
                        format!("{what} has no type"),
                    );
                    (String::new(), String::new())
                }
            };
            let field = Field::new(name, ty, raw);
            fields.push(if optional { field.optional() } else { field });
        }
        fields
    }

    fn choice_type(&mut self, declaration: &str, what: &str, declared: Option<&TypeExpr<'a>>) -> String {
        let Some(ty) = declared else {
            self.warn(
                DiagnosticKind::MissingChoiceType,
                declaration,
                format!("{what} is absent"),
            );
            return String::new();
        };
        self.resolve_type(declaration, what, ty)
            .map(|(tag, _)| tag)
            .unwrap_or_default()
    }

    fn choices(&mut self, declaration: &str, decls: &[ChoiceDecl<'a>]) -> Vec<Choice> {
        let mut choices = Vec::with_capacity(decls.len());
        for decl in decls {
            let Some(name) = self.ident(declaration, "choice", decl.name) else {
                continue;
            };
            let arg_type = self.choice_type(
                declaration,
                &format!("argument type of choice `{name}`"),
                decl.arg_type.as_ref(),
            );
            let return_type = self.choice_type(
                declaration,
                &format!("return type of choice `{name}`"),
                decl.ret_type.as_ref(),
            );
            choices.push(Choice {
                name: name.to_owned(),
                is_consuming: decl.consuming,
                arg_type,
                return_type,
            });
        }
        choices
    }

    fn key(&mut self, declaration: &str, key: &KeyDecl<'a>, fields: &[Field]) -> KeyInfo {
        let (ty, raw_type) = match &key.ty {
            Some(ty) => self.resolve_type(declaration, "key type", ty).unwrap_or_default(),
            None => {
                self.warn(DiagnosticKind::UnsupportedTypeShape, declaration, "key has no type");
                (String::new(), String::new())
            }
        };

        let extracted = extract_key_fields(self.interner, key.expr.as_ref());
        for error in &extracted.unresolved {
            self.warn(
                DiagnosticKind::UnresolvedIndex,
                declaration,
                format!("key expression: {error}"),
            );
        }

        let selection = select_key_field(&extracted.names, fields, &ty);
        if let KeySelection::Fallback(field) = &selection {
            self.warn(
                DiagnosticKind::KeyFieldFallback,
                declaration,
                format!(
                    "no key field of type `{ty}` among {:?}; using first field `{field}`",
                    extracted.names
                ),
            );
        }
        debug!("template `{declaration}` keyed on `{}` ({ty})", selection.field_name());

        KeyInfo {
            field_name: selection.field_name().to_owned(),
            ty,
            raw_type,
        }
    }

    fn template(&mut self, template: &TemplateDecl<'a>, data_types: &[DataTypeDecl<'a>]) {
        let Some(name) = self.declaration_name(template.name, "template") else {
            return;
        };
        let interner = self.interner;
        let backing = data_types.iter().find(|data_type| {
            interner
                .declaration_name(data_type.name)
                .is_ok_and(|candidate| candidate == name)
        });

        let fields = match backing.map(|data_type| &data_type.cons) {
            Some(DataCons::Record(decls)) => self.fields(name, decls, false),
            Some(_) => {
                self.warn(
                    DiagnosticKind::NonRecordTemplate,
                    name,
                    "backing declaration is not a record; fields left empty",
                );
                Vec::new()
            }
            None => {
                self.warn(
                    DiagnosticKind::MissingTemplateRecord,
                    name,
                    "no record declaration with the template's name; fields left empty",
                );
                Vec::new()
            }
        };

        let choices = self.choices(name, &template.choices);
        let key = template
            .key
            .as_ref()
            .map(|key| self.key(name, key, &fields));
        info!(
            "template `{name}`: {} fields, {} choices, key: {}",
            fields.len(),
            choices.len(),
            key.as_ref().map_or("none", |info| info.field_name.as_str())
        );

        let mut record = Record::template(fields, choices);
        record.key = key;
        self.extract
            .templates
            .push((name.to_owned(), StructuredType::Record(record)));
    }

    fn interface(&mut self, interface: &InterfaceDecl<'a>) {
        let Some(name) = self.declaration_name(interface.name, "interface") else {
            return;
        };
        if interface.has_view {
            self.extract.diagnostics.push(
                diagnostics::info(
                    DiagnosticKind::UnresolvedInterfaceView,
                    "interface view is not extracted",
                )
                .declaration(name)
                .build(),
            );
        }
        let choices = self.choices(name, &interface.choices);
        self.extract
            .interfaces
            .push((name.to_owned(), StructuredType::Interface { choices }));
    }

    fn data_type(&mut self, data_type: &DataTypeDecl<'a>) {
        if !data_type.serializable {
            return;
        }
        let Some(name) = self.declaration_name(data_type.name, "data type") else {
            return;
        };
        if self.extract.produced(name) {
            debug!("data type `{name}` already extracted as a template or interface");
            return;
        }

        let ty = match &data_type.cons {
            DataCons::Record(decls) => StructuredType::Record(Record::plain(self.fields(name, decls, false))),
            DataCons::Variant(decls) => StructuredType::Variant {
                constructors: self.fields(name, decls, true),
            },
            DataCons::Enum(idents) => {
                let mut constructors = Vec::with_capacity(idents.len());
                for ident in idents {
                    if let Some(constructor) = self.ident(name, "enum constructor", *ident) {
                        constructors.push(constructor.to_owned());
                    }
                }
                StructuredType::Enum { constructors }
            }
            DataCons::Interface => StructuredType::Interface {
                choices: Vec::new(),
            },
            DataCons::Unknown => {
                self.warn(
                    DiagnosticKind::UnknownDataConstructor,
                    name,
                    "unrecognised data constructor; declaration skipped",
                );
                return;
            }
        };
        self.extract.data_types.push((name.to_owned(), ty));
    }
}

/// Walks every module of a package and merges the results.
///
/// Declarations merge in kind order (every module's templates, then
/// interfaces, then residual data types) under first-write-wins, so the
/// outcome does not depend on which worker finishes first.
///
/// # Errors
///
/// Returns [`DecodeError::DeadlineExceeded`] if the configured deadline
/// passes before a module walk starts and [`DecodeError::WorkerPool`] if
/// the worker pool cannot be built.
pub fn walk_package<'a>(
    interner: &Interner<'a>,
    modules: &[ModuleDecl<'a>],
    config: &DecoderConfig,
) -> Result<PackageWalk> {
    let mut outcome = PackageWalk::default();
    if interner.has_no_strings() {
        outcome.diagnostics.push(
            diagnostics::info(
                DiagnosticKind::EmptyStringTable,
                format!("string table is empty; skipped {} modules", modules.len()),
            )
            .build(),
        );
        return Ok(outcome);
    }

    let started = Instant::now();
    let walk = |position: usize, module: &ModuleDecl<'a>| -> Result<ModuleExtract> {
        if let Some(limit) = config.timeout()
            && started.elapsed() >= limit
        {
            return Err(DecodeError::DeadlineExceeded {
                limit,
                module: position,
                total: modules.len(),
            });
        }
        Ok(walk_module(interner, module))
    };

    let extracts = if config.workers > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()?;
        pool.install(|| {
            modules
                .par_iter()
                .enumerate()
                .map(|(position, module)| walk(position, module))
                .collect::<Result<Vec<_>>>()
        })?
    } else {
        modules
            .iter()
            .enumerate()
            .map(|(position, module)| walk(position, module))
            .collect::<Result<Vec<_>>>()?
    };

    merge(extracts, &mut outcome);
    Ok(outcome)
}

fn merge(extracts: Vec<ModuleExtract>, outcome: &mut PackageWalk) {
    let mut data_types = Vec::new();
    let mut interfaces = Vec::new();
    for extract in extracts {
        insert_all(&mut outcome.builder, &extract.module, extract.templates);
        interfaces.push((extract.module.clone(), extract.interfaces));
        data_types.push((extract.module, extract.data_types));
        outcome.diagnostics.extend(extract.diagnostics);
    }
    for (module, entries) in interfaces.into_iter().chain(data_types) {
        insert_all(&mut outcome.builder, &module, entries);
    }
}

fn insert_all(builder: &mut PackageBuilder, module: &str, entries: Vec<(String, StructuredType)>) {
    for (name, ty) in entries {
        let label = ty.kind_label();
        if !builder.insert(name.as_str(), ty) {
            debug!("dropped {label} `{name}` from `{module}`: name already taken");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darlens_common::diagnostics::Severity;
    use darlens_common::model::Package;
    use rstest::{fixture, rstest};

    const STRINGS: &[&str] = &[
        "", "Main", "Pair", "a", "b", "Accept", "this", "Address", "US", "UK", "USAddress",
        "UKAddress", "Color", "Red", "Green", "Asset", "Weird", "Orphan", "Lonely", "Transfer",
    ];

    fn idx(name: &str) -> i32 {
        STRINGS
            .iter()
            .position(|candidate| *candidate == name)
            .and_then(|position| i32::try_from(position).ok())
            .unwrap_or(-1)
    }

    /// Dotted names: `[Main]`, then `[Main, <decl>]` for each declaration name.
    const DOTTED: &[&[i32]] = &[
        &[1],
        &[1, 2],
        &[1, 7],
        &[1, 10],
        &[1, 11],
        &[1, 12],
        &[1, 15],
        &[1, 16],
        &[1, 17],
        &[1, 18],
    ];

    fn dotted(name: &str) -> DottedRef<'static> {
        let segment = idx(name);
        DOTTED
            .iter()
            .position(|entry| entry.last() == Some(&segment) && entry.len() == 2)
            .and_then(|position| i32::try_from(position).ok())
            .map_or(DottedRef::Missing, DottedRef::Interned)
    }

    #[fixture]
    fn strings() -> Vec<String> {
        STRINGS.iter().map(|s| (*s).to_owned()).collect()
    }

    fn interner(strings: &[String]) -> Interner<'_> {
        Interner::new(strings, DOTTED.to_vec(), Vec::new())
    }

    fn prim(name: &'static str, code: i32) -> TypeExpr<'static> {
        TypeExpr::Builtin {
            prim: Some(name),
            code,
            args: Vec::new(),
        }
    }

    fn field(name: &str, ty: TypeExpr<'static>) -> FieldDecl<'static> {
        FieldDecl {
            name: Ident::Interned(idx(name)),
            ty: Some(ty),
        }
    }

    fn record(name: &str, fields: Vec<FieldDecl<'static>>) -> DataTypeDecl<'static> {
        DataTypeDecl {
            name: dotted(name),
            serializable: true,
            cons: DataCons::Record(fields),
        }
    }

    fn pair_module() -> ModuleDecl<'static> {
        ModuleDecl {
            name: DottedRef::Interned(0),
            data_types: vec![record(
                "Pair",
                vec![field("a", prim("PARTY", 8)), field("b", prim("TEXT", 5))],
            )],
            templates: vec![TemplateDecl {
                name: dotted("Pair"),
                choices: vec![ChoiceDecl {
                    name: Ident::Interned(idx("Accept")),
                    consuming: true,
                    arg_type: Some(prim("UNIT", 0)),
                    ret_type: Some(prim("UNIT", 0)),
                }],
                key: Some(KeyDecl {
                    ty: Some(prim("PARTY", 8)),
                    expr: Some(crate::ir::KeyExpr::Var(Ident::Interned(idx("a")))),
                }),
            }],
            interfaces: Vec::new(),
        }
    }

    fn address_module() -> ModuleDecl<'static> {
        ModuleDecl {
            name: DottedRef::Interned(0),
            data_types: vec![DataTypeDecl {
                name: dotted("Address"),
                serializable: true,
                cons: DataCons::Variant(vec![
                    field("US", TypeExpr::Con(dotted("USAddress"))),
                    field("UK", TypeExpr::Con(dotted("UKAddress"))),
                ]),
            }],
            templates: Vec::new(),
            interfaces: Vec::new(),
        }
    }

    fn decode(strings: &[String], modules: &[ModuleDecl<'static>], workers: usize) -> (Package, Diagnostics) {
        let config = DecoderConfig {
            workers,
            timeout_ms: None,
        };
        let walk = walk_package(&interner(strings), modules, &config).expect("walk succeeds");
        (walk.builder.build("test", Default::default()), walk.diagnostics)
    }

    #[rstest]
    fn pair_template_decodes_fully(strings: Vec<String>) {
        let (package, diagnostics) = decode(&strings, &[pair_module()], 1);

        let expected = Record {
            fields: vec![
                Field::new("a", "PARTY", "prim:PARTY"),
                Field::new("b", "TEXT", "prim:TEXT"),
            ],
            choices: vec![Choice {
                name: "Accept".to_owned(),
                is_consuming: true,
                arg_type: "UNIT".to_owned(),
                return_type: "UNIT".to_owned(),
            }],
            key: Some(KeyInfo {
                field_name: "a".to_owned(),
                ty: "PARTY".to_owned(),
                raw_type: "prim:PARTY".to_owned(),
            }),
            is_template: true,
        };
        assert_eq!(package.get("Pair"), Some(&StructuredType::Record(expected)));
        assert_eq!(package.structs.len(), 1, "backing record must not reappear");
        assert!(diagnostics.is_empty(), "unexpected diagnostics: {diagnostics:?}");
    }

    #[rstest]
    fn variant_constructors_are_optional(strings: Vec<String>) {
        let (package, _) = decode(&strings, &[address_module()], 1);

        assert_eq!(
            package.get("Address"),
            Some(&StructuredType::Variant {
                constructors: vec![
                    Field::new("US", "USAddress", "USAddress").optional(),
                    Field::new("UK", "UKAddress", "UKAddress").optional(),
                ],
            })
        );
    }

    #[rstest]
    fn corrupt_data_type_does_not_abort(strings: Vec<String>) {
        let mut module = pair_module();
        module.data_types.push(DataTypeDecl {
            name: dotted("Weird"),
            serializable: true,
            cons: DataCons::Unknown,
        });
        module.data_types.push(record("Orphan", vec![field("a", TypeExpr::Interned(99))]));

        let (package, diagnostics) = decode(&strings, &[module], 1);

        assert!(package.get("Pair").is_some_and(StructuredType::is_template));
        assert!(package.get("Weird").is_none());
        assert!(diagnostics.mentions(DiagnosticKind::UnknownDataConstructor, "Weird"));
        let orphan = package.get("Orphan").and_then(StructuredType::as_record);
        assert_eq!(orphan.and_then(|r| r.field("a")).map(|f| f.ty.as_str()), Some(""));
        assert!(diagnostics.mentions(DiagnosticKind::UnresolvedIndex, "Orphan"));
    }

    #[rstest]
    fn template_without_record_is_still_emitted(strings: Vec<String>) {
        let mut module = pair_module();
        module.data_types.clear();

        let (package, diagnostics) = decode(&strings, &[module], 1);

        let pair = package.get("Pair").and_then(StructuredType::as_record).expect("template");
        assert!(pair.is_template);
        assert!(pair.fields.is_empty());
        assert_eq!(pair.key.as_ref().map(|key| key.field_name.as_str()), Some(""));
        assert!(diagnostics.mentions(DiagnosticKind::MissingTemplateRecord, "Pair"));
    }

    #[rstest]
    fn key_falls_back_to_first_field(strings: Vec<String>) {
        let mut module = pair_module();
        if let Some(key) = module.templates[0].key.as_mut() {
            key.expr = Some(crate::ir::KeyExpr::Var(Ident::Interned(idx("this"))));
        }

        let (package, diagnostics) = decode(&strings, &[module], 1);

        let key = package
            .get("Pair")
            .and_then(StructuredType::as_record)
            .and_then(|record| record.key.clone())
            .expect("key");
        assert_eq!(key.field_name, "a");
        assert!(diagnostics.mentions(DiagnosticKind::KeyFieldFallback, "Pair"));
    }

    #[rstest]
    fn choice_without_types_is_kept(strings: Vec<String>) {
        let mut module = pair_module();
        module.templates[0].choices[0].ret_type = None;

        let (package, diagnostics) = decode(&strings, &[module], 1);

        let pair = package.get("Pair").and_then(StructuredType::as_record).expect("template");
        assert_eq!(pair.choices[0].return_type, "");
        assert_eq!(pair.choices[0].arg_type, "UNIT");
        assert!(diagnostics.mentions(DiagnosticKind::MissingChoiceType, "Pair"));
    }

    #[rstest]
    fn interfaces_enums_and_views(strings: Vec<String>) {
        let module = ModuleDecl {
            name: DottedRef::Interned(0),
            data_types: vec![
                DataTypeDecl {
                    name: dotted("Color"),
                    serializable: true,
                    cons: DataCons::Enum(vec![
                        Ident::Interned(idx("Red")),
                        Ident::Interned(idx("Green")),
                    ]),
                },
                DataTypeDecl {
                    name: dotted("Asset"),
                    serializable: true,
                    cons: DataCons::Interface,
                },
                DataTypeDecl {
                    name: dotted("Lonely"),
                    serializable: false,
                    cons: DataCons::Record(Vec::new()),
                },
            ],
            templates: Vec::new(),
            interfaces: vec![InterfaceDecl {
                name: dotted("Asset"),
                choices: vec![ChoiceDecl {
                    name: Ident::Interned(idx("Transfer")),
                    consuming: true,
                    arg_type: Some(TypeExpr::Con(dotted("Pair"))),
                    ret_type: Some(prim("CONTRACT_ID", 13)),
                }],
                has_view: true,
            }],
        };

        let (package, diagnostics) = decode(&strings, &[module], 1);

        assert_eq!(
            package.get("Color"),
            Some(&StructuredType::Enum {
                constructors: vec!["Red".to_owned(), "Green".to_owned()],
            })
        );
        let Some(StructuredType::Interface { choices }) = package.get("Asset") else {
            panic!("expected interface, got {:?}", package.get("Asset"));
        };
        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].arg_type, "Pair");
        assert_eq!(choices[0].return_type, "CONTRACT_ID");
        assert!(package.get("Lonely").is_none());
        assert!(diagnostics.mentions(DiagnosticKind::UnresolvedInterfaceView, "Asset"));
        assert_eq!(diagnostics.count(Severity::Warning), 0);
    }

    #[rstest]
    fn templates_win_over_earlier_modules_data_types(strings: Vec<String>) {
        let shadow = ModuleDecl {
            name: DottedRef::Interned(0),
            data_types: vec![record("Pair", vec![field("b", prim("TEXT", 5))])],
            templates: Vec::new(),
            interfaces: Vec::new(),
        };

        let (package, _) = decode(&strings, &[shadow, pair_module()], 1);

        assert!(package.get("Pair").is_some_and(StructuredType::is_template));
    }

    #[rstest]
    fn parallel_walk_matches_sequential(strings: Vec<String>) {
        let modules = vec![pair_module(), address_module(), pair_module()];

        let (sequential, _) = decode(&strings, &modules, 1);
        let (parallel, _) = decode(&strings, &modules, 4);

        assert_eq!(sequential, parallel);
    }

    #[rstest]
    fn every_key_field_names_a_template_field(strings: Vec<String>) {
        let (package, _) = decode(&strings, &[pair_module(), address_module()], 1);

        for (name, template) in package.templates() {
            if let Some(key) = &template.key
                && !key.field_name.is_empty()
            {
                assert!(template.field(&key.field_name).is_some(), "{name} key escapes fields");
            }
        }
        assert!(package.structs.keys().all(|name| !name.is_empty()));
    }

    #[rstest]
    fn empty_string_table_skips_modules() {
        let interner = Interner::new(&[], Vec::new(), Vec::new());
        let walk = walk_package(&interner, &[pair_module()], &DecoderConfig::default())
            .expect("walk succeeds");

        assert_eq!(walk.builder.build("x", Default::default()).structs.len(), 0);
        assert_eq!(
            walk.diagnostics.of_kind(DiagnosticKind::EmptyStringTable).count(),
            1
        );
    }

    #[rstest]
    fn expired_deadline_aborts(strings: Vec<String>) {
        let config = DecoderConfig {
            workers: 1,
            timeout_ms: Some(0),
        };
        let outcome = walk_package(&interner(&strings), &[pair_module()], &config);

        assert!(matches!(
            outcome,
            Err(DecodeError::DeadlineExceeded {
                module: 0,
                total: 1,
                ..
            })
        ));
    }

    #[rstest]
    fn unresolvable_module_name_is_recorded(strings: Vec<String>) {
        let mut module = pair_module();
        module.name = DottedRef::Interned(400);

        let extract = walk_module(&interner(&strings), &module);

        assert!(extract.module.is_empty());
        assert_eq!(extract.templates.len(), 1);
        let recorded: Vec<_> = extract
            .diagnostics
            .of_kind(DiagnosticKind::UnresolvedIndex)
            .collect();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].severity(), Severity::Info);
        assert!(recorded[0].message().contains("module name"));
    }

    #[rstest]
    fn unresolvable_template_name_is_skipped(strings: Vec<String>) {
        let mut module = pair_module();
        module.templates[0].name = DottedRef::Interned(500);

        let (package, diagnostics) = decode(&strings, &[module], 1);

        assert!(package.get("Pair").is_some_and(|ty| !ty.is_template()));
        assert_eq!(diagnostics.of_kind(DiagnosticKind::UnresolvedIndex).count(), 1);
    }
}
