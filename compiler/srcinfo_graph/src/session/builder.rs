//! Declaration node building.

use std::io::Write;

use srcinfo_ast::{DeclFlags, DeclId, DeclKind, TemplateInfo};

use super::GraphSession;
use crate::stack::ensure_sufficient_stack;
use crate::{
    DiagnosticKind, Extent, FunctionId, FunctionNode, ParamRef, RecordId, RecordKind, RecordNode,
    TypeDescriptor, TypeId, VarId, VariableNode,
};

impl<W: Write> GraphSession<'_, W> {
    /// Ingest one declaration from the frontend.
    ///
    /// Passing the same declaration twice is a no-op. Redeclarations of an
    /// entity merge into the entity's single node. Declarations rejected by
    /// the configured filter are ignored.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn add_declaration(&mut self, decl: DeclId) {
        if !self.seen.insert(decl) {
            tracing::trace!("already ingested");
            return;
        }
        let ctx = self.ctx;
        let Some(declaration) = ctx.get_decl(decl) else {
            self.diagnose(
                DiagnosticKind::MissingReference,
                format!("declaration #{decl} is not part of the unit"),
            );
            return;
        };
        if !self.config.filter.accepts(ctx, declaration) {
            tracing::trace!(kind = declaration.kind.label(), "filtered out");
            return;
        }
        if matches!(
            declaration.kind,
            DeclKind::TranslationUnit | DeclKind::LinkageSpec
        ) {
            self.diagnose(
                DiagnosticKind::UnsupportedDecl,
                format!(
                    "no graph node for {} declaration #{decl}",
                    declaration.kind.label()
                ),
            );
            return;
        }
        self.declarations.push(decl);
        self.ensure_node(decl);
    }

    /// Build the node for `decl` unless it already exists.
    pub(super) fn ensure_node(&mut self, decl: DeclId) {
        let ctx = self.ctx;
        match &ctx.decl(decl).kind {
            DeclKind::Record(_) => {
                self.add_record(decl);
            }
            DeclKind::Function(_) => {
                self.add_function(decl);
            }
            DeclKind::Var(_) => {
                self.add_variable(decl);
            }
            DeclKind::Typedef(typedef) => {
                self.add_alias(decl, typedef.underlying);
            }
            DeclKind::Namespace => {
                let path = self.names.namespace_path(ctx, decl);
                self.groups.group_mut(path);
            }
            // Rejected by `add_declaration`.
            DeclKind::TranslationUnit | DeclKind::LinkageSpec => {}
        }
    }

    // === Records ===

    /// The node of the record `decl` belongs to, built on first request.
    pub fn add_record(&mut self, decl: DeclId) -> RecordId {
        ensure_sufficient_stack(|| self.build_record(decl))
    }

    fn build_record(&mut self, decl: DeclId) -> RecordId {
        let ctx = self.ctx;
        let canonical = ctx.decl(decl).canonical;
        if let Some(&id) = self.record_ids.get(&canonical) {
            return id;
        }

        // Reserve the node before bases are walked.
        let id = RecordId::next(self.records.len());
        self.record_ids.insert(canonical, id);
        let definition = ctx.definition_or_canonical(canonical);
        let record = definition.as_record();
        let name = self.names.scoped_name(ctx, canonical);
        let qualified_name = self.names.qualified_name(ctx, canonical);
        let namespace = self.names.namespace_path(ctx, canonical);
        tracing::debug!(%id, name = %qualified_name, "record node");
        self.records.push(RecordNode {
            id,
            decl: canonical,
            name,
            qualified_name: qualified_name.clone(),
            kind: record.map_or(RecordKind::Struct, |record| record.tag.into()),
            type_id: TypeId::NONE,
            bases: Vec::new(),
            access_specs: Vec::new(),
            body: None,
            namespace: namespace.clone(),
        });
        self.groups.group_mut(namespace).records.push(id);

        let type_id = self.add_record_type(canonical);
        let mut bases = Vec::new();
        let mut access_specs = Vec::new();
        let mut body = None;
        if let Some(record) = record {
            for base in &record.bases {
                match self.record_decl_of(base.ty) {
                    Some(base_decl) => bases.push(self.add_record(base_decl)),
                    None => {
                        let spelling = self.names.spell_type(ctx, base.ty);
                        self.diagnose(
                            DiagnosticKind::MissingReference,
                            format!("base `{spelling}` of `{qualified_name}` is not a known record"),
                        );
                    }
                }
            }
            access_specs = record
                .access_specs
                .iter()
                .map(|spec| self.extent(&spec.range))
                .collect();
            body = record.brace_range.as_ref().map(|range| self.extent(range));
        }

        let node = &mut self.records[id.index()];
        node.type_id = type_id;
        node.bases = bases;
        node.access_specs = access_specs;
        node.body = body;
        id
    }

    // === Functions ===

    /// The node of the function `decl` belongs to, built on first request.
    ///
    /// Returns `None` if `decl` is not a function.
    pub fn add_function(&mut self, decl: DeclId) -> Option<FunctionId> {
        let ctx = self.ctx;
        let canonical = ctx.decl(decl).canonical;
        if let Some(&id) = self.function_ids.get(&canonical) {
            return Some(id);
        }
        let function = ctx.definition_or_canonical(canonical).as_function()?;
        let redecls = ctx.redecls(canonical);
        let flags = redecls
            .iter()
            .fold(DeclFlags::empty(), |flags, &redecl| flags | ctx.decl(redecl).flags);

        let name = self.names.scoped_name(ctx, canonical);
        let qualified_name = self.names.qualified_name(ctx, canonical);

        let owner = match function.method {
            Some(method) if ctx.get_decl(method.record).and_then(|d| d.as_record()).is_some() => {
                Some(self.add_record(method.record))
            }
            Some(method) => {
                self.diagnose(
                    DiagnosticKind::MissingReference,
                    format!(
                        "owner #{} of method `{qualified_name}` is not a record",
                        method.record
                    ),
                );
                None
            }
            None => None,
        };

        let return_type = self.add_type(function.ret);
        let return_spelling = self.names.spell_type(ctx, function.ret);
        let params: Vec<ParamRef> = function
            .params
            .iter()
            .map(|param| ParamRef {
                name: param.name.clone(),
                type_id: self.add_type(param.ty),
                spelling: self.names.spell_type(ctx, param.ty),
            })
            .collect();
        let template_args = match &function.template {
            TemplateInfo::Specialization { args } => self.add_template_args(&qualified_name, args),
            TemplateInfo::None | TemplateInfo::Primary { .. } => Vec::new(),
        };
        let is_variadic = flags.contains(DeclFlags::VARIADIC);
        let signature = self
            .intern_structural(TypeDescriptor::FunctionSignature {
                ret: return_type,
                params: params.iter().map(|param| param.type_id).collect(),
                is_variadic,
            })
            .id();

        let positions = redecls
            .iter()
            .map(|&redecl| self.position(ctx.decl(redecl).location()))
            .collect();
        let body = self.function_body(canonical);
        let namespace = self.names.namespace_path(ctx, canonical);

        let id = FunctionId::next(self.functions.len());
        tracing::debug!(%id, name = %qualified_name, "function node");
        self.function_ids.insert(canonical, id);
        self.groups.group_mut(namespace.clone()).functions.push(id);
        self.functions.push(FunctionNode {
            id,
            decl: canonical,
            name,
            qualified_name,
            is_variadic,
            is_virtual: flags.contains(DeclFlags::VIRTUAL),
            is_static: flags.contains(DeclFlags::STATIC),
            owner,
            template_args,
            return_type,
            return_spelling,
            params,
            signature,
            positions,
            body,
            namespace,
        });
        Some(id)
    }

    /// Body of the defining redeclaration, subject to the external-body policy.
    fn function_body(&mut self, canonical: DeclId) -> Option<Extent> {
        let ctx = self.ctx;
        let range = ctx
            .definition(canonical)
            .and_then(|definition| definition.as_function())
            .and_then(|function| function.body.as_ref())?;
        if range.file() != ctx.main_file() && !self.config.include_external_bodies {
            tracing::trace!(file = range.file(), "external body skipped");
            return None;
        }
        Some(self.extent(range))
    }

    // === Variables ===

    /// The node of the variable `decl` belongs to, built on first request.
    ///
    /// Returns `None` if `decl` is not a variable.
    pub fn add_variable(&mut self, decl: DeclId) -> Option<VarId> {
        let ctx = self.ctx;
        let canonical = ctx.decl(decl).canonical;
        if let Some(&id) = self.variable_ids.get(&canonical) {
            return Some(id);
        }
        let declaration = ctx.definition_or_canonical(canonical);
        let DeclKind::Var(var) = &declaration.kind else {
            return None;
        };
        let has_initializer = ctx.redecls(canonical).iter().any(|&redecl| {
            matches!(&ctx.decl(redecl).kind, DeclKind::Var(var) if var.has_init)
        });

        let type_id = self.add_type(var.ty);
        let location = self.position(declaration.location());
        let name = self.names.scoped_name(ctx, canonical);
        let qualified_name = self.names.qualified_name(ctx, canonical);
        let namespace = self.names.namespace_path(ctx, canonical);

        let id = VarId::next(self.variables.len());
        tracing::debug!(%id, name = %qualified_name, "variable node");
        self.variable_ids.insert(canonical, id);
        self.groups.group_mut(namespace.clone()).variables.push(id);
        self.variables.push(VariableNode {
            id,
            decl: canonical,
            name,
            qualified_name,
            type_id,
            has_initializer,
            location,
            namespace,
        });
        Some(id)
    }
}
