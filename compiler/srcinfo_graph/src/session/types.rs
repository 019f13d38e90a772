//! Type resolution: decomposed shapes to cached type ids.

use std::io::Write;

use srcinfo_ast::{DeclId, QualType, TemplateArg, TemplateInfo, TypeKind};

use super::GraphSession;
use crate::cache::Interned;
use crate::decompose::{decompose, desugar, flatten_template_args, Shape};
use crate::stack::ensure_sufficient_stack;
use crate::{CanonicalKey, DiagnosticKind, FieldRef, RecordKind, TypeDescriptor, TypeId};

impl<W: Write> GraphSession<'_, W> {
    /// Resolve `qt` to its type id, allocating entries for every new shape.
    ///
    /// Typedefs resolve to the id of their underlying type; the alias entry
    /// is recorded alongside it.
    pub fn add_type(&mut self, qt: QualType) -> TypeId {
        ensure_sufficient_stack(|| self.resolve_type(qt))
    }

    fn resolve_type(&mut self, qt: QualType) -> TypeId {
        let ctx = self.ctx;
        let descriptor = match decompose(ctx, qt) {
            Shape::Array { element, length } => TypeDescriptor::Array {
                element: self.add_type(element),
                length,
            },
            Shape::Pointer { pointee, is_const } => TypeDescriptor::Pointer {
                target: self.add_type(pointee),
                is_const,
            },
            Shape::LValueRef(target) => TypeDescriptor::LValueRef {
                target: self.add_type(target),
            },
            Shape::RValueRef(target) => TypeDescriptor::RValueRef {
                target: self.add_type(target),
            },
            Shape::Const(inner) => TypeDescriptor::ConstQualified {
                target: self.add_type(inner),
            },
            Shape::Primitive {
                kind,
                bits,
                spelling,
            } => TypeDescriptor::Primitive {
                kind,
                bits,
                name: spelling.to_owned(),
            },
            Shape::Alias {
                decl,
                underlying,
                is_const,
            } => {
                let id = self.add_alias(decl, underlying);
                if !is_const {
                    return id;
                }
                // `const T_t` is `T const` for whatever `T_t` names.
                return self.add_type(underlying.with_const(true));
            }
            Shape::Record { decl } => return self.add_record_type(decl),
            Shape::Function {
                ret,
                params,
                is_variadic,
            } => TypeDescriptor::FunctionSignature {
                ret: self.add_type(ret),
                params: params.iter().map(|param| self.add_type(*param)).collect(),
                is_variadic,
            },
            Shape::Specialization {
                template_name,
                args,
            } => {
                let flat = flatten_template_args(args);
                let ids = flat.types.iter().map(|ty| self.add_type(*ty)).collect();
                let value_args = flat
                    .dropped
                    .iter()
                    .map(|arg| self.names.spell_template_arg(ctx, arg))
                    .collect();
                let interned = self.intern_structural(TypeDescriptor::Specialization {
                    template_name: template_name.to_owned(),
                    args: ids,
                    value_args,
                });
                if interned.is_new() {
                    self.report_dropped(template_name, &flat.dropped);
                }
                return interned.id();
            }
            Shape::Opaque { spelling } => return self.opaque(spelling),
        };
        self.intern_structural(descriptor).id()
    }

    /// Intern a structurally keyed descriptor into the root group.
    pub(super) fn intern_structural(&mut self, descriptor: TypeDescriptor) -> Interned {
        // Identity-keyed descriptors are interned by their own paths.
        let key = CanonicalKey::structural(&descriptor)
            .unwrap_or_else(|| CanonicalKey::Opaque(descriptor.to_string()));
        let interned = self.types.intern(key, descriptor);
        if interned.is_new() {
            self.groups.root_mut().types.push(interned.id());
        }
        interned
    }

    fn opaque(&mut self, spelling: &str) -> TypeId {
        let interned = self.intern_structural(TypeDescriptor::Opaque {
            spelling: spelling.to_owned(),
        });
        if interned.is_new() {
            self.diagnose(
                DiagnosticKind::UnsupportedType,
                format!("type `{spelling}` has no structured form, recorded as opaque"),
            );
        }
        interned.id()
    }

    /// Record the alias entry for a typedef and return its underlying id.
    pub(super) fn add_alias(&mut self, decl: DeclId, underlying: QualType) -> TypeId {
        let ctx = self.ctx;
        let canonical = ctx.decl(decl).canonical;
        let key = CanonicalKey::Alias(canonical);

        if let Some(id) = self.types.lookup(&key) {
            let resolved = match self.types.get(id) {
                Some(TypeDescriptor::Alias { underlying, .. }) => *underlying,
                _ => TypeId::NONE,
            };
            if !resolved.is_none() {
                return resolved;
            }
            if self.resolving_aliases.contains(&canonical) {
                // Typedef chain loops back on itself with no record between.
                let name = self.names.qualified_name(ctx, canonical);
                return self.opaque(&format!("<cyclic typedef {name}>"));
            }
            // Reached again from inside a record the alias names. That record
            // is already reserved, so resolving through terminates.
            return self.add_type(underlying);
        }

        let name = self.names.qualified_name(ctx, canonical);
        let id = self
            .types
            .intern(
                key,
                TypeDescriptor::Alias {
                    name,
                    underlying: TypeId::NONE,
                },
            )
            .id();
        let path = self.names.namespace_path(ctx, canonical);
        self.groups.group_mut(path).types.push(id);

        self.resolving_aliases.insert(canonical);
        let resolved = self.add_type(underlying);
        self.resolving_aliases.remove(&canonical);
        if let Some(TypeDescriptor::Alias { underlying, .. }) = self.types.descriptor_mut(id) {
            *underlying = resolved;
        }
        resolved
    }

    /// Resolve a record's type id, reserving it before its members expand.
    pub(super) fn add_record_type(&mut self, decl: DeclId) -> TypeId {
        let ctx = self.ctx;
        let canonical = ctx.decl(decl).canonical;
        let key = CanonicalKey::Record(canonical);
        if let Some(id) = self.types.lookup(&key) {
            return id;
        }

        let definition = ctx.definition_or_canonical(canonical);
        let Some(record) = definition.as_record() else {
            let interned = self.intern_structural(TypeDescriptor::Opaque {
                spelling: format!("<non-record declaration #{canonical}>"),
            });
            if interned.is_new() {
                self.diagnose(
                    DiagnosticKind::MissingReference,
                    format!("type names declaration #{canonical}, which is not a record"),
                );
            }
            return interned.id();
        };

        let name = self.names.qualified_name(ctx, canonical);
        let id = self
            .types
            .intern(
                key,
                TypeDescriptor::Record {
                    kind: RecordKind::from(record.tag),
                    name: name.clone(),
                    template_args: Vec::new(),
                    fields: Vec::new(),
                },
            )
            .id();
        tracing::debug!(%id, name = %name, "record type reserved");
        let path = self.names.namespace_path(ctx, canonical);
        self.groups.group_mut(path).types.push(id);

        // Aliases entered outside the record do not loop through it.
        let outer_aliases = std::mem::take(&mut self.resolving_aliases);
        let template_args = match &record.template {
            TemplateInfo::Specialization { args } => self.add_template_args(&name, args),
            TemplateInfo::None | TemplateInfo::Primary { .. } => Vec::new(),
        };
        let fields: Vec<FieldRef> = record
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| FieldRef {
                name: field
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("__anon_field_{index}")),
                ty: self.add_type(field.ty),
            })
            .collect();
        self.resolving_aliases = outer_aliases;

        if let Some(TypeDescriptor::Record {
            template_args: slot_args,
            fields: slot_fields,
            ..
        }) = self.types.descriptor_mut(id)
        {
            *slot_args = template_args;
            *slot_fields = fields;
        }
        id
    }

    /// Resolve the linkable arguments of a template argument list.
    pub(super) fn add_template_args(&mut self, owner: &str, args: &[TemplateArg]) -> Vec<TypeId> {
        let flat = flatten_template_args(args);
        self.report_dropped(owner, &flat.dropped);
        flat.types.iter().map(|ty| self.add_type(*ty)).collect()
    }

    fn report_dropped(&mut self, owner: &str, dropped: &[&TemplateArg]) {
        for arg in dropped {
            let what = match arg {
                TemplateArg::Integral { value, .. } => format!("integral argument `{value}`"),
                TemplateArg::Expression(text) => format!("expression argument `{text}`"),
                TemplateArg::Template(name) => format!("template argument `{name}`"),
                TemplateArg::Null => "null argument".to_owned(),
                TemplateArg::Type(_) | TemplateArg::Pack(_) => "argument".to_owned(),
            };
            self.diagnose(
                DiagnosticKind::DroppedTemplateArg,
                format!("{what} of `{owner}` dropped"),
            );
        }
    }

    /// The record declaration a base specifier names, seeing through typedefs.
    pub(super) fn record_decl_of(&self, qt: QualType) -> Option<DeclId> {
        let ctx = self.ctx;
        let mut current = qt;
        for _ in 0..=ctx.type_count() {
            let bare = desugar(ctx, current)?;
            match ctx.ty(bare.ty) {
                TypeKind::Record(decl) => return Some(*decl),
                TypeKind::Typedef { underlying, .. } => current = *underlying,
                _ => return None,
            }
        }
        None
    }
}
