//! Handle validation for units read from outside the process.
//!
//! Lookups index the arenas directly, so a unit with a dangling handle
//! would panic deep inside a consumer. [`AstContext::validate`] checks every
//! handle once, up front.

use thiserror::Error;

use super::AstContext;
use crate::{DeclId, DeclKind, QualType, TemplateArg, TemplateInfo, TypeKind, TypeRef};

/// A handle that points outside its arena.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidHandle {
    #[error("{owner} refers to type #{raw}, but the unit has {count} types")]
    Type {
        owner: String,
        raw: u32,
        count: usize,
    },

    #[error("{owner} refers to declaration #{raw}, but the unit has {count} declarations")]
    Decl {
        owner: String,
        raw: u32,
        count: usize,
    },

    #[error("declaration #{found} is stored at index {index}")]
    Misplaced { index: usize, found: u32 },
}

impl AstContext {
    /// Check that every handle held by the unit resolves.
    ///
    /// Units built through the construction helpers always pass; call this
    /// on units deserialized from disk before handing them to consumers.
    pub fn validate(&self) -> Result<(), InvalidHandle> {
        for (index, kind) in self.types.iter().enumerate() {
            let owner = || format!("type #{index}");
            self.check_type_kind(kind, &owner)?;
        }

        for (index, decl) in self.decls.iter().enumerate() {
            if decl.id.index() != index {
                return Err(InvalidHandle::Misplaced {
                    index,
                    found: decl.id.raw(),
                });
            }
            let owner = || format!("declaration #{index}");
            self.check_decl(decl.canonical, &owner)?;
            if let Some(parent) = decl.parent {
                self.check_decl(parent, &owner)?;
            }
            self.check_decl_kind(&decl.kind, &owner)?;
        }

        for (canonical, chain) in &self.redecls {
            let owner = || format!("redeclaration chain of #{canonical}");
            self.check_decl(*canonical, &owner)?;
            for &redecl in chain {
                self.check_decl(redecl, &owner)?;
            }
        }

        for (record, &ty) in &self.record_types {
            let owner = || format!("record type of #{record}");
            self.check_decl(*record, &owner)?;
            self.check_type(ty, &owner)?;
        }
        Ok(())
    }

    fn check_type_kind(
        &self,
        kind: &TypeKind,
        owner: &dyn Fn() -> String,
    ) -> Result<(), InvalidHandle> {
        match kind {
            TypeKind::Pointer(inner)
            | TypeKind::LValueReference(inner)
            | TypeKind::RValueReference(inner)
            | TypeKind::Paren(inner)
            | TypeKind::Elaborated(inner)
            | TypeKind::Array { element: inner, .. } => self.check_qual(*inner, owner),
            TypeKind::Record(decl) => self.check_decl(*decl, owner),
            TypeKind::Typedef { decl, underlying } => {
                self.check_decl(*decl, owner)?;
                self.check_qual(*underlying, owner)
            }
            TypeKind::FunctionProto { ret, params, .. } => {
                self.check_qual(*ret, owner)?;
                params.iter().try_for_each(|param| self.check_qual(*param, owner))
            }
            TypeKind::TemplateSpecialization { args, aliased, .. } => {
                self.check_template_args(args, owner)?;
                match aliased {
                    Some(aliased) => self.check_qual(*aliased, owner),
                    None => Ok(()),
                }
            }
            TypeKind::Builtin { .. } | TypeKind::Unsupported { .. } => Ok(()),
        }
    }

    fn check_decl_kind(
        &self,
        kind: &DeclKind,
        owner: &dyn Fn() -> String,
    ) -> Result<(), InvalidHandle> {
        match kind {
            DeclKind::Record(record) => {
                for field in &record.fields {
                    self.check_qual(field.ty, owner)?;
                }
                for base in &record.bases {
                    self.check_qual(base.ty, owner)?;
                }
                self.check_template(&record.template, owner)
            }
            DeclKind::Function(function) => {
                self.check_qual(function.ret, owner)?;
                for param in &function.params {
                    self.check_qual(param.ty, owner)?;
                }
                if let Some(method) = function.method {
                    self.check_decl(method.record, owner)?;
                }
                self.check_template(&function.template, owner)
            }
            DeclKind::Var(var) => self.check_qual(var.ty, owner),
            DeclKind::Typedef(typedef) => self.check_qual(typedef.underlying, owner),
            DeclKind::TranslationUnit | DeclKind::Namespace | DeclKind::LinkageSpec => Ok(()),
        }
    }

    fn check_template(
        &self,
        template: &TemplateInfo,
        owner: &dyn Fn() -> String,
    ) -> Result<(), InvalidHandle> {
        match template {
            TemplateInfo::Specialization { args } => self.check_template_args(args, owner),
            TemplateInfo::None | TemplateInfo::Primary { .. } => Ok(()),
        }
    }

    fn check_template_args(
        &self,
        args: &[TemplateArg],
        owner: &dyn Fn() -> String,
    ) -> Result<(), InvalidHandle> {
        for arg in args {
            match arg {
                TemplateArg::Type(ty) | TemplateArg::Integral { ty, .. } => {
                    self.check_qual(*ty, owner)?;
                }
                TemplateArg::Pack(elements) => self.check_template_args(elements, owner)?,
                TemplateArg::Expression(_) | TemplateArg::Template(_) | TemplateArg::Null => {}
            }
        }
        Ok(())
    }

    fn check_qual(&self, qt: QualType, owner: &dyn Fn() -> String) -> Result<(), InvalidHandle> {
        self.check_type(qt.ty, owner)
    }

    fn check_type(&self, ty: TypeRef, owner: &dyn Fn() -> String) -> Result<(), InvalidHandle> {
        if ty.index() < self.types.len() {
            return Ok(());
        }
        Err(InvalidHandle::Type {
            owner: owner(),
            raw: ty.raw(),
            count: self.types.len(),
        })
    }

    fn check_decl(&self, decl: DeclId, owner: &dyn Fn() -> String) -> Result<(), InvalidHandle> {
        if decl.index() < self.decls.len() {
            return Ok(());
        }
        Err(InvalidHandle::Decl {
            owner: owner(),
            raw: decl.raw(),
            count: self.decls.len(),
        })
    }
}
