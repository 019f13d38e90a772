//! Shorthand constructors for frontends populating an [`AstContext`].

use super::AstContext;
use crate::{
    BuiltinClass, DeclId, DeclKind, FunctionDecl, ParamDecl, QualType, RecordDecl, SourceRange,
    TagKind, TypeKind, TypeRef, TypedefDecl, VarDecl,
};

impl AstContext {
    // === Types ===

    pub fn builtin(&mut self, class: BuiltinClass, bits: u32, spelling: &str) -> TypeRef {
        self.add_type(TypeKind::Builtin {
            class,
            bits,
            spelling: spelling.to_owned(),
        })
    }

    pub fn pointer(&mut self, pointee: impl Into<QualType>) -> TypeRef {
        self.add_type(TypeKind::Pointer(pointee.into()))
    }

    pub fn lvalue_ref(&mut self, target: impl Into<QualType>) -> TypeRef {
        self.add_type(TypeKind::LValueReference(target.into()))
    }

    pub fn rvalue_ref(&mut self, target: impl Into<QualType>) -> TypeRef {
        self.add_type(TypeKind::RValueReference(target.into()))
    }

    pub fn array(&mut self, element: impl Into<QualType>, size: Option<u64>) -> TypeRef {
        self.add_type(TypeKind::Array {
            element: element.into(),
            size,
        })
    }

    /// Type node naming the typedef declared by `decl`.
    ///
    /// Returns `None` if `decl` is not a typedef.
    pub fn typedef_type(&mut self, decl: DeclId) -> Option<TypeRef> {
        let DeclKind::Typedef(typedef) = &self.decl(decl).kind else {
            return None;
        };
        let underlying = typedef.underlying;
        Some(self.add_type(TypeKind::Typedef { decl, underlying }))
    }

    // === Declarations ===

    pub fn namespace(&mut self, parent: DeclId, name: Option<&str>, range: SourceRange) -> DeclId {
        self.declare(parent, name, range, DeclKind::Namespace)
    }

    pub fn record(
        &mut self,
        parent: DeclId,
        name: Option<&str>,
        tag: TagKind,
        range: SourceRange,
    ) -> DeclId {
        self.declare(parent, name, range, DeclKind::Record(RecordDecl::new(tag)))
    }

    /// Declare a function whose parameters are `(name, type)` pairs.
    pub fn function(
        &mut self,
        parent: DeclId,
        name: &str,
        ret: impl Into<QualType>,
        params: &[(&str, QualType)],
        range: SourceRange,
    ) -> DeclId {
        let params = params
            .iter()
            .map(|(name, ty)| ParamDecl {
                name: (!name.is_empty()).then(|| (*name).to_owned()),
                ty: *ty,
            })
            .collect();
        self.declare(
            parent,
            Some(name),
            range,
            DeclKind::Function(FunctionDecl::new(ret.into(), params)),
        )
    }

    pub fn variable(
        &mut self,
        parent: DeclId,
        name: &str,
        ty: impl Into<QualType>,
        range: SourceRange,
    ) -> DeclId {
        self.declare(
            parent,
            Some(name),
            range,
            DeclKind::Var(VarDecl {
                ty: ty.into(),
                has_init: false,
            }),
        )
    }

    pub fn typedef(
        &mut self,
        parent: DeclId,
        name: &str,
        underlying: impl Into<QualType>,
        range: SourceRange,
    ) -> DeclId {
        self.declare(
            parent,
            Some(name),
            range,
            DeclKind::Typedef(TypedefDecl {
                underlying: underlying.into(),
            }),
        )
    }

    /// Mutable access to a function declaration's payload.
    pub fn function_mut(&mut self, decl: DeclId) -> Option<&mut FunctionDecl> {
        match &mut self.decl_mut(decl).kind {
            DeclKind::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Mutable access to a record declaration's payload.
    pub fn record_mut(&mut self, decl: DeclId) -> Option<&mut RecordDecl> {
        match &mut self.decl_mut(decl).kind {
            DeclKind::Record(record) => Some(record),
            _ => None,
        }
    }
}

