//! Type nodes of the declaration model.

use crate::{DeclId, TypeRef};

/// A type handle plus its local `const` qualifier.
///
/// The qualifier belongs to the layer the handle names: in `int* const` the
/// pointer handle is const, in `const int*` the pointee handle is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QualType {
    pub ty: TypeRef,
    pub is_const: bool,
}

impl QualType {
    #[inline]
    pub const fn new(ty: TypeRef) -> Self {
        QualType {
            ty,
            is_const: false,
        }
    }

    #[inline]
    pub const fn constant(ty: TypeRef) -> Self {
        QualType { ty, is_const: true }
    }

    /// Same handle without the local qualifier.
    #[inline]
    #[must_use]
    pub const fn unqualified(self) -> Self {
        QualType::new(self.ty)
    }

    /// Same handle with `const` added.
    #[inline]
    #[must_use]
    pub const fn with_const(self, is_const: bool) -> Self {
        QualType {
            ty: self.ty,
            is_const: self.is_const || is_const,
        }
    }
}

impl From<TypeRef> for QualType {
    fn from(ty: TypeRef) -> Self {
        QualType::new(ty)
    }
}

/// Numeric category of a builtin type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuiltinClass {
    SignedInt,
    UnsignedInt,
    Float,
    Void,
    /// `bool`, `nullptr_t` and other builtins without a numeric category.
    Other,
}

/// One template argument as written or deduced.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateArg {
    Type(QualType),
    Integral { value: i128, ty: QualType },
    /// Variadic pack, already expanded by the frontend.
    Pack(Vec<TemplateArg>),
    /// Value-dependent or otherwise unevaluated expression, printed.
    Expression(String),
    /// Template template argument (the template's name).
    Template(String),
    Null,
}

/// Shape of one type node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    Builtin {
        class: BuiltinClass,
        bits: u32,
        spelling: String,
    },
    Pointer(QualType),
    LValueReference(QualType),
    RValueReference(QualType),
    /// `size` is `None` for incomplete and variable-length arrays.
    Array {
        element: QualType,
        size: Option<u64>,
    },
    Record(DeclId),
    Typedef {
        decl: DeclId,
        underlying: QualType,
    },
    FunctionProto {
        ret: QualType,
        params: Vec<QualType>,
        variadic: bool,
    },
    /// `aliased` is the specialized record when the frontend could resolve
    /// one; dependent specializations carry only name and arguments.
    TemplateSpecialization {
        template_name: String,
        args: Vec<TemplateArg>,
        aliased: Option<QualType>,
    },
    Paren(QualType),
    /// Keyword-qualified spelling (`struct S`, `ns::S`).
    Elaborated(QualType),
    /// Anything the frontend has no structured form for.
    Unsupported {
        spelling: String,
    },
}

impl TypeKind {
    /// Check if this node is pure sugar over another type.
    pub fn is_sugar(&self) -> bool {
        matches!(
            self,
            TypeKind::Paren(_)
                | TypeKind::Elaborated(_)
                | TypeKind::TemplateSpecialization {
                    aliased: Some(_),
                    ..
                }
        )
    }
}
