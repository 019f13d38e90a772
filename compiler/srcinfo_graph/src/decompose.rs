//! Type shape decomposition.
//!
//! Turns one type handle into exactly one [`Shape`] plus the child handles
//! needed to resolve nested ids. Decomposition peels one layer per call, in
//! a fixed precedence that keeps keys re-derivable:
//!
//! 1. Transparent sugar (parentheses, elaborated keywords, specializations
//!    that name a resolved record) is stripped; its `const` is carried over.
//! 2. Arrays. A `const` on the array moves to the element type.
//! 3. Pointers, with the pointer's own `const` recorded on the layer, so
//!    `T* const` and `const T*` decompose differently.
//! 4. References (lvalue and rvalue), one layer at a time.
//! 5. Typedefs. The alias is reported with its own `const`, which the
//!    caller pushes onto the underlying type so `const IntPtr` and
//!    `int* const` meet.
//! 6. Any `const` left on a non-pointer type becomes a [`Shape::Const`] wrapper.
//! 7. Terminal shapes: primitive, record, function signature,
//!    dependent specialization, or opaque.

use srcinfo_ast::{AstContext, DeclId, QualType, TemplateArg, TypeKind};

use crate::PrimitiveKind;

/// One decomposed layer of a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shape<'ctx> {
    Array {
        element: QualType,
        length: Option<u64>,
    },
    Pointer {
        pointee: QualType,
        is_const: bool,
    },
    LValueRef(QualType),
    RValueRef(QualType),
    /// `inner` carries no local qualifier.
    Const(QualType),
    Primitive {
        kind: PrimitiveKind,
        bits: u32,
        spelling: &'ctx str,
    },
    /// `is_const` is the qualifier written on the typedef name; it applies
    /// to `underlying`, not to the alias.
    Alias {
        decl: DeclId,
        underlying: QualType,
        is_const: bool,
    },
    Record {
        decl: DeclId,
    },
    Function {
        ret: QualType,
        params: &'ctx [QualType],
        is_variadic: bool,
    },
    Specialization {
        template_name: &'ctx str,
        args: &'ctx [TemplateArg],
    },
    Opaque {
        spelling: &'ctx str,
    },
}

/// Strip transparent sugar, accumulating `const` from every stripped layer.
///
/// Returns `None` if the sugar chain loops back on itself.
pub fn desugar(ctx: &AstContext, qt: QualType) -> Option<QualType> {
    let mut current = qt;
    // A well-formed chain visits each node at most once.
    for _ in 0..=ctx.type_count() {
        let inner = match ctx.ty(current.ty) {
            TypeKind::Paren(inner) | TypeKind::Elaborated(inner) => *inner,
            TypeKind::TemplateSpecialization {
                aliased: Some(inner),
                ..
            } => *inner,
            _ => return Some(current),
        };
        current = inner.with_const(current.is_const);
    }
    None
}

/// Decompose the outermost layer of `qt`.
pub fn decompose(ctx: &AstContext, qt: QualType) -> Shape<'_> {
    let Some(qt) = desugar(ctx, qt) else {
        return Shape::Opaque {
            spelling: "<cyclic type sugar>",
        };
    };

    match ctx.ty(qt.ty) {
        TypeKind::Array { element, size } => {
            return Shape::Array {
                element: element.with_const(qt.is_const),
                length: *size,
            };
        }
        TypeKind::Pointer(pointee) => {
            return Shape::Pointer {
                pointee: *pointee,
                is_const: qt.is_const,
            };
        }
        TypeKind::LValueReference(target) => return Shape::LValueRef(*target),
        TypeKind::RValueReference(target) => return Shape::RValueRef(*target),
        TypeKind::Typedef { decl, underlying } => {
            return Shape::Alias {
                decl: *decl,
                underlying: *underlying,
                is_const: qt.is_const,
            };
        }
        _ => {}
    }

    if qt.is_const {
        return Shape::Const(qt.unqualified());
    }

    match ctx.ty(qt.ty) {
        TypeKind::Builtin {
            class,
            bits,
            spelling,
        } => Shape::Primitive {
            kind: (*class).into(),
            bits: *bits,
            spelling,
        },
        TypeKind::Record(decl) => Shape::Record { decl: *decl },
        TypeKind::FunctionProto {
            ret,
            params,
            variadic,
        } => Shape::Function {
            ret: *ret,
            params,
            is_variadic: *variadic,
        },
        TypeKind::TemplateSpecialization {
            template_name,
            args,
            ..
        } => Shape::Specialization {
            template_name,
            args,
        },
        TypeKind::Unsupported { spelling } => Shape::Opaque { spelling },
        // Layers handled above and sugar removed by `desugar`.
        TypeKind::Array { .. }
        | TypeKind::Typedef { .. }
        | TypeKind::Pointer(_)
        | TypeKind::LValueReference(_)
        | TypeKind::RValueReference(_)
        | TypeKind::Paren(_)
        | TypeKind::Elaborated(_) => Shape::Opaque {
            spelling: "<unreachable sugar>",
        },
    }
}

/// Template arguments reduced to the type arguments the graph links.
#[derive(Debug, Default)]
pub struct FlatArgs<'ctx> {
    /// Type arguments in order, packs expanded element by element.
    pub types: Vec<QualType>,
    /// Arguments with no linking strategy (integral, expression, template).
    pub dropped: Vec<&'ctx TemplateArg>,
}

/// Flatten a template argument list.
pub fn flatten_template_args(args: &[TemplateArg]) -> FlatArgs<'_> {
    let mut flat = FlatArgs::default();
    flatten_into(args, &mut flat);
    flat
}

fn flatten_into<'ctx>(args: &'ctx [TemplateArg], flat: &mut FlatArgs<'ctx>) {
    for arg in args {
        match arg {
            TemplateArg::Type(ty) => flat.types.push(*ty),
            TemplateArg::Pack(elements) => flatten_into(elements, flat),
            TemplateArg::Integral { .. }
            | TemplateArg::Expression(_)
            | TemplateArg::Template(_)
            | TemplateArg::Null => flat.dropped.push(arg),
        }
    }
}

#[cfg(test)]
mod tests;
