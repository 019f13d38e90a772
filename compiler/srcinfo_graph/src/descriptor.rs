//! Type descriptors and their canonical keys.
//!
//! A [`TypeDescriptor`] is the resolved, id-linked form of one type shape.
//! A [`CanonicalKey`] is what the type cache deduplicates on: the shape tag
//! plus already-resolved child ids and numeric parameters. Records and
//! aliases are keyed by declaration identity instead of structure.

use std::fmt;

use serde::{Deserialize, Serialize};
use srcinfo_ast::{BuiltinClass, DeclId, TagKind};

use crate::TypeId;

/// Numeric category of a primitive type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum PrimitiveKind {
    SignedInt,
    UnsignedInt,
    Float,
    Void,
    Other,
}

impl From<BuiltinClass> for PrimitiveKind {
    fn from(class: BuiltinClass) -> Self {
        match class {
            BuiltinClass::SignedInt => PrimitiveKind::SignedInt,
            BuiltinClass::UnsignedInt => PrimitiveKind::UnsignedInt,
            BuiltinClass::Float => PrimitiveKind::Float,
            BuiltinClass::Void => PrimitiveKind::Void,
            BuiltinClass::Other => PrimitiveKind::Other,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum RecordKind {
    Class,
    Struct,
    Union,
}

impl From<TagKind> for RecordKind {
    fn from(tag: TagKind) -> Self {
        match tag {
            TagKind::Class => RecordKind::Class,
            TagKind::Struct => RecordKind::Struct,
            TagKind::Union => RecordKind::Union,
        }
    }
}

impl RecordKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            RecordKind::Class => "class",
            RecordKind::Struct => "struct",
            RecordKind::Union => "union",
        }
    }
}

/// One field of a record descriptor.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct FieldRef {
    pub name: String,
    pub ty: TypeId,
}

/// Resolved shape of one type entry.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// `length` is `None` for arrays without a constant dimension.
    Array {
        element: TypeId,
        length: Option<u64>,
    },
    /// `is_const` marks `T* const`; `const T*` is a pointer to `ConstQualified`.
    Pointer {
        target: TypeId,
        is_const: bool,
    },
    LValueRef {
        target: TypeId,
    },
    RValueRef {
        target: TypeId,
    },
    ConstQualified {
        target: TypeId,
    },
    /// `name` is the spelling first seen for this kind and width.
    Primitive {
        kind: PrimitiveKind,
        bits: u32,
        name: String,
    },
    /// Typedef decoration. Users of the alias reference `underlying` directly.
    Alias {
        name: String,
        underlying: TypeId,
    },
    Record {
        kind: RecordKind,
        name: String,
        template_args: Vec<TypeId>,
        fields: Vec<FieldRef>,
    },
    FunctionSignature {
        ret: TypeId,
        params: Vec<TypeId>,
        is_variadic: bool,
    },
    /// Specialization of a template with no resolved record behind it.
    Specialization {
        template_name: String,
        args: Vec<TypeId>,
        /// Non-type arguments as spelled (`3`, `N + 1`). They carry no type
        /// id but still distinguish specializations.
        value_args: Vec<String>,
    },
    /// Best-effort rendering of a shape with no structured form.
    Opaque {
        spelling: String,
    },
}

impl TypeDescriptor {
    /// Short tag naming the shape.
    pub const fn tag(&self) -> &'static str {
        match self {
            TypeDescriptor::Array { .. } => "array",
            TypeDescriptor::Pointer { .. } => "ptr",
            TypeDescriptor::LValueRef { .. } => "lref",
            TypeDescriptor::RValueRef { .. } => "rref",
            TypeDescriptor::ConstQualified { .. } => "const",
            TypeDescriptor::Primitive { .. } => "prim",
            TypeDescriptor::Alias { .. } => "alias",
            TypeDescriptor::Record { .. } => "record",
            TypeDescriptor::FunctionSignature { .. } => "fn",
            TypeDescriptor::Specialization { .. } => "spec",
            TypeDescriptor::Opaque { .. } => "opaque",
        }
    }

    /// Every type id this descriptor references, in field order.
    pub fn children(&self) -> Vec<TypeId> {
        match self {
            TypeDescriptor::Array { element, .. } => vec![*element],
            TypeDescriptor::Pointer { target, .. }
            | TypeDescriptor::LValueRef { target }
            | TypeDescriptor::RValueRef { target }
            | TypeDescriptor::ConstQualified { target } => vec![*target],
            TypeDescriptor::Alias { underlying, .. } => vec![*underlying],
            TypeDescriptor::Record {
                template_args,
                fields,
                ..
            } => template_args
                .iter()
                .copied()
                .chain(fields.iter().map(|field| field.ty))
                .collect(),
            TypeDescriptor::FunctionSignature { ret, params, .. } => {
                std::iter::once(*ret).chain(params.iter().copied()).collect()
            }
            TypeDescriptor::Specialization { args, .. } => args.clone(),
            TypeDescriptor::Primitive { .. } | TypeDescriptor::Opaque { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Array { element, length } => match length {
                Some(n) => write!(f, "{element}[{n}]"),
                None => write!(f, "{element}[]"),
            },
            TypeDescriptor::Pointer { target, is_const } => {
                write!(f, "{target}*")?;
                if *is_const {
                    f.write_str(" const")?;
                }
                Ok(())
            }
            TypeDescriptor::LValueRef { target } => write!(f, "{target}&"),
            TypeDescriptor::RValueRef { target } => write!(f, "{target}&&"),
            TypeDescriptor::ConstQualified { target } => write!(f, "const {target}"),
            TypeDescriptor::Primitive { kind, bits, name } => {
                write!(f, "{name} ({kind:?}, {bits} bits)")
            }
            TypeDescriptor::Alias { name, underlying } => write!(f, "{name} = {underlying}"),
            TypeDescriptor::Record {
                kind,
                name,
                template_args,
                fields,
            } => {
                write!(f, "{} {name}", kind.keyword())?;
                if !template_args.is_empty() {
                    write!(f, " <{}>", join(template_args))?;
                }
                f.write_str(" {")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, " {}: {}", field.name, field.ty)?;
                }
                f.write_str(" }")
            }
            TypeDescriptor::FunctionSignature {
                ret,
                params,
                is_variadic,
            } => {
                write!(f, "fn({}", join(params))?;
                if *is_variadic {
                    f.write_str(if params.is_empty() { "..." } else { ", ..." })?;
                }
                write!(f, ") -> {ret}")
            }
            TypeDescriptor::Specialization {
                template_name,
                args,
                value_args,
            } => {
                write!(f, "{template_name}<{}", join(args))?;
                if !value_args.is_empty() {
                    write!(f, "; {}", value_args.join(", "))?;
                }
                f.write_str(">")
            }
            TypeDescriptor::Opaque { spelling } => write!(f, "opaque `{spelling}`"),
        }
    }
}

fn join(ids: &[TypeId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Deduplication key of the type cache.
///
/// Two types with equal keys always map to the same [`TypeId`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum CanonicalKey {
    Array {
        element: TypeId,
        length: Option<u64>,
    },
    Pointer {
        target: TypeId,
        is_const: bool,
    },
    LValueRef(TypeId),
    RValueRef(TypeId),
    Const(TypeId),
    /// `spelling` is only kept for [`PrimitiveKind::Other`], where width
    /// alone does not tell `bool` from other uncategorized builtins.
    Primitive {
        kind: PrimitiveKind,
        bits: u32,
        spelling: Option<String>,
    },
    /// Canonical typedef declaration.
    Alias(DeclId),
    /// Canonical record declaration.
    Record(DeclId),
    Function {
        ret: TypeId,
        params: Vec<TypeId>,
        is_variadic: bool,
    },
    Specialization {
        template_name: String,
        args: Vec<TypeId>,
        value_args: Vec<String>,
    },
    Opaque(String),
}

impl CanonicalKey {
    /// Key of a structural descriptor.
    ///
    /// Returns `None` for records and aliases, whose keys are identity based
    /// and cannot be derived from the descriptor.
    pub fn structural(descriptor: &TypeDescriptor) -> Option<Self> {
        let key = match descriptor {
            TypeDescriptor::Array { element, length } => CanonicalKey::Array {
                element: *element,
                length: *length,
            },
            TypeDescriptor::Pointer { target, is_const } => CanonicalKey::Pointer {
                target: *target,
                is_const: *is_const,
            },
            TypeDescriptor::LValueRef { target } => CanonicalKey::LValueRef(*target),
            TypeDescriptor::RValueRef { target } => CanonicalKey::RValueRef(*target),
            TypeDescriptor::ConstQualified { target } => CanonicalKey::Const(*target),
            TypeDescriptor::Primitive { kind, bits, name } => CanonicalKey::Primitive {
                kind: *kind,
                bits: *bits,
                spelling: (*kind == PrimitiveKind::Other).then(|| name.clone()),
            },
            TypeDescriptor::FunctionSignature {
                ret,
                params,
                is_variadic,
            } => CanonicalKey::Function {
                ret: *ret,
                params: params.clone(),
                is_variadic: *is_variadic,
            },
            TypeDescriptor::Specialization {
                template_name,
                args,
                value_args,
            } => CanonicalKey::Specialization {
                template_name: template_name.clone(),
                args: args.clone(),
                value_args: value_args.clone(),
            },
            TypeDescriptor::Opaque { spelling } => CanonicalKey::Opaque(spelling.clone()),
            TypeDescriptor::Alias { .. } | TypeDescriptor::Record { .. } => return None,
        };
        Some(key)
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanonicalKey::Array { element, length } => match length {
                Some(n) => write!(f, "array({element},{n})"),
                None => write!(f, "array({element})"),
            },
            CanonicalKey::Pointer { target, is_const } => {
                write!(f, "ptr({target}{})", if *is_const { ",const" } else { "" })
            }
            CanonicalKey::LValueRef(target) => write!(f, "lref({target})"),
            CanonicalKey::RValueRef(target) => write!(f, "rref({target})"),
            CanonicalKey::Const(target) => write!(f, "const({target})"),
            CanonicalKey::Primitive {
                kind,
                bits,
                spelling,
            } => match spelling {
                Some(spelling) => write!(f, "prim({kind:?},{bits},{spelling})"),
                None => write!(f, "prim({kind:?},{bits})"),
            },
            CanonicalKey::Alias(decl) => write!(f, "alias(#{decl})"),
            CanonicalKey::Record(decl) => write!(f, "record(#{decl})"),
            CanonicalKey::Function {
                ret,
                params,
                is_variadic,
            } => write!(
                f,
                "fn({ret};{}{})",
                join(params),
                if *is_variadic { ";..." } else { "" }
            ),
            CanonicalKey::Specialization {
                template_name,
                args,
                value_args,
            } => write!(
                f,
                "spec({template_name};{};{})",
                join(args),
                value_args.join(",")
            ),
            CanonicalKey::Opaque(spelling) => write!(f, "opaque({spelling})"),
        }
    }
}

#[cfg(test)]
mod tests;
