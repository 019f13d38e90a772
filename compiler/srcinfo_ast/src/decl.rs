//! Declaration nodes of the declaration model.

use bitflags::bitflags;

use crate::{DeclId, QualType, SourceLoc, SourceRange, TemplateArg};

bitflags! {
    /// Classification bits a consumer can filter on.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct DeclFlags: u16 {
        /// This redeclaration is the definition (has a body or member list).
        const DEFINITION = 1 << 0;
        const VIRTUAL = 1 << 1;
        const VARIADIC = 1 << 2;
        /// `= default` special member.
        const DEFAULTED = 1 << 3;
        /// Declared inside a template pattern (primary template or member of one).
        const TEMPLATED = 1 << 4;
        /// Synthesized by the frontend, not written in source.
        const IMPLICIT = 1 << 5;
        const STATIC = 1 << 6;
    }
}

/// A declaration as reported by the frontend.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decl {
    pub id: DeclId,
    /// `None` for anonymous entities.
    pub name: Option<String>,
    /// Semantic parent context; `None` only for the translation unit.
    pub parent: Option<DeclId>,
    /// First declaration of the same entity (itself if this is the first).
    pub canonical: DeclId,
    pub range: SourceRange,
    pub flags: DeclFlags,
    pub kind: DeclKind,
}

impl Decl {
    /// Position of the declaration (start of its range).
    #[inline]
    pub fn location(&self) -> &SourceLoc {
        &self.range.begin
    }

    #[inline]
    pub fn is_canonical(&self) -> bool {
        self.id == self.canonical
    }

    #[inline]
    pub fn is_definition(&self) -> bool {
        self.flags.contains(DeclFlags::DEFINITION)
    }

    /// Check if this declaration opens a namespace scope.
    #[inline]
    pub fn is_namespace_context(&self) -> bool {
        matches!(
            self.kind,
            DeclKind::Namespace | DeclKind::TranslationUnit
        )
    }

    pub fn as_record(&self) -> Option<&RecordDecl> {
        match &self.kind {
            DeclKind::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match &self.kind {
            DeclKind::Function(function) => Some(function),
            _ => None,
        }
    }
}

/// Closed set of declaration kinds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclKind {
    TranslationUnit,
    Namespace,
    /// `extern "C" { ... }`; transparent for naming.
    LinkageSpec,
    Record(RecordDecl),
    Function(FunctionDecl),
    Var(VarDecl),
    Typedef(TypedefDecl),
}

impl DeclKind {
    /// Short lowercase label used in synthetic names and logs.
    pub const fn label(&self) -> &'static str {
        match self {
            DeclKind::TranslationUnit => "unit",
            DeclKind::Namespace => "namespace",
            DeclKind::LinkageSpec => "linkage",
            DeclKind::Record(_) => "record",
            DeclKind::Function(_) => "function",
            DeclKind::Var(_) => "var",
            DeclKind::Typedef(_) => "typedef",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagKind {
    #[default]
    Struct,
    Class,
    Union,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccessSpecifier {
    Public,
    Protected,
    Private,
}

/// Template-ness of a record or function.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemplateInfo {
    #[default]
    None,
    /// Primary template: only the parameter count is known.
    Primary { param_count: u32 },
    /// Concrete specialization with its instantiation arguments.
    Specialization { args: Vec<TemplateArg> },
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDecl {
    pub name: Option<String>,
    pub ty: QualType,
    pub range: SourceRange,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseSpecifier {
    pub ty: QualType,
    pub access: AccessSpecifier,
    pub is_virtual: bool,
}

/// An `public:`/`protected:`/`private:` label inside a record body.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccessSpec {
    pub access: AccessSpecifier,
    pub range: SourceRange,
}

#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordDecl {
    pub tag: TagKind,
    pub fields: Vec<FieldDecl>,
    /// Direct bases in declaration order.
    pub bases: Vec<BaseSpecifier>,
    pub access_specs: Vec<AccessSpec>,
    /// `{ ... }` of the definition; `None` for forward declarations.
    pub brace_range: Option<SourceRange>,
    pub template: TemplateInfo,
}

impl RecordDecl {
    pub fn new(tag: TagKind) -> Self {
        RecordDecl {
            tag,
            ..RecordDecl::default()
        }
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParamDecl {
    pub name: Option<String>,
    pub ty: QualType,
}

/// Present on member functions.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodInfo {
    pub record: DeclId,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDecl {
    pub ret: QualType,
    pub params: Vec<ParamDecl>,
    pub body: Option<SourceRange>,
    pub method: Option<MethodInfo>,
    pub template: TemplateInfo,
}

impl FunctionDecl {
    pub fn new(ret: QualType, params: Vec<ParamDecl>) -> Self {
        FunctionDecl {
            ret,
            params,
            body: None,
            method: None,
            template: TemplateInfo::None,
        }
    }
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarDecl {
    pub ty: QualType,
    pub has_init: bool,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypedefDecl {
    pub underlying: QualType,
}
