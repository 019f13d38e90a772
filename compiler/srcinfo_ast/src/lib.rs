//! Resolved declaration model consumed by the graph builder.
//!
//! A compiler frontend (the declaration-matching query service) parses and
//! resolves a translation unit, then hands the result over as an
//! [`AstContext`]: a flat arena of types and declarations addressed by
//! [`TypeRef`] and [`DeclId`] handles.
//!
//! # Design Philosophy
//!
//! - **Handles, not pointers**: every cross-reference is a `u32` index
//! - **Redeclarations are explicit**: each declaration names its canonical
//!   (first) declaration, so identity never depends on spelling
//! - **Sugar is preserved**: parentheses, elaborated keywords and typedefs
//!   stay visible so consumers can decide what to strip
//!
//! With the `serde` feature enabled, the whole model can be written to and
//! read from disk.

mod context;
mod decl;
mod ids;
mod source;
mod ty;

pub use context::{AstContext, InvalidHandle};
pub use decl::{
    AccessSpec, AccessSpecifier, BaseSpecifier, Decl, DeclFlags, DeclKind, FieldDecl,
    FunctionDecl, MethodInfo, ParamDecl, RecordDecl, TagKind, TemplateInfo, TypedefDecl, VarDecl,
};
pub use ids::{DeclId, TypeRef};
pub use source::{Language, SourceLoc, SourceRange};
pub use ty::{BuiltinClass, QualType, TemplateArg, TypeKind};
