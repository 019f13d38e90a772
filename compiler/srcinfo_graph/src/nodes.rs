//! Graph nodes built from declarations.
//!
//! Nodes are keyed by canonical declaration, so every redeclaration of an
//! entity lands on the same node. Cross-references use document-local ids.

use serde::{Deserialize, Serialize};
use srcinfo_ast::DeclId;

use crate::{FileId, FunctionId, RecordId, RecordKind, TypeId, VarId};

/// A source position resolved against the file table.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Position {
    pub file: FileId,
    pub line: u32,
    pub column: u32,
}

/// A source range inside one file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
pub struct Extent {
    pub file: FileId,
    pub begin_line: u32,
    pub begin_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

/// One parameter of a function node.
#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct ParamRef {
    /// `None` for unnamed parameters.
    pub name: Option<String>,
    pub type_id: TypeId,
    /// Printable spelling (`const Widget*`).
    pub spelling: String,
}

#[derive(Clone, Debug)]
pub struct RecordNode {
    pub id: RecordId,
    /// Canonical declaration.
    pub decl: DeclId,
    /// Name inside the namespace (`Outer::Inner`).
    pub name: String,
    pub qualified_name: String,
    pub kind: RecordKind,
    /// [`TypeId::NONE`] until the record's type entry has been reserved.
    pub type_id: TypeId,
    /// Direct bases in declaration order.
    pub bases: Vec<RecordId>,
    /// Access labels in declaration order.
    pub access_specs: Vec<Extent>,
    pub body: Option<Extent>,
    pub namespace: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct FunctionNode {
    pub id: FunctionId,
    /// Canonical declaration.
    pub decl: DeclId,
    pub name: String,
    pub qualified_name: String,
    pub is_variadic: bool,
    pub is_virtual: bool,
    pub is_static: bool,
    /// Owning record for methods.
    pub owner: Option<RecordId>,
    pub template_args: Vec<TypeId>,
    pub return_type: TypeId,
    pub return_spelling: String,
    pub params: Vec<ParamRef>,
    /// The function's own signature entry.
    pub signature: TypeId,
    /// One position per redeclaration, in declaration order.
    pub positions: Vec<Position>,
    /// Body of the defining redeclaration, if recorded.
    pub body: Option<Extent>,
    pub namespace: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct VariableNode {
    pub id: VarId,
    /// Canonical declaration.
    pub decl: DeclId,
    pub name: String,
    pub qualified_name: String,
    pub type_id: TypeId,
    pub has_initializer: bool,
    pub location: Position,
    pub namespace: Vec<String>,
}
