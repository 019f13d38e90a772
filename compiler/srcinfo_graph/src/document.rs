//! The encoded graph document.
//!
//! Plain serde data with no behavior beyond lookups. Every cross-reference
//! is an id into the same document.

use serde::{Deserialize, Serialize};

use crate::{
    Extent, FileId, FunctionId, ParamRef, Position, RecordId, RecordKind, TypeDescriptor, TypeId,
    VarId,
};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Primary source file of the unit the graph was built from.
    pub main_file: String,
    pub files: Vec<FileEntry>,
    /// Groups in first-reference order.
    pub namespaces: Vec<NamespaceEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub id: FileId,
    pub path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceEntry {
    /// Scope names, root first. Empty for the global namespace.
    pub path: Vec<String>,
    pub types: Vec<TypeEntry>,
    pub records: Vec<RecordEntry>,
    pub functions: Vec<FunctionEntry>,
    pub globals: Vec<GlobalEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub id: TypeId,
    pub descriptor: TypeDescriptor,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub id: RecordId,
    pub name: String,
    pub qualified_name: String,
    pub kind: RecordKind,
    pub type_id: TypeId,
    pub bases: Vec<RecordId>,
    pub access_specs: Vec<Extent>,
    pub body: Option<Extent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionEntry {
    pub id: FunctionId,
    pub name: String,
    pub qualified_name: String,
    pub is_variadic: bool,
    pub is_virtual: bool,
    pub is_static: bool,
    pub owner: Option<RecordId>,
    pub template_args: Vec<TypeId>,
    pub return_type: TypeId,
    pub return_spelling: String,
    pub params: Vec<ParamRef>,
    pub signature: TypeId,
    pub positions: Vec<Position>,
    pub body: Option<Extent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalEntry {
    pub id: VarId,
    pub name: String,
    pub qualified_name: String,
    pub type_id: TypeId,
    pub has_initializer: bool,
    pub location: Position,
}

impl GraphDocument {
    /// The group for `path`, if any node was declared in it.
    pub fn namespace(&self, path: &[&str]) -> Option<&NamespaceEntry> {
        self.namespaces
            .iter()
            .find(|ns| ns.path.iter().map(String::as_str).eq(path.iter().copied()))
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.namespaces.iter().flat_map(|ns| ns.types.iter())
    }

    pub fn records(&self) -> impl Iterator<Item = &RecordEntry> {
        self.namespaces.iter().flat_map(|ns| ns.records.iter())
    }

    pub fn functions(&self) -> impl Iterator<Item = &FunctionEntry> {
        self.namespaces.iter().flat_map(|ns| ns.functions.iter())
    }

    pub fn globals(&self) -> impl Iterator<Item = &GlobalEntry> {
        self.namespaces.iter().flat_map(|ns| ns.globals.iter())
    }

    pub fn type_entry(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.types()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.descriptor)
    }

    pub fn record(&self, id: RecordId) -> Option<&RecordEntry> {
        self.records().find(|entry| entry.id == id)
    }

    pub fn file_path(&self, id: FileId) -> Option<&str> {
        self.files
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.path.as_str())
    }
}
