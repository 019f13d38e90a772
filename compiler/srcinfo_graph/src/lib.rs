//! Type and symbol graph builder for resolved C/C++ declarations.
//!
//! Walks the declarations of one translation unit, deduplicates every type
//! into a stable-id graph, and encodes the result as one binary document.
//!
//! # Pipeline
//!
//! - `decompose`: one type handle to one [`Shape`] layer
//! - `cache`: canonical keys to sequential [`TypeId`]s, with records
//!   reserved before their fields are expanded
//! - `names`: namespace paths and scoped names with cycle guards
//! - `session`: declaration nodes, namespace groups, the file table
//! - `encode`: the [`GraphDocument`] wire format
//!
//! # Determinism
//!
//! Every id is allocated in order of first encounter, so the same
//! declaration stream always yields byte-identical output.

mod cache;
mod config;
mod decompose;
mod descriptor;
mod diagnostic;
mod document;
mod encode;
mod error;
mod files;
mod groups;
mod ids;
mod names;
mod nodes;
mod session;
mod stack;

pub use cache::{Interned, TypeCache};
pub use config::{GraphConfig, IngestFilter};
pub use decompose::{decompose, desugar, flatten_template_args, FlatArgs, Shape};
pub use descriptor::{CanonicalKey, FieldRef, PrimitiveKind, RecordKind, TypeDescriptor};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use document::{
    FileEntry, FunctionEntry, GlobalEntry, GraphDocument, NamespaceEntry, RecordEntry, TypeEntry,
};
pub use encode::{decode, encode, FORMAT_VERSION, MAGIC};
pub use error::GraphError;
pub use files::FileTable;
pub use groups::{NamespaceGroup, NamespaceGroups};
pub use ids::{FileId, FunctionId, RecordId, TypeId, VarId};
pub use names::{NameResolver, SCOPE_SEPARATOR};
pub use nodes::{Extent, FunctionNode, ParamRef, Position, RecordNode, VariableNode};
pub use session::GraphSession;
