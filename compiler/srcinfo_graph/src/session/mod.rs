//! The graph session.
//!
//! A [`GraphSession`] owns every cache of one run: the type cache, the name
//! resolver, the node tables, the file table and the namespace groups. The
//! frontend feeds declarations through [`GraphSession::add_declaration`] in
//! any order; [`GraphSession::finalize`] writes the graph exactly once.
//!
//! # Lifecycle
//!
//! 1. `create` opens the output. An unwritable destination fails here,
//!    before any traversal.
//! 2. `add_declaration` resolves nodes eagerly. Every step is idempotent.
//! 3. `finalize` confirms every accepted declaration, encodes the document
//!    and flushes the output.

mod builder;
mod finalize;
mod types;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};
use srcinfo_ast::{AstContext, DeclId, SourceLoc, SourceRange};

use crate::cache::TypeCache;
use crate::files::FileTable;
use crate::groups::NamespaceGroups;
use crate::names::NameResolver;
use crate::{
    Diagnostic, DiagnosticKind, Extent, FileId, FunctionId, FunctionNode, GraphConfig, GraphError,
    Position, RecordId, RecordNode, TypeDescriptor, TypeId, VarId, VariableNode,
};

pub struct GraphSession<'a, W: Write = BufWriter<File>> {
    ctx: &'a AstContext,
    config: GraphConfig,
    output: W,
    output_path: PathBuf,

    types: TypeCache,
    names: NameResolver,
    files: FileTable,
    groups: NamespaceGroups,

    records: Vec<RecordNode>,
    record_ids: FxHashMap<DeclId, RecordId>,
    functions: Vec<FunctionNode>,
    function_ids: FxHashMap<DeclId, FunctionId>,
    variables: Vec<VariableNode>,
    variable_ids: FxHashMap<DeclId, VarId>,

    /// Accepted declarations in arrival order.
    declarations: Vec<DeclId>,
    /// Every declaration passed to `add_declaration`, accepted or not.
    seen: FxHashSet<DeclId>,
    /// Typedefs whose underlying type is being resolved, since the last
    /// record boundary.
    resolving_aliases: FxHashSet<DeclId>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> GraphSession<'a> {
    /// Start a session writing to the configured output path.
    pub fn create(ctx: &'a AstContext, config: GraphConfig) -> Result<Self, GraphError> {
        let path = config.output_path(ctx.language());
        let file = File::create(&path).map_err(|source| GraphError::Create {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(output = %path.display(), "graph output opened");
        Ok(Self::with_writer(ctx, config, BufWriter::new(file), path))
    }
}

impl<'a, W: Write> GraphSession<'a, W> {
    /// Start a session writing to `output`; `path` only labels errors.
    pub fn with_writer(
        ctx: &'a AstContext,
        config: GraphConfig,
        output: W,
        path: impl Into<PathBuf>,
    ) -> Self {
        GraphSession {
            ctx,
            config,
            output,
            output_path: path.into(),
            types: TypeCache::new(),
            names: NameResolver::new(),
            files: FileTable::new(),
            groups: NamespaceGroups::new(),
            records: Vec::new(),
            record_ids: FxHashMap::default(),
            functions: Vec::new(),
            function_ids: FxHashMap::default(),
            variables: Vec::new(),
            variable_ids: FxHashMap::default(),
            declarations: Vec::new(),
            seen: FxHashSet::default(),
            resolving_aliases: FxHashSet::default(),
            diagnostics: Vec::new(),
        }
    }

    // === Accessors ===

    #[inline]
    pub fn context(&self) -> &'a AstContext {
        self.ctx
    }

    #[inline]
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    #[inline]
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn descriptor(&self, id: TypeId) -> Option<&TypeDescriptor> {
        self.types.get(id)
    }

    pub fn records(&self) -> &[RecordNode] {
        &self.records
    }

    pub fn functions(&self) -> &[FunctionNode] {
        &self.functions
    }

    pub fn variables(&self) -> &[VariableNode] {
        &self.variables
    }

    pub fn record(&self, id: RecordId) -> Option<&RecordNode> {
        self.records.get(id.index())
    }

    pub fn function(&self, id: FunctionId) -> Option<&FunctionNode> {
        self.functions.get(id.index())
    }

    pub fn variable(&self, id: VarId) -> Option<&VariableNode> {
        self.variables.get(id.index())
    }

    /// Node id of the record `decl` belongs to, if built.
    pub fn record_id(&self, decl: DeclId) -> Option<RecordId> {
        self.record_ids.get(&self.ctx.decl(decl).canonical).copied()
    }

    /// Node id of the function `decl` belongs to, if built.
    pub fn function_id(&self, decl: DeclId) -> Option<FunctionId> {
        self.function_ids.get(&self.ctx.decl(decl).canonical).copied()
    }

    /// Node id of the variable `decl` belongs to, if built.
    pub fn variable_id(&self, decl: DeclId) -> Option<VarId> {
        self.variable_ids.get(&self.ctx.decl(decl).canonical).copied()
    }

    pub fn file_path(&self, id: FileId) -> Option<&str> {
        self.files.path(id)
    }

    /// Namespace path of every group, in creation order.
    pub fn namespace_paths(&self) -> Vec<Vec<String>> {
        self.groups.iter().map(|group| group.path.clone()).collect()
    }

    /// Non-fatal conditions met so far, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    // === Shared helpers ===

    fn diagnose(&mut self, kind: DiagnosticKind, message: String) {
        let diagnostic = Diagnostic::new(kind, message);
        tracing::warn!(kind = kind.as_str(), "{}", diagnostic.message);
        self.diagnostics.push(diagnostic);
    }

    fn position(&mut self, loc: &SourceLoc) -> Position {
        Position {
            file: self.files.intern(&loc.file),
            line: loc.line,
            column: loc.column,
        }
    }

    fn extent(&mut self, range: &SourceRange) -> Extent {
        Extent {
            file: self.files.intern(range.file()),
            begin_line: range.begin.line,
            begin_column: range.begin.column,
            end_line: range.end.line,
            end_column: range.end.column,
        }
    }
}
