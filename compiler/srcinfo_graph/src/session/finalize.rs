//! End of run: document assembly and encoding.

use std::io::Write;

use super::GraphSession;
use crate::encode::encode;
use crate::groups::NamespaceGroup;
use crate::{
    FileEntry, FunctionEntry, GlobalEntry, GraphDocument, GraphError, NamespaceEntry, RecordEntry,
    TypeEntry,
};

impl<W: Write> GraphSession<'_, W> {
    /// Confirm every accepted declaration and write the graph.
    ///
    /// Consumes the session; the output is written exactly once. On error
    /// the output must be treated as invalid.
    #[tracing::instrument(level = "debug", skip(self), fields(output = %self.output_path.display()))]
    pub fn finalize(mut self) -> Result<GraphDocument, GraphError> {
        let declarations = std::mem::take(&mut self.declarations);
        for &decl in &declarations {
            self.ensure_node(decl);
        }
        self.declarations = declarations;

        let document = self.document();
        let written = encode(&document, &mut self.output);
        written.map_err(|err| self.output_error(err))?;
        self.output.flush().map_err(|source| GraphError::Write {
            path: self.output_path.clone(),
            source,
        })?;

        tracing::debug!(
            files = document.files.len(),
            namespaces = document.namespaces.len(),
            types = self.types.len(),
            records = self.records.len(),
            functions = self.functions.len(),
            globals = self.variables.len(),
            diagnostics = self.diagnostics.len(),
            "graph written"
        );
        Ok(document)
    }

    /// Snapshot of the graph built so far.
    pub fn document(&self) -> GraphDocument {
        GraphDocument {
            main_file: self.ctx.main_file().to_owned(),
            files: self
                .files
                .iter()
                .map(|(id, path)| FileEntry {
                    id,
                    path: path.to_owned(),
                })
                .collect(),
            namespaces: self.groups.iter().map(|group| self.namespace_entry(group)).collect(),
        }
    }

    fn namespace_entry(&self, group: &NamespaceGroup) -> NamespaceEntry {
        NamespaceEntry {
            path: group.path.clone(),
            types: group
                .types
                .iter()
                .filter_map(|&id| {
                    self.types.get(id).map(|descriptor| TypeEntry {
                        id,
                        descriptor: descriptor.clone(),
                    })
                })
                .collect(),
            records: group
                .records
                .iter()
                .filter_map(|&id| self.record(id))
                .map(|node| RecordEntry {
                    id: node.id,
                    name: node.name.clone(),
                    qualified_name: node.qualified_name.clone(),
                    kind: node.kind,
                    type_id: node.type_id,
                    bases: node.bases.clone(),
                    access_specs: node.access_specs.clone(),
                    body: node.body,
                })
                .collect(),
            functions: group
                .functions
                .iter()
                .filter_map(|&id| self.function(id))
                .map(|node| FunctionEntry {
                    id: node.id,
                    name: node.name.clone(),
                    qualified_name: node.qualified_name.clone(),
                    is_variadic: node.is_variadic,
                    is_virtual: node.is_virtual,
                    is_static: node.is_static,
                    owner: node.owner,
                    template_args: node.template_args.clone(),
                    return_type: node.return_type,
                    return_spelling: node.return_spelling.clone(),
                    params: node.params.clone(),
                    signature: node.signature,
                    positions: node.positions.clone(),
                    body: node.body,
                })
                .collect(),
            globals: group
                .variables
                .iter()
                .filter_map(|&id| self.variable(id))
                .map(|node| GlobalEntry {
                    id: node.id,
                    name: node.name.clone(),
                    qualified_name: node.qualified_name.clone(),
                    type_id: node.type_id,
                    has_initializer: node.has_initializer,
                    location: node.location,
                })
                .collect(),
        }
    }

    /// I/O failures while encoding are output failures.
    fn output_error(&self, err: GraphError) -> GraphError {
        match err {
            GraphError::Encode(inner) => match *inner {
                bincode::ErrorKind::Io(source) => GraphError::Write {
                    path: self.output_path.clone(),
                    source,
                },
                other => GraphError::Encode(Box::new(other)),
            },
            other => other,
        }
    }
}
