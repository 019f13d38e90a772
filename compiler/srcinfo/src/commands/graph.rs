//! The `graph` command: build and write the graph of one unit.

use std::path::{Path, PathBuf};

use srcinfo_ast::DeclKind;
use srcinfo_graph::{Diagnostic, GraphConfig, GraphSession};

use super::{load_unit, CommandError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphOptions {
    pub output: Option<PathBuf>,
    pub include_external_bodies: bool,
    pub main_file_only: bool,
    pub skip_templated: bool,
    pub keep_implicit: bool,
}

impl GraphOptions {
    fn config(&self) -> GraphConfig {
        let mut config = GraphConfig {
            output: self.output.clone(),
            include_external_bodies: self.include_external_bodies,
            ..GraphConfig::default()
        };
        config.filter.main_file_only = self.main_file_only;
        config.filter.skip_templated = self.skip_templated;
        if self.keep_implicit {
            config.filter.skip_implicit = false;
            config.filter.skip_defaulted = false;
        }
        config
    }
}

/// Parse the options following `srcinfo graph <unit>`.
pub fn parse_graph_options(args: &[String]) -> Result<GraphOptions, CommandError> {
    let mut options = GraphOptions::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-o" => {
                let Some(path) = args.get(i + 1) else {
                    return Err(CommandError::Usage("-o needs a path".to_owned()));
                };
                options.output = Some(PathBuf::from(path));
                i += 1;
            }
            "--external-bodies" => options.include_external_bodies = true,
            "--main-file-only" => options.main_file_only = true,
            "--skip-templated" => options.skip_templated = true,
            "--keep-implicit" => options.keep_implicit = true,
            other => return Err(CommandError::Usage(format!("unknown option `{other}`"))),
        }
        i += 1;
    }
    Ok(options)
}

/// What one `graph` run produced.
#[derive(Debug)]
pub struct GraphSummary {
    pub output: PathBuf,
    pub types: usize,
    pub records: usize,
    pub functions: usize,
    pub globals: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the graph of the unit at `unit_path` and write it.
#[tracing::instrument(level = "debug", skip(options))]
pub fn build_graph(unit_path: &Path, options: &GraphOptions) -> Result<GraphSummary, CommandError> {
    let ctx = load_unit(unit_path)?;
    let mut session = GraphSession::create(&ctx, options.config())?;
    let output = session.output_path().to_path_buf();

    // Stand-in for the frontend query service: every entity declaration,
    // in declaration order.
    for decl in ctx.decls() {
        if matches!(
            decl.kind,
            DeclKind::Record(_) | DeclKind::Function(_) | DeclKind::Var(_) | DeclKind::Typedef(_)
        ) {
            session.add_declaration(decl.id);
        }
    }

    let diagnostics = session.diagnostics().to_vec();
    let document = session.finalize()?;
    Ok(GraphSummary {
        output,
        types: document.types().count(),
        records: document.records().count(),
        functions: document.functions().count(),
        globals: document.globals().count(),
        diagnostics,
    })
}
