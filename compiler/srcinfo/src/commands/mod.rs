//! Command handlers for the `srcinfo` CLI.
//!
//! Handlers return errors instead of exiting so they can be driven from
//! tests; `main` prints the error and exits with status 1.

mod dump;
mod graph;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use bincode::Options;
use srcinfo_ast::AstContext;
use srcinfo_graph::GraphError;
use thiserror::Error;

pub use dump::{dump_graph, write_listing};
pub use graph::{build_graph, parse_graph_options, GraphOptions, GraphSummary};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` is not a serialized translation unit: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("cannot write listing: {0}")]
    Listing(#[source] io::Error),

    #[error("{0}")]
    Usage(String),
}

/// Upper bound on the bytes one unit may decode from.
const UNIT_SIZE_LIMIT: u64 = 1 << 30;

/// Load a translation unit written by a frontend.
///
/// The unit is rejected unless every handle in it resolves.
pub fn load_unit(path: &Path) -> Result<AstContext, CommandError> {
    let file = File::open(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let load_error = |source: bincode::Error| CommandError::Load {
        path: path.to_path_buf(),
        source,
    };
    let ctx: AstContext = bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(UNIT_SIZE_LIMIT)
        .deserialize_from(BufReader::new(file))
        .map_err(load_error)?;
    ctx.validate()
        .map_err(|err| load_error(Box::new(bincode::ErrorKind::Custom(err.to_string()))))?;
    Ok(ctx)
}

#[cfg(test)]
mod tests;
