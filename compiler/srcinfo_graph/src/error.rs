//! Fatal errors: the output resource and the encoded format.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("cannot create graph output `{}`: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot write graph output `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode graph: {0}")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode graph: {0}")]
    Decode(#[source] bincode::Error),

    #[error("not a graph document (bad magic)")]
    BadMagic,

    #[error("unsupported graph format version {found}")]
    UnsupportedVersion { found: u32 },
}
