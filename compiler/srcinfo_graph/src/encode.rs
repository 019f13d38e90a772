//! Binary encoding of a [`GraphDocument`].
//!
//! Layout: 4-byte magic `SRCG`, little-endian `u32` format version, then the
//! bincode encoding of the document.

use std::io::{self, Read, Write};

use bincode::Options;

use crate::{GraphDocument, GraphError};

pub const MAGIC: [u8; 4] = *b"SRCG";

pub const FORMAT_VERSION: u32 = 1;

/// Upper bound on the payload bytes [`decode`] reads, so a corrupt length
/// prefix fails instead of allocating.
const DECODE_LIMIT: u64 = 1 << 30;

/// Write `document` to `writer`.
pub fn encode<W: Write>(document: &GraphDocument, mut writer: W) -> Result<(), GraphError> {
    let mut header = [0u8; 8];
    header[..4].copy_from_slice(&MAGIC);
    header[4..].copy_from_slice(&FORMAT_VERSION.to_le_bytes());
    writer
        .write_all(&header)
        .map_err(|err| GraphError::Encode(Box::new(bincode::ErrorKind::Io(err))))?;
    bincode::serialize_into(writer, document).map_err(GraphError::Encode)
}

/// Read a document written by [`encode`].
pub fn decode<R: Read>(mut reader: R) -> Result<GraphDocument, GraphError> {
    let mut header = [0u8; 8];
    reader.read_exact(&mut header).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            GraphError::BadMagic
        } else {
            GraphError::Decode(Box::new(bincode::ErrorKind::Io(err)))
        }
    })?;
    if header[..4] != MAGIC {
        return Err(GraphError::BadMagic);
    }
    let found = u32::from_le_bytes([header[4], header[5], header[6], header[7]]);
    if found != FORMAT_VERSION {
        return Err(GraphError::UnsupportedVersion { found });
    }
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(DECODE_LIMIT)
        .deserialize_from(reader)
        .map_err(GraphError::Decode)
}

#[cfg(test)]
mod tests;
