//! The `dump` command: print an encoded graph as text.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use srcinfo_graph::{decode, GraphDocument, Position};

use super::CommandError;

/// Decode the graph at `path` and write a listing of it to `out`.
pub fn dump_graph(path: &Path, out: &mut impl Write) -> Result<(), CommandError> {
    let file = File::open(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = decode(BufReader::new(file))?;
    write_listing(&document, out).map_err(CommandError::Listing)
}

/// Write a human-readable listing of `document`, one group at a time.
pub fn write_listing(document: &GraphDocument, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "main file: {}", document.main_file)?;
    for file in &document.files {
        writeln!(out, "  file {}: {}", file.id, file.path)?;
    }

    for ns in &document.namespaces {
        if ns.path.is_empty() {
            writeln!(out, "namespace <global>")?;
        } else {
            writeln!(out, "namespace {}", ns.path.join("::"))?;
        }
        for entry in &ns.types {
            writeln!(out, "  type {}: {}", entry.id, entry.descriptor)?;
        }
        for record in &ns.records {
            write!(
                out,
                "  record {}: {} {} ({})",
                record.id,
                record.kind.keyword(),
                record.qualified_name,
                record.type_id
            )?;
            if !record.bases.is_empty() {
                let bases: Vec<_> = record.bases.iter().map(ToString::to_string).collect();
                write!(out, " : {}", bases.join(", "))?;
            }
            writeln!(out)?;
        }
        for function in &ns.functions {
            let params: Vec<_> = function
                .params
                .iter()
                .map(|p| match &p.name {
                    Some(name) => format!("{} {name}", p.spelling),
                    None => p.spelling.clone(),
                })
                .collect();
            write!(
                out,
                "  function {}: {} {}({})",
                function.id,
                function.return_spelling,
                function.qualified_name,
                params.join(", ")
            )?;
            if let Some(owner) = function.owner {
                write!(out, " in {owner}")?;
            }
            if function.is_virtual {
                write!(out, " virtual")?;
            }
            if function.is_static {
                write!(out, " static")?;
            }
            writeln!(out)?;
            for position in &function.positions {
                writeln!(out, "    at {}", locate(document, *position))?;
            }
        }
        for global in &ns.globals {
            write!(
                out,
                "  global {}: {} ({}) at {}",
                global.id,
                global.qualified_name,
                global.type_id,
                locate(document, global.location)
            )?;
            if global.has_initializer {
                write!(out, " = ...")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn locate(document: &GraphDocument, position: Position) -> String {
    let file = document.file_path(position.file).unwrap_or("<unknown>");
    format!("{file}:{}:{}", position.line, position.column)
}
