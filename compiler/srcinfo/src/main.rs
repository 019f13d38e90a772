//! srcinfo CLI
//!
//! Builds type/symbol graphs from translation units serialized by a
//! frontend.

use std::path::Path;

use srcinfo::commands::{build_graph, dump_graph, parse_graph_options, CommandError};
use srcinfo::init_tracing;

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "graph" => {
            if args.len() < 3 {
                eprintln!("Usage: srcinfo graph <unit> [options]");
                eprintln!();
                eprintln!("Options:");
                eprintln!("  -o <path>           Output file (default: srcinfo.<lang>.graph)");
                eprintln!("  --external-bodies   Record bodies defined outside the main file");
                eprintln!("  --main-file-only    Ignore declarations from included files");
                eprintln!("  --skip-templated    Ignore template declarations");
                eprintln!("  --keep-implicit     Keep implicit and defaulted declarations");
                std::process::exit(1);
            }
            let options = parse_graph_options(&args[3..]).unwrap_or_else(|e| fail(&e));
            let summary = build_graph(Path::new(&args[2]), &options).unwrap_or_else(|e| fail(&e));
            for diagnostic in &summary.diagnostics {
                eprintln!("warning: {diagnostic}");
            }
            println!(
                "wrote {}: {} types, {} records, {} functions, {} globals",
                summary.output.display(),
                summary.types,
                summary.records,
                summary.functions,
                summary.globals
            );
        }
        "dump" => {
            if args.len() < 3 {
                eprintln!("Usage: srcinfo dump <graph>");
                std::process::exit(1);
            }
            let mut stdout = std::io::stdout().lock();
            dump_graph(Path::new(&args[2]), &mut stdout).unwrap_or_else(|e| fail(&e));
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-V" => {
            println!("srcinfo {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn fail(error: &CommandError) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1);
}

fn print_usage() {
    println!("srcinfo (type/symbol graph builder)");
    println!();
    println!("Usage: srcinfo <command> [options]");
    println!();
    println!("Commands:");
    println!("  graph <unit>    Build and encode the graph of a serialized unit");
    println!("  dump <graph>    Print an encoded graph as text");
    println!("  help            Show this help message");
    println!("  version         Show version information");
    println!();
    println!("Environment:");
    println!("  RUST_LOG=debug        Enable tracing output");
    println!("  SRCINFO_LOG_TREE=1    Show tracing as an indented span tree");
}
