use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use srcinfo_ast::{
    AstContext, BuiltinClass, DeclFlags, Language, QualType, SourceRange, TagKind, TypeKind,
    TypeRef,
};
use srcinfo_graph::{decode, DiagnosticKind, GraphError};

use super::*;

fn at(line: u32) -> SourceRange {
    SourceRange::lines("app.cpp", line, line)
}

/// ```text
/// namespace app {
///     struct Config { int retries; };
///     int run(Config* config);
///     Config defaults;
/// }
/// ```
fn unit() -> AstContext {
    let mut ctx = AstContext::new(Language::Cxx, "app.cpp");
    let tu = ctx.translation_unit();
    let app = ctx.namespace(tu, Some("app"), at(1));
    let config = ctx.record(app, Some("Config"), TagKind::Struct, at(2));
    ctx.add_flags(config, DeclFlags::DEFINITION);
    let int = ctx.builtin(BuiltinClass::SignedInt, 32, "int");
    ctx.add_field(config, Some("retries"), QualType::new(int), at(2));
    let config_ty = ctx.record_type(config);
    let config_ptr = ctx.pointer(config_ty);
    ctx.function(app, "run", int, &[("config", QualType::new(config_ptr))], at(3));
    ctx.variable(app, "defaults", config_ty, at(4));
    ctx
}

fn write_unit(dir: &Path, ctx: &AstContext) -> PathBuf {
    let path = dir.join("app.unit");
    let bytes = bincode::serialize(ctx).unwrap_or_else(|e| panic!("serialize unit: {e}"));
    fs::write(&path, bytes).unwrap_or_else(|e| panic!("write unit: {e}"));
    path
}

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_owned()).collect()
}

#[test]
fn graph_options_parse() {
    let options = parse_graph_options(&args(&[
        "-o",
        "out.graph",
        "--external-bodies",
        "--skip-templated",
    ]))
    .unwrap_or_else(|e| panic!("parse failed: {e}"));
    assert_eq!(
        options,
        GraphOptions {
            output: Some(PathBuf::from("out.graph")),
            include_external_bodies: true,
            skip_templated: true,
            ..GraphOptions::default()
        }
    );
}

#[test]
fn graph_options_reject_unknown_flag() {
    let err = parse_graph_options(&args(&["--frobnicate"])).err();
    assert!(matches!(err, Some(CommandError::Usage(msg)) if msg.contains("--frobnicate")));
}

#[test]
fn graph_options_need_output_path() {
    let err = parse_graph_options(&args(&["-o"])).err();
    assert!(matches!(err, Some(CommandError::Usage(_))));
}

#[test]
fn graph_command_writes_decodable_graph() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let unit_path = write_unit(dir.path(), &unit());
    let output = dir.path().join("app.graph");
    let options = GraphOptions {
        output: Some(output.clone()),
        ..GraphOptions::default()
    };

    let summary = build_graph(&unit_path, &options).unwrap_or_else(|e| panic!("graph: {e}"));
    assert_eq!(summary.output, output);
    assert_eq!(
        (summary.records, summary.functions, summary.globals),
        (1, 1, 1)
    );
    assert!(summary.diagnostics.is_empty());

    let bytes = fs::read(&output).unwrap_or_else(|e| panic!("read graph: {e}"));
    let document = decode(bytes.as_slice()).unwrap_or_else(|e| panic!("decode: {e}"));
    assert_eq!(document.main_file, "app.cpp");
    let app = document
        .namespace(&["app"])
        .unwrap_or_else(|| panic!("app group"));
    assert_eq!(app.records[0].qualified_name, "app::Config");
    assert_eq!(app.functions[0].qualified_name, "app::run");
    assert_eq!(app.functions[0].params[0].spelling, "app::Config*");
    assert_eq!(app.globals[0].qualified_name, "app::defaults");
    assert_eq!(document.types().count(), summary.types);
}

#[test]
fn graph_command_reports_missing_unit() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let missing = dir.path().join("absent.unit");
    let err = build_graph(&missing, &GraphOptions::default()).err();
    assert!(matches!(err, Some(CommandError::Read { path, .. }) if path == missing));
}

#[test]
fn graph_command_rejects_garbage_unit() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let path = dir.path().join("garbage.unit");
    fs::write(&path, [0xff_u8; 3]).unwrap_or_else(|e| panic!("write: {e}"));
    let err = build_graph(&path, &GraphOptions::default()).err();
    assert!(matches!(err, Some(CommandError::Load { .. })));
}

#[test]
fn graph_command_rejects_dangling_handles() {
    let mut ctx = unit();
    let tu = ctx.translation_unit();
    ctx.variable(tu, "x", TypeRef::from_raw(99), at(9));

    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let unit_path = write_unit(dir.path(), &ctx);
    let options = GraphOptions {
        output: Some(dir.path().join("dangling.graph")),
        ..GraphOptions::default()
    };
    let err = build_graph(&unit_path, &options).err();
    assert!(
        matches!(&err, Some(CommandError::Load { source, .. }) if source.to_string().contains("type #99")),
        "got {err:?}"
    );
}

#[test]
fn graph_command_surfaces_unsupported_types() {
    let mut ctx = unit();
    let tu = ctx.translation_unit();
    let unsupported = ctx.add_type(TypeKind::Unsupported {
        spelling: "decltype(auto)".to_owned(),
    });
    ctx.variable(tu, "weird", unsupported, at(9));

    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let unit_path = write_unit(dir.path(), &ctx);
    let options = GraphOptions {
        output: Some(dir.path().join("weird.graph")),
        ..GraphOptions::default()
    };
    let summary = build_graph(&unit_path, &options).unwrap_or_else(|e| panic!("graph: {e}"));
    assert!(summary
        .diagnostics
        .iter()
        .any(|d| d.kind == DiagnosticKind::UnsupportedType));
}

#[test]
fn dump_lists_every_group() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let unit_path = write_unit(dir.path(), &unit());
    let output = dir.path().join("app.graph");
    let options = GraphOptions {
        output: Some(output.clone()),
        ..GraphOptions::default()
    };
    build_graph(&unit_path, &options).unwrap_or_else(|e| panic!("graph: {e}"));

    let mut listing = Vec::new();
    dump_graph(&output, &mut listing).unwrap_or_else(|e| panic!("dump: {e}"));
    let text = String::from_utf8(listing).unwrap_or_else(|e| panic!("utf8: {e}"));

    assert!(text.starts_with("main file: app.cpp\n"));
    assert!(text.contains("namespace <global>"));
    assert!(text.contains("namespace app\n"));
    assert!(text.contains("struct app::Config"));
    assert!(text.contains("int app::run(app::Config* config)"));
    assert!(text.contains("global v0: app::defaults"));
    assert!(text.contains("at app.cpp:3:1"));
}

#[test]
fn dump_rejects_non_graph_file() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let path = dir.path().join("not.graph");
    fs::write(&path, b"hello, world").unwrap_or_else(|e| panic!("write: {e}"));
    let err = dump_graph(&path, &mut Vec::new()).err();
    assert!(matches!(
        err,
        Some(CommandError::Graph(GraphError::BadMagic))
    ));
}
