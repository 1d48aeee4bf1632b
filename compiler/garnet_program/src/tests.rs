#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use garnet_ir::{NodeKind, Printer};
use pretty_assertions::assert_eq;

const S: Span = Span::DUMMY;

fn program(loader: MemoryLoader) -> Program {
    Program::new(SharedInterner::new(), loader)
}

#[test]
fn temps_are_numbered_from_one() {
    let mut program = program(MemoryLoader::new());
    let first = program.allocate_temp_name();
    let second = program.allocate_temp_name();
    assert_eq!(program.interner().lookup(first), "#temp_1");
    assert_eq!(program.interner().lookup(second), "#temp_2");
}

#[test]
fn regex_constants_are_shared_by_text() {
    let mut program = program(MemoryLoader::new());
    let abc = program.interner().intern("abc");
    let xyz = program.interner().intern("xyz");

    let first = program.intern_regex_constant(abc, S);
    let again = program.intern_regex_constant(abc, S);
    let other = program.intern_regex_constant(xyz, S);

    assert_eq!(first, again);
    assert_ne!(first, other);
    assert_eq!(program.constants().len(), 2);
    assert_eq!(program.interner().lookup(first), "#Regexp_0");
    assert_eq!(program.interner().lookup(other), "#Regexp_1");

    let def = program.constant(first).map(|c| c.value.clone());
    let printed = def.map(|value| Printer::new(program.interner()).print(&value));
    assert_eq!(printed.as_deref(), Some("::Regexp.new(\"abc\")"));
}

#[test]
fn shared_interner_is_the_program_interner() {
    let interner = SharedInterner::new();
    let program = Program::new(interner.clone(), MemoryLoader::new());

    let name = program.shared_interner().intern("loader_side");
    assert_eq!(program.interner().lookup(name), "loader_side");
    assert_eq!(interner.intern("loader_side"), name);
}

#[test]
fn generic_types_are_deduplicated() {
    let mut program = program(MemoryLoader::new());
    let array = program.interner().intern("Array");
    let int32 = garnet_ir::Path::global(program.interner().intern("Int32"));

    let a = program.intern_generic_type(array, vec![TypeArg::Named(int32.clone())]);
    let b = program.intern_generic_type(array, vec![TypeArg::Named(int32)]);
    assert_eq!(a, b);
    assert_eq!(program.types().len(), 1);
}

#[test]
fn require_loads_once() {
    let loader = MemoryLoader::new().with_file("lib/util.gar", Node::int(1, S));
    let mut program = program(loader);
    let main = Path::new("lib/main.gar");

    let file = program
        .resolve_require("./util", Some(main))
        .unwrap()
        .expect("fresh file");
    assert_eq!(file.path, PathBuf::from("lib/util.gar"));
    assert_eq!(file.root.kind, NodeKind::Int(1));

    program.finish_require(&file.path);
    assert!(program.is_loaded(&file.path));
    assert!(matches!(
        program.resolve_require("./util.gar", Some(main)),
        Ok(None)
    ));
}

#[test]
fn require_in_flight_file_is_circular() {
    let loader = MemoryLoader::new()
        .with_file("a.gar", Node::nil(S))
        .with_file("b.gar", Node::nil(S));
    let mut program = program(loader);

    assert!(program.begin_file(Path::new("a.gar")).is_ok());
    assert!(matches!(
        program.resolve_require("./b", Some(Path::new("a.gar"))),
        Ok(Some(_))
    ));
    assert_eq!(
        program
            .resolve_require("./a", Some(Path::new("b.gar")))
            .err(),
        Some(RequireError::Circular {
            chain: vec![
                PathBuf::from("a.gar"),
                PathBuf::from("b.gar"),
                PathBuf::from("a.gar"),
            ]
        })
    );
}

#[test]
fn missing_require_names_the_requester() {
    let mut program = program(MemoryLoader::new());
    let err = program
        .resolve_require("./nope", Some(Path::new("main.gar")))
        .err();
    assert_eq!(
        err,
        Some(RequireError::NotFound {
            path: "./nope".to_owned(),
            requested_from: Some(PathBuf::from("main.gar")),
        })
    );
    assert_eq!(
        err.map(|e| e.to_string()).as_deref(),
        Some("can't find file './nope' (required from 'main.gar')")
    );
}

#[test]
fn search_paths_resolve_bare_requires() {
    let loader = MemoryLoader::new().with_file("/vendor/json.gar", Node::nil(S));
    let mut program = program(loader).with_options(ProgramOptions {
        search_paths: vec![PathBuf::from("/std"), PathBuf::from("/vendor")],
    });

    assert_eq!(program.options().search_paths.len(), 2);
    let file = program.resolve_require("json", None);
    assert!(matches!(file, Ok(Some(RequiredFile { ref path, .. })) if path == Path::new("/vendor/json.gar")));
}

#[test]
fn fs_loader_reads_and_parses() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("answer.gar");
    std::fs::write(&path, "42").unwrap();

    let loader = FsLoader::new(|source: &str, _: &Path, _: &SharedInterner| {
        source
            .trim()
            .parse::<i64>()
            .map(|n| Node::int(n, S))
            .map_err(|e| e.to_string())
    });
    let mut program = Program::new(SharedInterner::new(), loader).with_options(ProgramOptions {
        search_paths: vec![dir.path().to_path_buf()],
    });

    let file = program
        .resolve_require("answer", None)
        .unwrap()
        .expect("answer.gar loads");
    assert_eq!(file.root.kind, NodeKind::Int(42));
}

#[test]
fn failed_load_is_not_left_in_flight() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.gar"), "x").unwrap();

    let loader = FsLoader::new(|_: &str, _: &Path, _: &SharedInterner| {
        Err::<Node, _>("unexpected token".to_owned())
    });
    let mut program = Program::new(SharedInterner::new(), loader).with_options(ProgramOptions {
        search_paths: vec![dir.path().to_path_buf()],
    });

    let first = program.resolve_require("bad", None);
    assert!(matches!(first, Err(RequireError::Load { ref message, .. }) if message == "unexpected token"));
    // A second attempt fails the same way instead of reporting a cycle.
    let second = program.resolve_require("bad", None);
    assert!(matches!(second, Err(RequireError::Load { .. })));
}
