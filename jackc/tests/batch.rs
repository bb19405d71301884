use jackc::{
    collect_sources, compile_batch, compile_file, output_path, write_output, CompileOptions, Error,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Fresh scratch directory for one test
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("jackc-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(dir: &Path, name: &str, code: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, code).unwrap();
    path
}

const MAIN: &str = "class Main { function void main() { do Sys.halt(); return; } }";
const BALL: &str = "class Ball { field int x; method int x() { return x; } }";

#[test]
fn directory_sources_are_sorted_and_filtered() {
    let dir = scratch("collect");
    write(&dir, "Main.jack", MAIN);
    write(&dir, "Ball.jack", BALL);
    write(&dir, "notes.txt", "not a class");
    fs::create_dir(dir.join("sub.jack")).unwrap();

    let sources = collect_sources(&dir).unwrap();
    assert_eq!(sources, vec![dir.join("Ball.jack"), dir.join("Main.jack")]);

    let single = collect_sources(&dir.join("Main.jack")).unwrap();
    assert_eq!(single, vec![dir.join("Main.jack")]);
}

#[test]
fn missing_or_empty_input() {
    let dir = scratch("empty");
    assert!(matches!(
        collect_sources(&dir),
        Err(Error::NoSourceFiles(path)) if path == dir
    ));
    assert!(matches!(
        collect_sources(&dir.join("Nope.jack")),
        Err(Error::InputNotFound(_))
    ));
    assert!(matches!(
        compile_file(&dir.join("Nope.jack"), CompileOptions::default()),
        Err(Error::FileRead(..))
    ));
}

#[test]
fn batch_keeps_input_order_and_isolates_units() {
    let dir = scratch("batch");
    let paths = vec![
        write(&dir, "A.jack", "class A { function void f() { while (true) { } return; } }"),
        write(&dir, "B.jack", "class B { function void g() { let y = 1; return; } }"),
        write(&dir, "C.jack", "class C { function void h() { while (true) { } return; } }"),
    ];

    let results = compile_batch(&paths, CompileOptions::default());
    assert_eq!(
        results.iter().map(|(path, _)| path.clone()).collect::<Vec<_>>(),
        paths
    );

    let text = |idx: usize| match &results[idx].1 {
        Ok(commands) => vm::render(commands),
        Err(e) => panic!("{e}"),
    };
    // Label counters are per unit
    assert!(text(0).contains("label WHILE_EXP_0"));
    assert!(text(2).contains("label WHILE_EXP_0"));
    assert!(matches!(
        &results[1].1,
        Err(Error::UndefinedSymbol { name, line: 1 }) if name == "y"
    ));
}

#[test]
fn output_lands_next_to_the_source_or_in_the_given_directory() {
    let dir = scratch("output");
    let source = write(&dir, "Main.jack", MAIN);
    assert_eq!(output_path(&source, None), dir.join("Main.vm"));

    let out = dir.join("out");
    assert_eq!(output_path(&source, Some(&out)), out.join("Main.vm"));

    let commands = compile_file(&source, CompileOptions::default()).unwrap();
    let target = output_path(&source, None);
    write_output(&target, &commands).unwrap();
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "function Main.main 0\ncall Sys.halt 0\npop temp 0\npush constant 0\nreturn\n"
    );

    assert!(matches!(
        write_output(&out.join("missing").join("Main.vm"), &commands),
        Err(Error::FileWrite(..))
    ));
}
