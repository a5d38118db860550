use std::sync::Arc;

use common::{
    config::LintConfig,
    diagnostics::{CompleteDiagnostic, Severity},
    FileId, InputFile,
};
use enumck_driver::DriverDataBase;
use hir::{
    hir_def::{IntTy, PackagePath, PrimTy, StmtId},
    FuncBuilder, Program, ProgramBuilder,
};
use test_utils::{insta::assert_debug_snapshot, setup_tracing, Level};

const LEVEL_SRC: &str = "package level

func Describe(l Level) {
	switch l {
	case Low, Mid:
	}
}
";

const MAIN_SRC: &str = r#"package main

import "app/level"

func main() {
	var l level.Level
	switch l {
	case level.Low:
	}
	switch l {
	default:
	}
}
"#;

struct Fixture {
    program: Program,
    level: PackagePath,
    main: PackagePath,
    level_file: FileId,
    main_file: FileId,
}

/// `switch l { case ...: }` where every label is `qualifier.member` or a
/// plain identifier if `qualifier` is empty.
fn switch(f: &mut FuncBuilder<'_, '_>, qualifier: &str, labels: &[&str]) -> StmtId {
    let keyword = f.keyword("switch").unwrap();
    let tag = f.ident("l").unwrap();
    let labels = labels
        .iter()
        .map(|label| {
            let expr = if qualifier.is_empty() {
                f.ident(label)
            } else {
                f.selector(qualifier, label)
            };
            expr.unwrap()
        })
        .collect();
    let case = f.case(labels, vec![]).unwrap();
    f.switch(keyword, None, Some(tag), vec![case])
}

fn fixture() -> Fixture {
    let mut builder = ProgramBuilder::new();
    let level = builder.package("app/level", "level").unwrap();
    let main = builder.package("app/main", "main").unwrap();
    let int = builder.prim(PrimTy::Int(IntTy::Int));
    let level_ty = builder.named_type(&level, "Level", int).unwrap();
    builder
        .iota_constants(&level, level_ty, &["Low", "Mid", "High"])
        .unwrap();

    let mut file = builder.file(&level, "level.go", LEVEL_SRC).unwrap();
    let mut f = file.func("Describe").unwrap();
    f.param("l", level_ty).unwrap();
    let stmt = switch(&mut f, "", &["Low", "Mid"]);
    f.finish(vec![stmt]);
    let level_file = file.finish();

    let mut file = builder.file(&main, "main.go", MAIN_SRC).unwrap();
    file.import(&level).unwrap();
    let mut f = file.func("main").unwrap();
    f.var("l", level_ty).unwrap();
    let covered = switch(&mut f, "level", &["Low"]);
    let keyword = f.keyword("switch").unwrap();
    let tag = f.ident("l").unwrap();
    let default = f.default_case(vec![]);
    let defaulted = f.switch(keyword, None, Some(tag), vec![default]);
    f.finish(vec![covered, defaulted]);
    let main_file = file.finish();

    Fixture {
        program: builder.finish(),
        level,
        main,
        level_file,
        main_file,
    }
}

fn messages(diags: &[CompleteDiagnostic]) -> Vec<&str> {
    diags.iter().map(|diag| diag.message.as_str()).collect()
}

#[test]
fn run_all_reports_every_file_in_order() {
    let _guard = setup_tracing(Level::DEBUG);
    let fixture = fixture();
    let mut db = DriverDataBase::new(fixture.program, LintConfig::default());

    let diags = db.run_all();
    assert_debug_snapshot!(diags.format_lint_lines(db.files()), @r###"
    [
        "level.go:4:2: uncovered cases for Level enum switch\n\t- High (EC1000)",
        "main.go:7:2: uncovered cases for Level enum switch\n\t- Mid\n\t- High (EC1000)",
    ]
    "###);
}

#[test]
fn codespan_rendering() {
    let fixture = fixture();
    let mut db = DriverDataBase::new(fixture.program, LintConfig::default());

    let diags = db.run_on_file(fixture.main_file);
    assert_eq!(diags.len(), 1);

    let rendered = diags.format_diags(db.files());
    assert!(rendered.contains("error[EC1000]: uncovered cases for Level enum switch"));
    assert!(rendered.contains("main.go:7:2"));
    assert!(rendered.contains("`Level` switch misses 2 constants"));
    assert!(rendered.contains("= add the missing constants or a `default` clause"));

    diags.emit(db.files());
    assert_eq!(diags.format_diags(db.files()), rendered);
}

#[test]
fn registries_are_shared_per_closure() {
    let fixture = fixture();
    let mut db = DriverDataBase::new(fixture.program, LintConfig::default());

    let first = db.registry_for(&fixture.level);
    let second = db.registry_for(&fixture.level);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(db.cached_registries(), 1);

    db.run_on_file(fixture.level_file);
    db.run_on_package(&fixture.level);
    assert_eq!(db.cached_registries(), 1);

    db.run_on_file(fixture.main_file);
    assert_eq!(db.cached_registries(), 2);

    db.run_all();
    assert_eq!(db.cached_registries(), 2);
    assert_eq!(db.registry_for(&fixture.main).len(), 1);
}

#[test]
fn unknown_inputs_yield_no_diagnostics() {
    let fixture = fixture();
    let mut program = fixture.program;
    let notes = program.files.add(InputFile::new("notes.txt", "switch"));
    let mut db = DriverDataBase::new(program, LintConfig::default());

    assert!(db.run_on_file(notes).is_empty());
    assert!(db
        .run_on_package(&PackagePath::new("app/missing"))
        .is_empty());
}

#[test]
fn configured_severity_is_rendered() {
    let fixture = fixture();
    let config = LintConfig::parse(
        r#"
[enum-switch]
severity = "warning"
unknown = 1
"#,
    )
    .unwrap();
    assert_eq!(config.diagnostics.len(), 1);

    let mut db = DriverDataBase::new(fixture.program, config);
    let diags = db.run_on_package(&fixture.level);
    assert!(diags.iter().all(|diag| diag.severity == Severity::Warning));
    assert!(diags
        .format_diags(db.files())
        .contains("warning[EC1000]: uncovered cases for Level enum switch"));
}

#[test]
fn runs_are_idempotent() {
    let fixture = fixture();
    let mut db = DriverDataBase::new(fixture.program, LintConfig::default());

    let first = db.run_all();
    let second = db.run_all();
    assert_eq!(first, second);

    let first = first.into_vec();
    assert_eq!(
        messages(&first),
        vec![
            "uncovered cases for Level enum switch\n\t- High",
            "uncovered cases for Level enum switch\n\t- Mid\n\t- High",
        ]
    );
}
