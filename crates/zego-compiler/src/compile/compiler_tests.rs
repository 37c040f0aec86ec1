use indoc::indoc;

use super::{Compiler, compile_modules};
use crate::Error;

const SOURCES: [(&str, &str); 3] = [
    ("b.zego", "package a.b\nx := 1"),
    ("a.zego", "package a\ny := 2"),
    ("c.zego", "package a.b\nz := 3"),
];

#[test]
fn modules_are_sorted_by_filename() {
    let compiler = compile_modules(SOURCES).unwrap();
    let names: Vec<_> = compiler.modules().map(|(name, _)| name).collect();
    assert_eq!(names, ["a.zego", "b.zego", "c.zego"]);
}

#[test]
fn trees_do_not_depend_on_input_order() {
    let forward = compile_modules(SOURCES).unwrap();
    let backward = compile_modules(SOURCES.iter().rev().copied()).unwrap();

    assert_eq!(forward.module_tree(), backward.module_tree());
    assert_eq!(forward.rule_tree(), backward.rule_tree());
    assert_eq!(
        forward.module_tree().to_string(),
        backward.module_tree().to_string()
    );

    insta::assert_snapshot!(forward.module_tree(), @r"
    zego
      a (1 module)
        b (2 modules)
    ");
    insta::assert_snapshot!(forward.rule_tree(), @r"
    zego
      a
        b
          x (1 rule)
          z (1 rule)
        y (1 rule)
    ");
}

#[test]
fn exports_merge_per_package() {
    let compiler = compile_modules([
        ("one.zego", "package p\na := 1\nb := 2"),
        ("two.zego", "package p\nb := 3\nc := 4"),
        ("three.zego", "package q\nd := 5"),
    ])
    .unwrap();

    let exports: Vec<_> = compiler
        .exports()
        .iter()
        .map(|(package, rules)| {
            let rules: Vec<_> = rules.iter().map(String::as_str).collect();
            format!("{package}: {}", rules.join(", "))
        })
        .collect();
    insta::assert_snapshot!(exports.join("\n"), @r"
    package p: a, b, c
    package q: d
    ");

    let (_, module) = compiler.modules().next().unwrap();
    let globals: Vec<_> = compiler
        .globals(&module.package)
        .iter()
        .map(|(name, target)| format!("{name} -> {target}"))
        .collect();
    insta::assert_snapshot!(globals.join("\n"), @r"
    a -> zego.p.a
    b -> zego.p.b
    c -> zego.p.c
    ");
}

#[test]
fn undefined_references() {
    let err = compile_modules([
        (
            "p.zego",
            indoc! {"
                package p
                a := zego.p.b
                b := zego.q
                c := zego.p.a.deep[0]
                d := zego.r.x
                e := zego.p[input.k]
                f := data.x
                g := count(zego.p.nope)
            "},
        ),
        ("q.zego", "package q.r"),
    ])
    .unwrap_err();

    assert!(matches!(err, Error::Compile(_)));
    insta::assert_snapshot!(err, @r"
    2 errors occurred:
    p.zego:5: `zego.r` is not defined
    p.zego:8: `zego.p.nope` is not defined
    ");
}

#[test]
fn failed_compilation_keeps_state() {
    let module = crate::parse_module("p.zego", "package p\na := zego.p.z").unwrap();
    let mut compiler = Compiler::new();
    compiler.compile([("p.zego", module)]);

    assert!(compiler.failed());
    assert_eq!(compiler.diagnostics().error_count(), 1);
    assert!(compiler.module("p.zego").is_some());

    compiler.compile(Vec::<(String, _)>::new());
    assert!(!compiler.failed());
    assert_eq!(compiler.modules().count(), 0);
}

#[test]
fn parse_errors_of_every_file() {
    let err = compile_modules([("a.zego", "package a\nx :="), ("b.zego", "x := 1")]).unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
    insta::assert_snapshot!(err, @r"
    2 errors occurred:
    a.zego:2: unexpected eof token
    b.zego:1: package expected
    ");
}
