use indoc::indoc;

use super::Compiler;
use crate::parser::parse_module;

fn compile_with(mut compiler: Compiler, source: &str) -> Compiler {
    let module = parse_module("policy.zego", source).unwrap();
    compiler.compile([("policy.zego", module)]);
    compiler
}

fn resolved(source: &str) -> String {
    let compiler = compile_with(Compiler::new(), source);
    assert!(!compiler.failed(), "{}", compiler.diagnostics());
    compiler.module("policy.zego").unwrap().to_string()
}

fn warnings(compiler: &Compiler) -> Vec<String> {
    compiler
        .diagnostics()
        .iter()
        .filter(|d| d.is_warning())
        .map(ToString::to_string)
        .collect()
}

#[test]
fn rule_names_become_fully_qualified() {
    let module = resolved(indoc! {"
        package a.b
        limit := 10
        allow := true { input.size < limit }
    "});
    insta::assert_snapshot!(module, @r"
    package a.b
    limit := 10
    allow := true { lt(input.size, zego.a.b.limit) }
    ");
}

#[test]
fn reference_heads() {
    let module = resolved(indoc! {"
        package p
        users := input.users
        admin := users[0].name
        count := users.total + 1
    "});
    insta::assert_snapshot!(module, @r"
    package p
    users := input.users
    admin := zego.p.users[0].name
    count := add(zego.p.users.total, 1)
    ");
}

#[test]
fn indexes_and_calls() {
    let module = resolved(indoc! {r#"
        package p
        key := "k"
        f := 1
        x := input.m[key]
        y := count(f)
        z := f(key)
    "#});
    insta::assert_snapshot!(module, @r#"
    package p
    key := "k"
    f := 1
    x := input.m[zego.p.key]
    y := count(zego.p.f)
    z := zego.p.f(zego.p.key)
    "#);
}

#[test]
fn operators_are_not_rule_names() {
    let module = resolved(indoc! {"
        package p
        lt := 1
        add := 2
        t := true { 1 < 2 + lt }
    "});
    insta::assert_snapshot!(module, @r"
    package p
    lt := 1
    add := 2
    t := true { lt(1, add(2, zego.p.lt)) }
    ");
}

#[test]
fn declarations_shadow_rules_from_then_on() {
    let compiler = compile_with(
        Compiler::new(),
        indoc! {"
            package p
            x := 1
            y := x {
                x == 1
                x := 2
                z := x
            }
        "},
    );

    insta::assert_snapshot!(compiler.module("policy.zego").unwrap(), @r"
    package p
    x := 1
    y := x { equal(zego.p.x, 1); declare(x, 2); declare(z, x) }
    ");
    assert!(!compiler.failed());
    assert_eq!(
        warnings(&compiler),
        ["policy.zego:5: local variable `x` shadows a rule of the same package"]
    );
}

#[test]
fn locals_do_not_leak_between_rules() {
    let module = resolved(indoc! {"
        package p
        x := 1
        a := true { x := 2 }
        b := x
    "});
    insta::assert_snapshot!(module, @r"
    package p
    x := 1
    a := true { declare(x, 2) }
    b := zego.p.x
    ");
}

#[test]
fn shadow_warnings_can_be_disabled() {
    let source = "package p\nx := 1\na := true { x := 2 }";

    let compiler = compile_with(Compiler::new(), source);
    assert!(compiler.diagnostics().has_warnings());

    let compiler = compile_with(Compiler::new().with_shadow_warnings(false), source);
    assert!(compiler.diagnostics().is_empty());
}

#[test]
fn other_packages_are_untouched() {
    let a = parse_module("a.zego", "package a\nx := 1").unwrap();
    let b = parse_module("b.zego", "package b\ny := x").unwrap();
    let mut compiler = Compiler::new();
    compiler.compile([("b.zego", b), ("a.zego", a)]);

    insta::assert_snapshot!(compiler.module("b.zego").unwrap(), @r"
    package b
    y := x
    ");
}

#[test]
fn rules_of_the_same_package_across_files() {
    let a = parse_module("a.zego", "package p\nx := y").unwrap();
    let b = parse_module("b.zego", "package p\ny := 1").unwrap();
    let mut compiler = Compiler::new();
    compiler.compile([("a.zego", a), ("b.zego", b)]);

    insta::assert_snapshot!(compiler.module("a.zego").unwrap(), @r"
    package p
    x := zego.p.y
    ");
}
