use indoc::indoc;
use zego_core::{Body, Expr, Number, Operator, Rule, Statement, Term, Value};

use super::{ParseOptions, parse_query, parse_statement, parse_statements};

/// Renders a parsed query, one expression per line.
fn query(input: &str) -> String {
    let body = parse_query(input).unwrap();
    body.iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

fn error(input: &str) -> String {
    parse_statements("", input).unwrap_err().to_string()
}

fn rule(input: &str) -> Rule {
    match parse_statement(input).unwrap() {
        Statement::Rule(rule) => rule,
        other => panic!("expected rule, got {other}"),
    }
}

fn call(op: Operator, lhs: Term, rhs: Term) -> Term {
    Term::call(vec![Term::op(op), lhs, rhs])
}

fn num(literal: &str) -> Term {
    Term::number(Number::parse(literal).unwrap())
}

#[test]
fn precedence_climbing() {
    insta::assert_snapshot!(query("a+b*c*d"), @"add(a, multiply(multiply(b, c), d))");
    insta::assert_snapshot!(query("a*b+c"), @"add(multiply(a, b), c)");
    insta::assert_snapshot!(query("a - b - c"), @"minus(minus(a, b), c)");
    insta::assert_snapshot!(query("a / b % c"), @"modulus(divide(a, b), c)");
    insta::assert_snapshot!(query("a | b & c"), @"or(a, and(b, c))");
    insta::assert_snapshot!(query("a & b | c"), @"or(and(a, b), c)");
    insta::assert_snapshot!(query("a == b + 1"), @"equal(a, add(b, 1))");
    insta::assert_snapshot!(query("a < b == c"), @"equal(lt(a, b), c)");
    insta::assert_snapshot!(query("a != b >= c <= d > e"), @"gt(lte(gte(nEqual(a, b), c), d), e)");
}

#[test]
fn precedence_tree_shape() {
    let body = parse_query("a+b*c*d").unwrap();
    let expected = call(
        Operator::Add,
        Term::var("a"),
        call(
            Operator::Multiply,
            call(Operator::Multiply, Term::var("b"), Term::var("c")),
            Term::var("d"),
        ),
    );
    assert_eq!(body, Body::new([Expr::term(expected)]));
}

#[test]
fn nested_parentheses() {
    insta::assert_snapshot!(
        query("a == (b + (c - d)) * e"),
        @"equal(a, multiply(add(b, minus(c, d)), e))"
    );
    insta::assert_snapshot!(query("(a + b).c"), @"add(a, b).c");
}

#[test]
fn nested_brackets() {
    let body = parse_query(r#"a < input[input["a"]].b"#).unwrap();
    let expected = call(
        Operator::Lt,
        Term::var("a"),
        Term::reference(vec![
            Term::var("input"),
            Term::reference(vec![Term::var("input"), Term::string("a")]),
            Term::string("b"),
        ]),
    );
    assert_eq!(body, Body::new([Expr::term(expected)]));
    insta::assert_snapshot!(body, @"lt(a, input[input.a].b)");
}

#[test]
fn references() {
    insta::assert_snapshot!(query("input.a.b"), @"input.a.b");
    insta::assert_snapshot!(query(r#"input["bar bizz"]["null"][1]"#), @r#"input["bar bizz"]["null"][1]"#);
    insta::assert_snapshot!(query("input[x + 1]"), @"input[add(x, 1)]");
    insta::assert_snapshot!(query("input[ 1 ]"), @"input[1]");
}

#[test]
fn calls() {
    insta::assert_snapshot!(query("a.b( 1 )"), @"a.b(1)");
    insta::assert_snapshot!(query("f()"), @"f()");
    insta::assert_snapshot!(query("f(1, 2,)"), @"f(1, 2)");
    insta::assert_snapshot!(query("f(x).y[0]"), @"f(x).y[0]");
    insta::assert_snapshot!(query("f(x)(y)"), @"f(x)(y)");

    let body = parse_query("a.b(1)").unwrap();
    let expected = Term::call(vec![
        Term::reference(vec![Term::var("a"), Term::string("b")]),
        num("1"),
    ]);
    assert_eq!(body, Body::new([Expr::term(expected)]));
}

#[test]
fn declarations() {
    let body = parse_query("x := input.n + 1\nx > 2").unwrap();
    insta::assert_snapshot!(body, @"declare(x, add(input.n, 1)); gt(x, 2)");
    let first = body.first().unwrap();
    assert!(first.is_declaration());
    assert_eq!(first.operands()[0], Term::var("x"));
}

#[test]
fn literals() {
    insta::assert_snapshot!(
        query(r#"true false null_ "a\tb" `raw \t` 0x1F 1e5 .5"#),
        @r#"
    true
    false
    null_
    "a\tb"
    "raw \\t"
    0x1F
    1e5
    .5
    "#
    );
}

#[test]
fn literal_rendering_is_idempotent() {
    let values = [
        Term::boolean(true),
        Term::boolean(false),
        num("1"),
        num("12.34"),
        num("0x1F"),
        num("1_000"),
        num("2.5e-3"),
        Term::string("abc"),
        Term::string("with \"quotes\" and \\ backslash\nand newline"),
        Term::string("unicode ✓"),
        Term::var("x"),
        Term::var("_y1"),
    ];
    for value in values {
        let rendered = value.to_string();
        let body = parse_query(&rendered).unwrap();
        assert_eq!(body, Body::new([Expr::term(value)]), "{rendered}");
    }
}

#[test]
fn term_locations() {
    let body = parse_query("a ==\n  input.b").unwrap();
    let Some(Expr { terms: zego_core::ExprTerms::Term(term), .. }) = body.first() else {
        panic!("expected a single term");
    };
    let Value::Call(terms) = &term.value else {
        panic!("expected a call");
    };
    let positions: Vec<String> = terms
        .iter()
        .map(|t| {
            let loc = t.location.as_ref().unwrap();
            format!("{} @{}:{}", t, loc.line, loc.column)
        })
        .collect();
    insta::assert_snapshot!(positions.join("\n"), @r"
    equal @1:3
    a @1:1
    input.b @2:3
    ");
}

#[test]
fn package_locations() {
    let Statement::Package(package) = parse_statement("package foo.bar").unwrap() else {
        panic!("expected package");
    };
    insta::assert_snapshot!(package, @"package foo.bar");
    assert_eq!(package.path, vec![Term::string("foo"), Term::string("bar")]);

    let loc = package.location.as_ref().unwrap();
    assert_eq!((loc.line, loc.column), (1, 1));
    let columns: Vec<u32> = package
        .path
        .iter()
        .map(|t| t.location.as_ref().unwrap().column)
        .collect();
    assert_eq!(columns, vec![9, 12]);

    let Statement::Package(spaced) = parse_statement(r#"package foo["bar bizz"]"#).unwrap() else {
        panic!("expected package");
    };
    assert_eq!(spaced.path[1].location.as_ref().unwrap().column, 13);
    insta::assert_snapshot!(spaced, @r#"package foo["bar bizz"]"#);
}

#[test]
fn rule_with_declaration_body() {
    let parsed = rule(indoc! {r#"
        test := "abc" {
            b := true
        }
    "#});
    let expected = Rule::new(
        "test",
        Some(Term::string("abc")),
        Body::new([Expr::declaration(
            Term::op(Operator::Declare),
            Term::var("b"),
            Term::boolean(true),
        )]),
    );
    assert_eq!(parsed, expected);
    insta::assert_snapshot!(parsed, @r#"test := "abc" { declare(b, true) }"#);
}

#[test]
fn constant_rule() {
    let parsed = rule("test := false");
    assert_eq!(parsed, Rule::new("test", Some(Term::boolean(false)), Body::default()));
    assert!(parsed.module.is_none());
}

#[test]
fn rule_with_reference_body() {
    let parsed = rule(indoc! {r#"
        test := input["a"] {
            input.b[ 1 ] == 12.34
        }
    "#});
    insta::assert_snapshot!(parsed, @"test := input.a { equal(input.b[1], 12.34) }");
}

#[test]
fn rule_with_call_body() {
    let parsed = rule(indoc! {r#"
        test := "abc" {
            b := a.b( 1 )
        }
    "#});
    insta::assert_snapshot!(parsed, @r#"test := "abc" { declare(b, a.b(1)) }"#);
}

#[test]
fn rule_body_indices() {
    let parsed = rule(indoc! {r#"
        allow := true {
            input.user == "admin"   # checked first
            x := input.n + 1
            x > 2
        }
    "#});
    let indices: Vec<usize> = parsed.body.iter().map(|e| e.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    insta::assert_snapshot!(
        parsed.body,
        @r#"equal(input.user, "admin"); declare(x, add(input.n, 1)); gt(x, 2)"#
    );
}

#[test]
fn statements_skip_comments() {
    let statements = parse_statements(
        "policy.zego",
        indoc! {"
            # header
            package a.b # trailing

            allow := true
        "},
    )
    .unwrap();
    let rendered: Vec<String> = statements.iter().map(|s| s.to_string()).collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    package a.b
    allow := true
    ");
    let file = statements[1].location().unwrap().file.as_deref();
    assert_eq!(file, Some("policy.zego"));
}

#[test]
fn missing_declare_operator() {
    insta::assert_snapshot!(error("package foo\nfoo\n"), @"1 error occurred: 3:1: rules must use `:=` operator");

    let err = parse_statements("policy.zego", "package foo\nfoo = 1\n").unwrap_err();
    insta::assert_snapshot!(err, @"1 error occurred: policy.zego:2: rules must use `:=` operator");
}

#[test]
fn syntax_errors() {
    insta::assert_snapshot!(error("a := "), @"1 error occurred: 1:6: unexpected eof token");
    insta::assert_snapshot!(error("a := {"), @"1 error occurred: 1:6: unexpected `{` token");
    insta::assert_snapshot!(error("a := 1 {}"), @"1 error occurred: 1:9: found empty body");
    insta::assert_snapshot!(error("a := (1 2)"), @"1 error occurred: 1:9: non-terminated expression");
    insta::assert_snapshot!(error("a := f(1 2)"), @r#"1 error occurred: 1:10: expected "," or ")""#);
    insta::assert_snapshot!(error("a := x[1 2]"), @"1 error occurred: 1:10: expected ]");
    insta::assert_snapshot!(error("a := import"), @"1 error occurred: 1:6: unexpected import keyword");
    insta::assert_snapshot!(error("1"), @"1 error occurred: 1:1: unexpected number token");
    insta::assert_snapshot!(error("package 1"), @"1 error occurred: 1:9: expected identifier");
    insta::assert_snapshot!(error("package foo[1]"), @"1 error occurred: 1:13: invalid package path: 1");
}

#[test]
fn literal_errors() {
    insta::assert_snapshot!(error(r#"a := "\q""#), @r#"1 error occurred: 1:6: illegal string literal: "\q""#);
    insta::assert_snapshot!(error("a := 1e"), @"1 error occurred: 1:6: expected number");
    insta::assert_snapshot!(error("a := 1e100001"), @"1 error occurred: 1:6: number too big");
}

#[test]
fn lexer_errors_surface_verbatim() {
    insta::assert_snapshot!(error("a := (1 + 2"), @"1 error occurred: 1:12: unexpected EOF");
    insta::assert_snapshot!(error("a := x ]"), @"1 error occurred: 1:8: unexpected right bracket U+005D ']'");
    insta::assert_snapshot!(error("a := x@"), @"1 error occurred: 1:6: bad character U+0040 '@'");
}

#[test]
fn parsing_stops_at_first_error() {
    let err = parse_statements("", "a := (1 2)\nb := (3 4)\n").unwrap_err();
    let crate::Error::Parse(diagnostics) = err else {
        panic!("expected parse error");
    };
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn recursion_limit() {
    let options = ParseOptions::default().with_recursion_limit(8);
    assert!(options.parse_query("((((((a))))))").is_ok());

    let err = options.parse_query("((((((((((a))))))))))").unwrap_err();
    assert!(err.to_string().contains("recursion limit exceeded"), "{err}");
    assert_eq!(ParseOptions::default().recursion_limit(), super::MAX_DEPTH);
}
