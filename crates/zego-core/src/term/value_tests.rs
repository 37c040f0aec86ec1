use std::cmp::Ordering;

use super::*;

fn num(literal: &str) -> Term {
    Term::number(Number::parse(literal).unwrap())
}

fn samples() -> Vec<Value> {
    vec![
        Value::Boolean(false),
        Value::Boolean(true),
        num("1").value,
        num("1.0").value,
        num("0x10").value,
        num("-2.5e1").value,
        num("0e99999").value,
        num("-0e-99999").value,
        num("1e999").value,
        num("0x1p-999").value,
        Value::String(String::new()),
        Value::String("a".into()),
        Value::String("ab".into()),
        Value::Var("a".into()),
        Value::Var("b".into()),
        Value::Ref(vec![Term::var("input")]),
        Value::Ref(vec![Term::var("input"), Term::string("a")]),
        Value::Ref(vec![Term::var("input"), Term::string("b")]),
        Value::Call(vec![Term::op(Operator::Add), Term::var("a"), num("1")]),
        Value::Call(vec![Term::op(Operator::Add), Term::var("a")]),
        Value::Op(Operator::Add),
        Value::Op(Operator::Subtract),
    ]
}

#[test]
fn ranks_order_variants() {
    let ranks: Vec<u8> = [
        Value::Boolean(true),
        num("0").value,
        Value::String("z".into()),
        Value::Var("a".into()),
        Value::Ref(vec![]),
        Value::Call(vec![]),
        Value::Op(Operator::Add),
    ]
    .iter()
    .map(Value::sort_rank)
    .collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 7]);

    assert!(Value::String("zzz".into()) < Value::Var("a".into()));
    assert!(Value::Var("zzz".into()) < Value::Ref(vec![Term::var("a")]));
    assert!(Value::Call(vec![]) < Value::Op(Operator::Add));
}

#[test]
fn compare_is_a_total_order() {
    let values = samples();
    for a in &values {
        for b in &values {
            assert_eq!(a.cmp(b), b.cmp(a).reverse(), "antisymmetry: {a} vs {b}");
            assert_eq!(a == b, a.cmp(b) == Ordering::Equal, "equality: {a} vs {b}");
            if a == b {
                assert_eq!(a.checksum(), b.checksum());
            }
            for c in &values {
                if a <= b && b <= c {
                    assert!(a <= c, "transitivity: {a} <= {b} <= {c}");
                }
            }
        }
    }
}

#[test]
fn refs_compare_element_wise_then_by_length() {
    let short = Value::Ref(vec![Term::var("a"), Term::string("b")]);
    let long = Value::Ref(vec![Term::var("a"), Term::string("b"), Term::string("c")]);
    let other = Value::Ref(vec![Term::var("a"), Term::string("c")]);
    assert!(short < long);
    assert!(long < other);
}

#[test]
fn equality_ignores_location() {
    let a = Term::var("x").at(Location::new(1, 1));
    let b = Term::var("x").at(Location::new(7, 3).with_file("other.zego"));
    assert_eq!(a, b);
    assert_eq!(a.checksum(), b.checksum());
    assert_ne!(Term::var("x"), Term::string("x"));
}

#[test]
fn checksum_is_order_sensitive() {
    let ab = Value::Ref(vec![Term::var("a"), Term::string("b")]);
    let ba = Value::Ref(vec![Term::string("b"), Term::var("a")]);
    assert_ne!(ab.checksum(), ba.checksum());

    let rebuilt = Value::Ref(vec![Term::var("a"), Term::string("b")]);
    assert_eq!(ab.checksum(), rebuilt.checksum());
    assert_ne!(Value::String("a".into()).checksum(), Value::Var("a".into()).checksum());
}

#[test]
fn render_literals() {
    insta::assert_snapshot!(Term::boolean(true), @"true");
    insta::assert_snapshot!(num("12.340"), @"12.340");
    insta::assert_snapshot!(Term::string("abc"), @r#""abc""#);
    insta::assert_snapshot!(Term::string("a\"b\\c\n"), @r#""a\"b\\c\n""#);
    insta::assert_snapshot!(Term::var("input"), @"input");
    insta::assert_snapshot!(Term::op(Operator::NotEqual), @"nEqual");
}

#[test]
fn render_refs() {
    let r = Term::reference(vec![
        Term::var("input"),
        Term::string("a"),
        Term::reference(vec![Term::var("input"), Term::string("b")]),
        num("1"),
        Term::string("bar bizz"),
        Term::string("null"),
    ]);
    insta::assert_snapshot!(r, @r#"input.a[input.b][1]["bar bizz"]["null"]"#);

    let package = Term::reference(vec![Term::string("foo"), Term::string("bar")]);
    insta::assert_snapshot!(package, @"foo.bar");
}

#[test]
fn render_calls() {
    let call = Term::call(vec![
        Term::op(Operator::Lt),
        Term::var("a"),
        Term::call(vec![Term::op(Operator::Add), Term::var("b"), num("2")]),
    ]);
    insta::assert_snapshot!(call, @"lt(a, add(b, 2))");

    let function = Term::call(vec![
        Term::reference(vec![Term::var("a"), Term::string("b")]),
        num("1"),
    ]);
    insta::assert_snapshot!(function, @"a.b(1)");
}

#[test]
fn operator_names_round_trip() {
    for op in Operator::ALL {
        assert_eq!(Operator::from_name(op.name()), Some(op));
    }
    assert_eq!(Operator::from_name("plus"), None);
}

#[test]
fn values_serialize_tagged() {
    let term = Term::reference(vec![Term::var("input"), Term::string("a"), num("1")]);
    insta::assert_snapshot!(
        serde_json::to_string(&term).unwrap(),
        @r#"{"type":"ref","value":[{"type":"var","value":"input"},{"type":"string","value":"a"},{"type":"number","value":"1"}]}"#
    );
}
