use super::*;
use crate::expression::ops::{BinaryOperator, BoolOperator, CompareOperator};
use crate::foundation::error::ErrorKind;

fn s(node: &Node) -> String {
    serialize(node).unwrap()
}

#[test]
fn empty_node_is_empty_record() {
    assert_eq!(s(&Node::Empty), "");
}

#[test]
fn binop_example() {
    assert_eq!(
        s(&Node::bin_op(BinaryOperator::Add, Node::ident("x"), Node::int(1))),
        "(+ x 1)"
    );
}

#[test]
fn call_example() {
    assert_eq!(
        s(&Node::call(Node::ident("f"), [Node::str("a"), Node::ident("y")])),
        "(call f 'a' y)"
    );
    assert_eq!(s(&Node::call(Node::ident("f"), [])), "(call f)");
}

#[test]
fn atoms() {
    assert_eq!(s(&Node::ident("jets")), "jets");
    assert_eq!(s(&Node::int(-5)), "-5");
    assert_eq!(s(&Node::float(2.0)), "2.0");
    assert_eq!(s(&Node::bool(false)), "False");
    assert_eq!(s(&Node::null()), "None");
    assert_eq!(s(&Node::str("it's")), "\"it's\"");
}

#[test]
fn structural_nodes() {
    assert_eq!(s(&Node::list([])), "(list)");
    assert_eq!(
        s(&Node::list([Node::int(1), Node::list([Node::int(2)])])),
        "(list 1 (list 2))"
    );
    assert_eq!(
        s(&Node::attr(Node::ident("e"), "Jets")),
        "(attr e 'Jets')"
    );
    assert_eq!(s(&Node::not(Node::ident("a"))), "(not a)");
    assert_eq!(
        s(&Node::compare(CompareOperator::LtE, Node::ident("a"), Node::float(0.5))),
        "(<= a 0.5)"
    );
}

#[test]
fn lambda_and_select() {
    let body = Node::compare(CompareOperator::Gt, Node::ident("x"), Node::int(0));
    assert_eq!(
        s(&Node::lambda(["x", "y"], Node::ident("x"))),
        "(lambda (list x y) x)"
    );
    assert_eq!(
        s(&Node::select(Node::ident("xs"), Lambda::new(["x"], body))),
        "(Select xs (lambda (list x) (> x 0)))"
    );
}

#[test]
fn bool_ops_fold_left() {
    let (a, b, c, d) = (
        Node::ident("a"),
        Node::ident("b"),
        Node::ident("c"),
        Node::ident("d"),
    );
    assert_eq!(
        s(&Node::bool_op(BoolOperator::Or, [a.clone(), b.clone()])),
        "(or a b)"
    );
    assert_eq!(
        s(&Node::bool_op(BoolOperator::And, [a.clone(), b.clone(), c.clone()])),
        "(and (and a b) c)"
    );
    assert_eq!(
        s(&Node::bool_op(BoolOperator::And, [a, b, c, d])),
        "(and (and (and a b) c) d)"
    );
}

#[test]
fn bool_ops_need_two_operands() {
    let err = serialize(&Node::bool_op(BoolOperator::And, [Node::ident("a")])).unwrap_err();
    assert_eq!(err, AstError::arity("and", Arity::AtLeast(2), 1));
    let err = serialize(&Node::bool_op(BoolOperator::Or, [])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArityMismatch);
}

#[test]
fn nested_empty_is_unsupported() {
    let err = serialize(&Node::list([Node::Empty])).unwrap_err();
    assert_eq!(err, AstError::UnsupportedNodeType("Empty".to_owned()));
}

#[test]
fn identifiers_are_validated() {
    for bad in ["", "a b", "1x", "True", "None"] {
        let err = serialize(&Node::ident(bad)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidIdentifier, "{bad:?}");
    }
    let err = serialize(&Node::lambda(["ok", "not ok"], Node::int(1))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidIdentifier);
}

#[test]
fn select_selector_needs_one_param() {
    let sel = Lambda::new(["a", "b"], Node::ident("a"));
    let err = serialize(&Node::select(Node::ident("xs"), sel)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
}

#[test]
fn non_finite_float_is_unrepresentable() {
    let err = serialize(&Node::list([Node::float(f64::NEG_INFINITY)])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnrepresentableLiteral);
}

#[test]
fn depth_limit_counts_emitted_parens() {
    let mut n = Node::ident("x");
    for _ in 0..5 {
        n = Node::not(n);
    }
    assert!(serialize_with(&n, &CodecOptions::with_max_depth(5)).is_ok());
    assert_eq!(
        serialize_with(&n, &CodecOptions::with_max_depth(4)).unwrap_err(),
        AstError::NestingTooDeep { limit: 4 }
    );

    let chain = Node::bool_op(
        BoolOperator::And,
        ["a", "b", "c", "d"].map(Node::ident),
    );
    assert!(serialize_with(&chain, &CodecOptions::with_max_depth(3)).is_ok());
    assert!(serialize_with(&chain, &CodecOptions::with_max_depth(2)).is_err());
}
