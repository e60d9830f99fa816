use super::*;

#[test]
fn kind_names_are_stable() {
    assert_eq!(Node::Empty.kind(), "Empty");
    assert_eq!(Node::int(1).kind(), "Literal");
    assert_eq!(Node::lambda(["x"], Node::ident("x")).kind(), "Lambda");
    assert_eq!(
        Node::select(Node::ident("xs"), Lambda::new(["x"], Node::ident("x"))).kind(),
        "Select"
    );
}

#[test]
fn constructors_box_children() {
    let n = Node::bin_op(BinaryOperator::Add, Node::ident("x"), Node::int(1));
    assert_eq!(
        n,
        Node::BinOp {
            op: BinaryOperator::Add,
            left: Box::new(Node::Identifier("x".to_owned())),
            right: Box::new(Node::Literal(Literal::Int(1))),
        }
    );
}

#[test]
fn json_shape_is_tagged_by_kind() {
    let n = Node::call(Node::ident("f"), [Node::str("a"), Node::null()]);
    let v = serde_json::to_value(&n).unwrap();
    assert_eq!(
        v,
        serde_json::json!({
            "call": {
                "callee": { "identifier": "f" },
                "args": [ { "literal": "a" }, { "literal": null } ]
            }
        })
    );
}

#[test]
fn json_literals_keep_int_float_distinction() {
    let n: Node = serde_json::from_str(r#"{"list": [{"literal": 1}, {"literal": 1.5}, {"literal": true}]}"#)
        .unwrap();
    assert_eq!(
        n,
        Node::list([Node::int(1), Node::float(1.5), Node::bool(true)])
    );
}

#[test]
fn json_integers_beyond_i64_are_rejected() {
    let n: Node = serde_json::from_str(r#"{"literal": 9223372036854775807}"#).unwrap();
    assert_eq!(n, Node::int(i64::MAX));
    let n: Node = serde_json::from_str(r#"{"literal": -9223372036854775808}"#).unwrap();
    assert_eq!(n, Node::int(i64::MIN));

    let err = serde_json::from_str::<Node>(r#"{"literal": 9223372036854775808}"#).unwrap_err();
    assert!(err.to_string().contains("64-bit signed range"), "{err}");
}

#[test]
fn json_round_trips_nested_trees() {
    let n = Node::select(
        Node::attr(Node::ident("event"), "jets"),
        Lambda::new(
            ["j"],
            Node::bool_op(
                BoolOperator::And,
                [
                    Node::compare(CompareOperator::Gt, Node::ident("j"), Node::float(-2.5)),
                    Node::not(Node::ident("flag")),
                ],
            ),
        ),
    );
    let s = serde_json::to_string(&n).unwrap();
    let back: Node = serde_json::from_str(&s).unwrap();
    assert_eq!(back, n);
}
