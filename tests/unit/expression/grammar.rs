use super::*;

fn rules(text: &str) -> Vec<Rule> {
    parse_record(text)
        .unwrap()
        .into_inner()
        .map(|p| p.as_rule())
        .collect()
}

#[test]
fn record_children_follow_expressions() {
    assert_eq!(rules(""), vec![Rule::EOI]);
    assert_eq!(rules("  \n"), vec![Rule::EOI]);
    assert_eq!(rules(" x "), vec![Rule::identifier, Rule::EOI]);
    assert_eq!(
        rules("(+ x 1)"),
        vec![Rule::composite, Rule::EOI]
    );
    assert_eq!(
        rules("a 'b' 3"),
        vec![
            Rule::identifier,
            Rule::string_literal,
            Rule::numeric_literal,
            Rule::EOI
        ]
    );
}

#[test]
fn composite_exposes_keyword_then_fields() {
    let record = parse_record("( <= a -1.5 )").unwrap();
    let composite = record.into_inner().next().unwrap();
    let parts: Vec<_> = composite
        .into_inner()
        .map(|p| (p.as_rule(), p.as_str().to_owned()))
        .collect();
    assert_eq!(
        parts,
        vec![
            (Rule::node_type, "<=".to_owned()),
            (Rule::identifier, "a".to_owned()),
            (Rule::numeric_literal, "-1.5".to_owned()),
        ]
    );
}

#[test]
fn strings_may_contain_parens_and_escaped_quotes() {
    let record = parse_record(r"(call f 'a)\'(' x)").unwrap();
    let composite = record.into_inner().next().unwrap();
    let lit = composite.into_inner().nth(2).unwrap();
    assert_eq!(lit.as_rule(), Rule::string_literal);
    assert_eq!(lit.as_str(), r"'a)\'('");
}

#[test]
fn malformed_inputs_are_rejected() {
    for bad in [
        "(",
        ")",
        "(+ x 1",
        "(+ x 1))",
        "()",
        "(list 'abc)",
        "(list 1x)",
        "(list #)",
        "_x",
        "-x",
        "1.2.3",
    ] {
        let err = parse_record(bad).unwrap_err();
        assert!(
            matches!(err, AstError::MalformedText(_)),
            "{bad:?} gave {err:?}"
        );
    }
}

#[test]
fn malformed_message_carries_position() {
    let err = parse_record("(list 1 @)").unwrap_err();
    assert!(err.to_string().contains("1:"), "{err}");
}

#[test]
fn nesting_depth_skips_strings() {
    assert_eq!(nesting_depth(""), 0);
    assert_eq!(nesting_depth("x"), 0);
    assert_eq!(nesting_depth("(a (b (c)) (d))"), 3);
    assert_eq!(nesting_depth("(f '(((' \"(\\\"(\")"), 1);
}
