use super::*;

#[test]
fn display_messages_are_stable() {
    assert!(
        AstError::malformed_text("x")
            .to_string()
            .contains("malformed text:")
    );
    assert_eq!(
        AstError::MalformedRecord(3).to_string(),
        "a record must contain zero or one expressions; found 3"
    );
    assert_eq!(
        AstError::unknown_operator("frobnicate").to_string(),
        "unknown composite node type: frobnicate"
    );
    assert_eq!(
        AstError::arity("attr", Arity::Exactly(2), 1).to_string(),
        "attr node must have exactly 2 field(s); found 1"
    );
    assert_eq!(
        AstError::arity("call", Arity::AtLeast(1), 0).to_string(),
        "call node must have at least 1 field(s); found 0"
    );
    assert!(
        AstError::NestingTooDeep { limit: 8 }
            .to_string()
            .contains("limit of 8")
    );
}

#[test]
fn arity_accepts_counts() {
    assert!(Arity::Exactly(2).accepts(2));
    assert!(!Arity::Exactly(2).accepts(3));
    assert!(Arity::AtLeast(1).accepts(1));
    assert!(Arity::AtLeast(1).accepts(7));
    assert!(!Arity::AtLeast(1).accepts(0));
}

#[test]
fn arity_check_names_the_node() {
    assert_eq!(Arity::Exactly(2).check("attr", 2), Ok(()));
    assert_eq!(
        Arity::AtLeast(1).check("call", 0),
        Err(AstError::arity("call", Arity::AtLeast(1), 0))
    );
}

#[test]
fn kind_ignores_payload() {
    assert_eq!(
        AstError::type_mismatch("a").kind(),
        AstError::type_mismatch("b").kind()
    );
    assert_eq!(
        AstError::UnsupportedNodeType("Empty".to_owned()).kind(),
        ErrorKind::UnsupportedNodeType
    );
}
