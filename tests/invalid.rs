use permission_expr::{ExpressionPool, ValidationError, ValueKind};
use pretty_assertions::assert_eq;

// Every rejected expression must deny, and report the first error found.
#[test]
fn test_invalid_expressions_deny() {
    let pool = ExpressionPool::new();
    let cases: Vec<(&str, ValidationError)> = vec![
        ("true)", ValidationError::UnbalancedParentheses),
        ("((true)", ValidationError::UnbalancedParentheses),
        ("('a' == 'a'", ValidationError::UnbalancedParentheses),
        ("\"open == 'x'", ValidationError::UnbalancedQuotes),
        ("'a' == 'a' \\", ValidationError::DanglingEscape),
        ("true & true", ValidationError::MalformedLogicalOperator),
        ("false | true", ValidationError::MalformedLogicalOperator),
        ("true || false && true", ValidationError::MixedLogicalOperators),
        ("1 == 1 != 0", ValidationError::MultipleComparators),
        ("1 =< 2", ValidationError::InvalidComparatorSyntax),
        ("!false", ValidationError::InvalidComparatorSyntax),
        ("1 >=", ValidationError::MissingRightOperand),
        ("< 1", ValidationError::MissingLeftOperand),
        ("x ==", ValidationError::MissingRightOperand),
        ("==", ValidationError::MissingRightOperand),
        ("true && ' x' !=", ValidationError::MissingRightOperand),
        ("", ValidationError::EmptyExpression),
        ("   ", ValidationError::EmptyExpression),
        ("admin == 'admin'", ValidationError::UnquotedStringLiteral { token: "admin".into() }),
        ("'a'b == 'a'", ValidationError::UnquotedStringLiteral { token: "'a'b".into() }),
        ("1", ValidationError::ExpressionMustBeBoolean { found: ValueKind::Number }),
        ("null", ValidationError::ExpressionMustBeBoolean { found: ValueKind::Null }),
        ("null < 1", ValidationError::IncomparableTypes { left: ValueKind::Null, right: ValueKind::Number }),
    ];
    for (expr, expected) in cases {
        let handle = pool.get(expr);
        assert_eq!(handle.is_valid(), Err(expected), "{expr:?}");
        assert!(!handle.has_permission(), "{expr:?} must deny");
    }
}

#[test]
fn test_error_inside_group_reaches_the_top() {
    let pool = ExpressionPool::new();
    assert_eq!(
        pool.get("true || (false && maybe)").is_valid(),
        Err(ValidationError::UnquotedStringLiteral { token: "maybe".into() })
    );
    assert_eq!(
        pool.get("(1 == 1) && ((2 > 1) || (3 & 4))").is_valid(),
        Err(ValidationError::MalformedLogicalOperator)
    );
}

#[test]
fn test_deep_nesting_is_bounded() {
    let pool = ExpressionPool::new();
    let depth = pool.config().max_nesting_depth;
    let ok = format!("{}true{}", "(".repeat(depth), ")".repeat(depth));
    assert!(pool.get(&ok).has_permission());
    let deep = format!("{}true{}", "(".repeat(depth + 1), ")".repeat(depth + 1));
    assert_eq!(
        pool.get(&deep).is_valid(),
        Err(ValidationError::NestingTooDeep { limit: depth })
    );
    assert!(!pool.get(&deep).has_permission());
}
