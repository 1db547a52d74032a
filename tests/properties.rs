use permission_expr::ExpressionPool;
use proptest::prelude::*;

/// A term together with the boolean it must evaluate to.
fn term() -> impl Strategy<Value = (String, bool)> {
    let ops = prop::sample::select(vec!["==", "!=", "<", "<=", ">", ">="]);
    prop_oneof![
        any::<bool>().prop_map(|b| (b.to_string(), b)),
        (0u32..1000, ops, 0u32..1000).prop_map(|(a, op, b)| {
            let expected = match op {
                "==" => a == b,
                "!=" => a != b,
                "<" => a < b,
                "<=" => a <= b,
                ">" => a > b,
                _ => a >= b,
            };
            (format!("{a} {op} {b}"), expected)
        }),
        ("[a-c]{0,3}", "[a-c]{0,3}").prop_map(|(a, b)| {
            let expected = a == b;
            (format!("'{a}' == \"{b}\""), expected)
        }),
    ]
}

fn chain() -> impl Strategy<Value = (Vec<(String, bool)>, bool)> {
    (prop::collection::vec(term(), 1..6), any::<bool>())
}

fn join(terms: &[(String, bool)], and: bool) -> String {
    let op = if and { " && " } else { " || " };
    terms.iter().map(|(t, _)| t.as_str()).collect::<Vec<_>>().join(op)
}

fn fold(terms: &[(String, bool)], and: bool) -> bool {
    if and {
        terms.iter().all(|(_, b)| *b)
    } else {
        terms.iter().any(|(_, b)| *b)
    }
}

proptest! {
    #[test]
    fn chains_fold_with_their_operator((terms, and) in chain()) {
        let pool = ExpressionPool::new();
        let handle = pool.get(&join(&terms, and));
        prop_assert_eq!(handle.is_valid(), Ok(()));
        prop_assert_eq!(handle.has_permission(), fold(&terms, and));
    }

    #[test]
    fn grouping_does_not_change_the_verdict((terms, and) in chain()) {
        let pool = ExpressionPool::new();
        let expr = join(&terms, and);
        let wrapped = format!("({expr})");
        prop_assert_eq!(pool.get(&wrapped).has_permission(), pool.get(&expr).has_permission());
        prop_assert_eq!(pool.get(&wrapped).is_valid(), Ok(()));
    }

    #[test]
    fn same_operator_chains_are_associative((terms, and) in chain()) {
        prop_assume!(terms.len() >= 3);
        let pool = ExpressionPool::new();
        let op = if and { " && " } else { " || " };
        let left = format!("({}){op}{}", join(&terms[..2], and), join(&terms[2..], and));
        let right = format!("{}{op}({})", join(&terms[..1], and), join(&terms[1..], and));
        let flat = pool.get(&join(&terms, and)).has_permission();
        prop_assert_eq!(pool.get(&left).has_permission(), flat);
        prop_assert_eq!(pool.get(&right).has_permission(), flat);
    }

    #[test]
    fn invalid_expressions_always_deny(expr in r#"[()'"&|=!<> a-z0-9\\]{0,24}"#) {
        let pool = ExpressionPool::new();
        let handle = pool.get(&expr);
        if handle.is_valid().is_err() {
            prop_assert!(!handle.has_permission());
        }
    }

    #[test]
    fn verdicts_are_stable_across_calls_and_pools(expr in r#"[()'"&|=<> tfrueals0-9]{0,24}"#) {
        let first = ExpressionPool::new();
        let second = ExpressionPool::new();
        let a = first.get(&expr);
        let before = (a.is_valid(), a.has_permission());
        prop_assert_eq!((a.is_valid(), a.has_permission()), before.clone());
        let b = second.get(&expr);
        prop_assert_eq!((b.is_valid(), b.has_permission()), before);
    }
}
