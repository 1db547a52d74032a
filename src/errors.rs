use serde::Serialize; // Error kinds are reported as tagged JSON objects
use thiserror::Error; // Import the `Error` derive macro from the `thiserror` crate

use crate::value::ValueKind;

/// Why a permission expression was rejected.
///
/// Errors are reported by the layer that first observes them and travel
/// outward unchanged, including across nested parentheses.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationError {
    // A `)` with nothing open, or a `(` never closed
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    // A quote still open at the end of the text
    #[error("unbalanced quotes")]
    UnbalancedQuotes,

    // A backslash as the last character
    #[error("escape character at end of expression")]
    DanglingEscape,

    // A lone `&` or `|`
    #[error("malformed logical operator")]
    MalformedLogicalOperator,

    // `&&` and `||` at the same nesting level
    #[error("mixed logical operators without parentheses")]
    MixedLogicalOperators,

    #[error("more than one comparison operator in a term")]
    MultipleComparators,

    // A lone `!` or `=`
    #[error("invalid comparison operator")]
    InvalidComparatorSyntax,

    #[error("comparison is missing its left operand")]
    MissingLeftOperand,

    #[error("comparison is missing its right operand")]
    MissingRightOperand,

    // Blank text, or a blank term between logical operators
    #[error("empty expression")]
    EmptyExpression,

    // Any operand that is not a keyword, an integer or one well-formed quoted string
    #[error("unquoted string literal `{token}`")]
    UnquotedStringLiteral { token: String },

    #[error("expression must be boolean, found {found}")]
    ExpressionMustBeBoolean { found: ValueKind },

    // Ordering is only defined for number/number and string/string
    #[error("cannot order {left} against {right}")]
    IncomparableTypes { left: ValueKind, right: ValueKind },

    #[error("parentheses nested deeper than {limit}")]
    NestingTooDeep { limit: usize },
}

// Type alias for results that use `ValidationError` as the error type
pub type Result<T> = std::result::Result<T, ValidationError>;
