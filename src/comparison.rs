use std::cmp::Ordering;
use std::ops::Range;

use tracing::trace;

use crate::errors::{Result, ValidationError};
use crate::parser::Cursor;
use crate::value::{coerce_operand, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Comparator {
    fn holds(self, ord: Ordering) -> bool {
        match self {
            Comparator::Eq => ord.is_eq(),
            Comparator::Ne => ord.is_ne(),
            Comparator::Lt => ord.is_lt(),
            Comparator::Lte => ord.is_le(),
            Comparator::Gt => ord.is_gt(),
            Comparator::Gte => ord.is_ge(),
        }
    }
}

/// Evaluate one term of a flat expression: either a lone boolean operand or
/// `operand <comparator> operand`.
pub fn eval_term(term: &str) -> Result<bool> {
    let Some((op, span)) = find_comparator(term)? else {
        let token = term.trim();
        if token.is_empty() {
            return Err(ValidationError::EmptyExpression);
        }
        return match coerce_operand(token)? {
            Value::Bool(b) => Ok(b),
            other => Err(ValidationError::ExpressionMustBeBoolean {
                found: other.kind(),
            }),
        };
    };

    // A missing right side is reported before anything about the left side.
    let right = term[span.end..].trim();
    if right.is_empty() {
        return Err(ValidationError::MissingRightOperand);
    }
    let left = term[..span.start].trim();
    if left.is_empty() {
        return Err(ValidationError::MissingLeftOperand);
    }
    let left = coerce_operand(left)?;
    let right = coerce_operand(right)?;

    trace!(?left, ?op, ?right, "comparing operands");
    match op {
        Comparator::Eq => Ok(loose_eq(&left, &right)),
        Comparator::Ne => Ok(!loose_eq(&left, &right)),
        _ => cmp_values(&left, &right, |ord| op.holds(ord)),
    }
}

/// Locate the single comparator of a term, skipping quoted text.
fn find_comparator(term: &str) -> Result<Option<(Comparator, Range<usize>)>> {
    let mut cursor = Cursor::new(term);
    let mut found = None;
    while let Some((at, c)) = cursor.next_unquoted()? {
        let op = match c {
            '=' if cursor.consume_char('=') => Comparator::Eq,
            '!' if cursor.consume_char('=') => Comparator::Ne,
            '=' | '!' => return Err(ValidationError::InvalidComparatorSyntax),
            '<' if cursor.consume_char('=') => Comparator::Lte,
            '<' => Comparator::Lt,
            '>' if cursor.consume_char('=') => Comparator::Gte,
            '>' => Comparator::Gt,
            _ => continue,
        };
        if found.is_some() {
            return Err(ValidationError::MultipleComparators);
        }
        found = Some((op, at..cursor.pos()));
    }
    Ok(found)
}

/// Equality with loose cross-type rules: a boolean meets the other operand's
/// truthiness, every other mismatch of types is unequal.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Bool(x), other) | (other, Value::Bool(x)) => *x == other.truthy(),
        (Value::Null, Value::Null) => true,
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        _ => false,
    }
}

/// Ordering comparison; only number/number and string/string pairs are ordered.
pub fn cmp_values<F>(a: &Value, b: &Value, pred_on_ord: F) -> Result<bool>
where
    F: Fn(Ordering) -> bool,
{
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => Ok(pred_on_ord(x.total_cmp(y))),
        (Value::Str(x), Value::Str(y)) => Ok(pred_on_ord(x.as_bytes().cmp(y.as_bytes()))),
        _ => Err(ValidationError::IncomparableTypes {
            left: a.kind(),
            right: b.kind(),
        }),
    }
}
