use itertools::process_results;

use crate::comparison::eval_term;
use crate::errors::{Result, ValidationError};
use crate::parser::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicMode {
    And,
    Or,
}

impl LogicMode {
    fn identity(self) -> bool {
        matches!(self, LogicMode::And)
    }

    fn apply(self, acc: bool, term: bool) -> bool {
        match self {
            LogicMode::And => acc && term,
            LogicMode::Or => acc || term,
        }
    }
}

/// Evaluate a parenthesis-free expression.
///
/// The first `&&` or `||` fixes the logic mode for the whole string; the other
/// operator may not appear at this level. Operators are checked across the
/// whole string before any term is evaluated, then every term is evaluated so
/// that an invalid term is reported even when the result is already decided.
pub fn eval_flat(flat: &str) -> Result<bool> {
    let (mode, terms) = split_terms(flat)?;
    let mode = mode.unwrap_or(LogicMode::And);
    process_results(terms.into_iter().map(eval_term), |it| {
        it.fold(mode.identity(), |acc, term| mode.apply(acc, term))
    })
}

fn split_terms(flat: &str) -> Result<(Option<LogicMode>, Vec<&str>)> {
    let mut cursor = Cursor::new(flat);
    let mut mode: Option<LogicMode> = None;
    let mut terms = Vec::new();
    let mut start = 0;

    while let Some((at, c)) = cursor.next_unquoted()? {
        let found = match c {
            '&' => LogicMode::And,
            '|' => LogicMode::Or,
            _ => continue,
        };
        if !cursor.consume_char(c) {
            return Err(ValidationError::MalformedLogicalOperator);
        }
        match mode {
            Some(current) if current != found => {
                return Err(ValidationError::MixedLogicalOperators);
            }
            _ => mode = Some(found),
        }
        terms.push(&flat[start..at]);
        start = cursor.pos();
    }
    terms.push(&flat[start..]);
    Ok((mode, terms))
}
