use std::ops::Range;

use crate::errors::{Result, ValidationError};
use crate::parser::Cursor;

/// A top-level `( ... )` group, by byte span (parentheses included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub span: Range<usize>,
}

impl Fragment {
    /// The text between the parentheses, nested groups left verbatim.
    pub fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.span.start + 1..self.span.end - 1]
    }
}

/// Validate quote, escape and parenthesis structure in one pass and collect the
/// outermost parenthesized groups in order of appearance.
pub fn scan(text: &str, max_depth: usize) -> Result<Vec<Fragment>> {
    let mut cursor = Cursor::new(text);
    let mut fragments = Vec::new();
    let mut depth = 0usize;
    let mut open_at = 0usize;

    while let Some((at, c)) = cursor.next_unquoted()? {
        match c {
            '(' => {
                if depth == 0 {
                    open_at = at;
                }
                depth += 1;
                if depth > max_depth {
                    return Err(ValidationError::NestingTooDeep { limit: max_depth });
                }
            }
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ValidationError::UnbalancedParentheses)?;
                if depth == 0 {
                    fragments.push(Fragment {
                        span: open_at..at + 1,
                    });
                }
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(ValidationError::UnbalancedParentheses);
    }
    Ok(fragments)
}
