// src/parser.rs
use crate::errors::{Result, ValidationError};

/// Character cursor that knows about quoting and backslash escapes.
///
/// Every scanning pass (structure, logical operators, comparators) walks the
/// text through [`Cursor::next_unquoted`], so they all agree on what counts as
/// literal payload.
pub struct Cursor<'a> {
    s: &'a str,
    i: usize,
    quote: Option<char>,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0, quote: None }
    }

    /// Next character outside quotes and escapes, with its byte offset.
    ///
    /// Returns `Ok(None)` at the end of a well-formed input.
    pub fn next_unquoted(&mut self) -> Result<Option<(usize, char)>> {
        while let Some(c) = self.bump() {
            if c == '\\' {
                if self.bump().is_none() {
                    return Err(ValidationError::DanglingEscape);
                }
                continue;
            }
            match self.quote {
                Some(q) => {
                    if c == q {
                        self.quote = None;
                    }
                }
                None if c == '\'' || c == '"' => self.quote = Some(c),
                None => return Ok(Some((self.i - c.len_utf8(), c))),
            }
        }
        if self.quote.is_some() {
            return Err(ValidationError::UnbalancedQuotes);
        }
        Ok(None)
    }

    /// Consume `c` if it is the very next character, quoted or not.
    pub fn consume_char(&mut self, c: char) -> bool {
        if self.peek_char() == Some(c) {
            self.i += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn peek_char(&self) -> Option<char> {
        self.s[self.i..].chars().next()
    }

    /// Byte offset of the next unread character.
    pub fn pos(&self) -> usize {
        self.i
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.i += c.len_utf8();
        Some(c)
    }
}
