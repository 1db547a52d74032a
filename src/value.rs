use std::fmt;

use serde::Serialize;

use crate::errors::{Result, ValidationError};

/// A typed operand. Only ever built from a validated literal token.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Null,
    Number(f64),
    Str(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Bool,
    Null,
    Number,
    Str,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Bool => "boolean",
            ValueKind::Null => "null",
            ValueKind::Number => "number",
            ValueKind::Str => "string",
        })
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Bool(_) => ValueKind::Bool,
            Value::Null => ValueKind::Null,
            Value::Number(_) => ValueKind::Number,
            Value::Str(_) => ValueKind::Str,
        }
    }

    /// Truthiness used when a value meets a boolean in an equality test.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Null => false,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
        }
    }
}

/// Validate a trimmed operand token and turn it into a [`Value`].
pub fn coerce_operand(token: &str) -> Result<Value> {
    if token.eq_ignore_ascii_case("true") {
        return Ok(Value::Bool(true));
    }
    if token.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(false));
    }
    if token.eq_ignore_ascii_case("null") {
        return Ok(Value::Null);
    }
    if is_integer_literal(token) {
        return token
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| ValidationError::UnquotedStringLiteral {
                token: token.to_string(),
            });
    }
    match token.chars().next() {
        Some(quote @ ('\'' | '"')) => parse_quoted(token, quote).map(Value::Str),
        _ => Err(ValidationError::UnquotedStringLiteral {
            token: token.to_string(),
        }),
    }
}

/// Digits only, and no leading zero unless the literal is `0` itself.
fn is_integer_literal(token: &str) -> bool {
    !token.is_empty()
        && token.bytes().all(|b| b.is_ascii_digit())
        && (token == "0" || !token.starts_with('0'))
}

/// The closing quote must be the first unescaped `quote` after the opening one
/// and must end the token; anything else is not a string literal at all.
fn parse_quoted(token: &str, quote: char) -> Result<String> {
    let rejected = || ValidationError::UnquotedStringLiteral {
        token: token.to_string(),
    };
    let mut out = String::with_capacity(token.len());
    let mut chars = token[quote.len_utf8()..].chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(nc @ ('\\' | '\'' | '"')) => out.push(nc),
                Some(nc) => {
                    out.push('\\');
                    out.push(nc);
                }
                None => return Err(rejected()),
            }
            continue;
        }
        if c == quote {
            return if chars.next().is_none() {
                Ok(out)
            } else {
                Err(rejected())
            };
        }
        out.push(c);
    }
    Err(rejected())
}
