//! Permission expressions: small boolean formulas over literals such as
//! `(1 < 2) && ('ko' == 'ko')`, evaluated fail-closed.
//!
//! Every expression is pooled by its trimmed text and evaluated once. An
//! expression that does not validate never grants access.

pub mod config;
pub mod engine;
pub mod errors;
pub mod value;
mod comparison;
mod logical;
mod parser;
mod scanner;

pub use comparison::loose_eq;
pub use config::EngineConfig;
pub use engine::{ExpressionHandle, ExpressionPool, Report};
pub use errors::{Result, ValidationError};
pub use value::{Value, ValueKind};

/// Convenience: pooled handle from the process-wide pool.
pub fn get(expression: &str) -> ExpressionHandle<'static> {
    ExpressionPool::global().get(expression)
}

/// Convenience: validity of `expression` in the process-wide pool.
pub fn is_valid(expression: &str) -> Result<()> {
    get(expression).is_valid()
}

/// Convenience: fail-closed verdict of `expression` in the process-wide pool.
pub fn has_permission(expression: &str) -> bool {
    get(expression).has_permission()
}
