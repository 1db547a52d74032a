use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::errors::{Result, ValidationError};
use crate::logical::eval_flat;
use crate::scanner::{scan, Fragment};

static GLOBAL_POOL: Lazy<ExpressionPool> = Lazy::new(ExpressionPool::new);

/// A pooled expression. The verdict is computed on first use and kept.
struct Expression {
    text: String,
    verdict: OnceCell<Result<bool>>,
}

/// Memoizes one [`Expression`] per distinct trimmed expression text.
///
/// Lookups only take the read lock. No lock is held while an expression is
/// evaluated, so nested groups can be resolved through the same pool.
pub struct ExpressionPool {
    config: EngineConfig,
    entries: RwLock<HashMap<String, Arc<Expression>>>,
}

impl Default for ExpressionPool {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionPool {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide pool behind the crate-level helpers.
    pub fn global() -> &'static ExpressionPool {
        &GLOBAL_POOL
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Handle for `expression` (surrounding whitespace ignored), pooling it on
    /// first request.
    pub fn get(&self, expression: &str) -> ExpressionHandle<'_> {
        let key = expression.trim();
        if let Some(expr) = self.entries.read().get(key) {
            trace!(expression = key, "expression pool hit");
            return ExpressionHandle {
                pool: self,
                expr: Arc::clone(expr),
            };
        }
        let expr = Arc::clone(
            self.entries
                .write()
                .entry(key.to_string())
                .or_insert_with(|| {
                    debug!(expression = key, "pooling new expression");
                    Arc::new(Expression {
                        text: key.to_string(),
                        verdict: OnceCell::new(),
                    })
                }),
        );
        ExpressionHandle { pool: self, expr }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every pooled expression. Outstanding handles keep working.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    fn evaluate(&self, text: &str) -> Result<bool> {
        let fragments = scan(text, self.config.max_nesting_depth)?;
        let flat = self.resolve(text, &fragments)?;
        eval_flat(&flat)
    }

    /// Replace each top-level group with the literal verdict of its contents.
    fn resolve<'a>(&self, text: &'a str, fragments: &[Fragment]) -> Result<Cow<'a, str>> {
        if fragments.is_empty() {
            return Ok(Cow::Borrowed(text));
        }
        let mut flat = String::with_capacity(text.len());
        let mut last = 0;
        for fragment in fragments {
            let granted = self.get(fragment.inner(text)).verdict()?;
            flat.push_str(&text[last..fragment.span.start]);
            flat.push_str(if granted { "true" } else { "false" });
            last = fragment.span.end;
        }
        flat.push_str(&text[last..]);
        trace!(expression = text, flat = %flat, "resolved nested groups");
        Ok(Cow::Owned(flat))
    }
}

/// A reference to a pooled expression.
#[derive(Clone)]
pub struct ExpressionHandle<'p> {
    pool: &'p ExpressionPool,
    expr: Arc<Expression>,
}

impl fmt::Debug for ExpressionHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpressionHandle")
            .field("text", &self.expr.text)
            .field("verdict", &self.expr.verdict.get())
            .finish()
    }
}

impl<'p> ExpressionHandle<'p> {
    /// The trimmed expression text this handle was pooled under.
    pub fn text(&self) -> &str {
        &self.expr.text
    }

    /// Structural and semantic validity of the expression.
    pub fn is_valid(&self) -> Result<()> {
        self.cached().as_ref().map(|_| ()).map_err(ValidationError::clone)
    }

    /// Whether the expression grants access. Invalid expressions deny.
    pub fn has_permission(&self) -> bool {
        matches!(self.cached(), Ok(true))
    }

    /// The evaluated result, or the first error that made the expression invalid.
    pub fn verdict(&self) -> Result<bool> {
        self.cached().clone()
    }

    pub fn report(&self) -> Report {
        let verdict = self.cached();
        Report {
            expression: self.expr.text.clone(),
            valid: verdict.is_ok(),
            granted: matches!(verdict, Ok(true)),
            error: verdict.as_ref().err().cloned(),
        }
    }

    fn cached(&self) -> &Result<bool> {
        self.expr.verdict.get_or_init(|| {
            let text = self.expr.text.as_str();
            let verdict = self.pool.evaluate(text);
            match &verdict {
                Ok(granted) => debug!(expression = text, granted, "evaluated expression"),
                Err(error) => debug!(expression = text, %error, "rejected expression"),
            }
            verdict
        })
    }
}

/// Diagnostic summary of one expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub expression: String,
    pub valid: bool,
    pub granted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ValidationError>,
}
