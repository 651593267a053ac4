//! Parse-leniency policy: named tolerance flags and recorded warnings.

use std::collections::HashMap;

use crate::error::GridError;

/// Leniency condition: malformed or incomplete geometry input
/// (size-mismatched COORD/ZCORN or spacing arrays, partial cartesian sets).
/// Downgrade degrades the grid to dimensions-only.
pub const GRID_GEOMETRY: &str = "grid-geometry";

/// Leniency condition: a data keyword carried more values than its target
/// region holds. Downgrade ignores the excess values.
pub const EXTRA_DATA: &str = "extra-data";

/// What to do when a flagged condition occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Fail the construction with the underlying error (default).
    Error,
    /// Record a warning and apply the documented fallback.
    Warn,
    /// Apply the fallback silently.
    Ignore,
}

/// Per-condition leniency policy plus the warnings accumulated while
/// building from a deck. Construction code consults it through
/// [`ParseContext::handle`]; everything not explicitly downgraded stays
/// fatal.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    actions: HashMap<String, Action>,
    warnings: Vec<String>,
}

impl ParseContext {
    /// Strict context: every condition is fatal.
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient context: every known condition downgrades to a warning.
    pub fn lenient() -> Self {
        let mut ctx = Self::default();
        ctx.set(GRID_GEOMETRY, Action::Warn);
        ctx.set(EXTRA_DATA, Action::Warn);
        ctx
    }

    /// Override the action for one named condition.
    pub fn set(&mut self, condition: &str, action: Action) -> &mut Self {
        self.actions.insert(condition.to_string(), action);
        self
    }

    /// Action currently configured for a condition.
    pub fn action(&self, condition: &str) -> Action {
        self.actions.get(condition).copied().unwrap_or(Action::Error)
    }

    /// Resolve a flagged condition: propagate the error, or swallow it and
    /// (unless ignored) record the warning. Callers apply their documented
    /// fallback on `Ok`.
    pub fn handle(&mut self, condition: &str, err: GridError) -> Result<(), GridError> {
        match self.action(condition) {
            Action::Error => Err(err),
            Action::Warn => {
                let msg = format!("{condition}: {err}");
                log::warn!("{msg}");
                self.warnings.push(msg);
                Ok(())
            }
            Action::Ignore => Ok(()),
        }
    }

    /// Warnings recorded so far, in occurrence order.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

/// Check a data keyword's value count against its target region. Excess
/// values are the [`EXTRA_DATA`] condition and get truncated when the
/// caller opted into leniency; a shortfall is always fatal.
pub fn fit_data<T>(
    ctx: &mut ParseContext,
    keyword: &str,
    mut data: Vec<T>,
    expected: usize,
) -> Result<Vec<T>, GridError> {
    if data.len() == expected {
        return Ok(data);
    }
    let err = GridError::SizeMismatch {
        keyword: keyword.to_string(),
        expected,
        got: data.len(),
    };
    if data.len() > expected {
        ctx.handle(EXTRA_DATA, err)?;
        data.truncate(expected);
        return Ok(data);
    }
    Err(err)
}
