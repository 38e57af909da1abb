//! JavaScript expression templating over JSON bindings
//!
//! A template is plain text with `{{ expression }}` spans. Each span holds
//! a JavaScript expression that is evaluated in a fresh QuickJS sandbox
//! against caller-supplied bindings; the stringified result replaces the
//! span. Expressions can use arithmetic, ternaries, property and array
//! access, array methods — anything the host language offers within one
//! expression.
//!
//! # Quick Start
//! ```
//! use serde_json::json;
//!
//! let mut bindings = templjs::Bindings::new();
//! bindings.insert("user".into(), json!({"name": "Alice"}));
//! bindings.insert("hour".into(), json!(9));
//!
//! let greeting = templjs::resolve_template(
//!     &bindings,
//!     "Good {{ hour < 12 ? 'morning' : 'afternoon' }}, {{ user.name }}!",
//! )?;
//! assert_eq!(greeting, "Good morning, Alice!");
//! # Ok::<(), templjs::TemplateError>(())
//! ```
//!
//! # Sandboxing
//!
//! Every evaluation gets its own single-use execution context: bindings
//! cross into it as JSON text, the result crosses back out as JSON text,
//! and the context is discarded whether the evaluation succeeded or not.
//! Nothing is shared between calls and the caller's bindings are never
//! mutated. Expressions run under a wall-clock budget (100 ms by default);
//! a runaway expression is terminated from outside the sandbox and
//! reported as [`TemplateError::ExecutionTimeout`]. See [`EngineConfig`]
//! to adjust the budget or cap sandbox memory per engine.

pub mod config;
pub mod engine;
pub mod error;
pub mod types;

mod evaluator;
mod host;
mod template;

pub use config::{DEFAULT_EXECUTION_TIMEOUT, EngineConfig, EngineConfigBuilder};
pub use engine::TemplateEngine;
pub use error::{Result, TemplateError};
pub use types::Bindings;

// Re-exported so callers can construct and inspect binding values without
// naming serde_json themselves.
pub use serde_json::Value;

/// Evaluate a single JavaScript expression against `bindings` with the
/// default configuration.
///
/// Convenience wrapper over [`TemplateEngine::resolve_expression`].
///
/// # Example
/// ```
/// use serde_json::json;
///
/// let mut bindings = templjs::Bindings::new();
/// bindings.insert("a".into(), json!(10));
/// bindings.insert("b".into(), json!(5));
///
/// let value = templjs::resolve_js_expression(&bindings, "a * b")?;
/// assert_eq!(value, json!(50));
/// # Ok::<(), templjs::TemplateError>(())
/// ```
pub fn resolve_js_expression(bindings: &Bindings, expression: &str) -> Result<Value> {
    TemplateEngine::new().resolve_expression(bindings, expression)
}

/// Resolve every `{{ ... }}` span in `template` against `bindings` with
/// the default configuration.
///
/// Convenience wrapper over [`TemplateEngine::resolve_template`].
pub fn resolve_template(bindings: &Bindings, template: &str) -> Result<String> {
    TemplateEngine::new().resolve_template(bindings, template)
}
