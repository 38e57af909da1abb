//! The main entry point for expression evaluation and template resolution

use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::evaluator;
use crate::template;
use crate::types::Bindings;

/// Evaluates JavaScript expressions and resolves templates against JSON
/// bindings.
///
/// The engine holds nothing but configuration: every evaluation runs in a
/// fresh, single-use sandbox that is discarded afterwards, so engines are
/// cheap to construct and safe to share across threads.
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    config: EngineConfig,
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine {
    /// Create an engine with the default configuration.
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Create an engine with a custom configuration.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use templjs::{EngineConfigBuilder, TemplateEngine};
    ///
    /// let config = EngineConfigBuilder::new()
    ///     .with_execution_timeout(Duration::from_millis(250))
    ///     .build();
    /// let engine = TemplateEngine::with_config(config);
    /// assert_eq!(engine.config().execution_timeout, Duration::from_millis(250));
    /// ```
    pub fn with_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine evaluates under.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate a single JavaScript expression against `bindings`.
    ///
    /// The expression runs in a fresh isolated sandbox with each binding
    /// available under its own name. The result is whatever JSON value the
    /// expression produced.
    ///
    /// # Example
    /// ```
    /// use serde_json::json;
    /// use templjs::{Bindings, TemplateEngine};
    ///
    /// let engine = TemplateEngine::new();
    /// let mut bindings = Bindings::new();
    /// bindings.insert("a".into(), json!(10));
    /// bindings.insert("b".into(), json!(5));
    ///
    /// let value = engine.resolve_expression(&bindings, "a * b")?;
    /// assert_eq!(value, json!(50));
    /// # Ok::<(), templjs::TemplateError>(())
    /// ```
    pub fn resolve_expression(&self, bindings: &Bindings, expression: &str) -> Result<Value> {
        evaluator::evaluate_expression(&self.config, bindings, expression)
    }

    /// Resolve every `{{ ... }}` span in `template` against `bindings`.
    ///
    /// Spans are evaluated in textual order, each in its own sandbox, and
    /// replaced by the stringified result. The first failing span aborts
    /// the whole resolution; no partial output is ever returned.
    ///
    /// # Example
    /// ```
    /// use serde_json::json;
    /// use templjs::{Bindings, TemplateEngine};
    ///
    /// let engine = TemplateEngine::new();
    /// let mut bindings = Bindings::new();
    /// bindings.insert("name".into(), json!("Ada"));
    ///
    /// let out = engine.resolve_template(&bindings, "Hello, {{ name }}!")?;
    /// assert_eq!(out, "Hello, Ada!");
    /// # Ok::<(), templjs::TemplateError>(())
    /// ```
    pub fn resolve_template(&self, bindings: &Bindings, template: &str) -> Result<String> {
        template::resolve_template(&self.config, bindings, template)
    }
}
