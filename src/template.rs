//! Template resolution: delimiter scanning and result stringification
//!
//! A template is scanned left to right exactly once. Literal text is
//! copied through untouched; each `{{ ... }}` span is handed to the
//! evaluator and replaced by the stringified result. Resolution is
//! all-or-nothing: the first failing span aborts the whole call.

use log::debug;
use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::{Result, TemplateError};
use crate::evaluator;
use crate::types::Bindings;

const LEFT_DELIMITER: &str = "{{";
const RIGHT_DELIMITER: &str = "}}";

/// Resolve every expression span in `template` against `bindings`.
pub(crate) fn resolve_template(
    config: &EngineConfig,
    bindings: &Bindings,
    template: &str,
) -> Result<String> {
    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;

    while cursor < template.len() {
        let Some(offset) = template[cursor..].find(LEFT_DELIMITER) else {
            output.push_str(&template[cursor..]);
            break;
        };
        let left = cursor + offset;
        output.push_str(&template[cursor..left]);

        let interior = left + LEFT_DELIMITER.len();
        let Some(length) = template[interior..].find(RIGHT_DELIMITER) else {
            return Err(TemplateError::unmatched_delimiter(left));
        };

        // The delimiters themselves are excluded; interior whitespace is
        // left for the scripting host to deal with.
        let expression = &template[interior..interior + length];
        let value = evaluator::evaluate_expression(config, bindings, expression)?;
        output.push_str(&stringify_value(&value));

        cursor = interior + length + RIGHT_DELIMITER.len();
    }

    debug!(
        "resolved template: {} bytes in, {} bytes out",
        template.len(),
        output.len()
    );
    Ok(output)
}

/// How an evaluated value becomes template output.
///
/// Integral numbers render as plain base-10 digits, floats as the shortest
/// decimal form that round-trips (never scientific notation), strings
/// verbatim and unquoted. Everything else renders as its compact JSON
/// encoding.
pub(crate) fn stringify_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => {
            if let Some(n) = number.as_i64() {
                n.to_string()
            } else if let Some(n) = number.as_u64() {
                n.to_string()
            } else {
                match number.as_f64() {
                    Some(n) => n.to_string(),
                    None => number.to_string(),
                }
            }
        }
        other => other.to_string(),
    }
}
