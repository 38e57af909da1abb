//! The expression-evaluation boundary
//!
//! Caller data crosses into an isolated context as JSON text, the
//! expression runs against it under a wall-clock budget, and the result
//! crosses back out as JSON text. Each call spawns exactly one worker
//! thread that owns the sandbox; the caller blocks racing the worker's
//! single publication against the deadline.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use log::{debug, warn};
use serde_json::Value;
use unicode_xid::UnicodeXID;

use crate::config::EngineConfig;
use crate::error::{Result, TemplateError};
use crate::host::{InterruptHandle, IsolatedContext};
use crate::types::Bindings;

/// Evaluate `expression` against `bindings` in a fresh sandbox.
pub(crate) fn evaluate_expression(
    config: &EngineConfig,
    bindings: &Bindings,
    expression: &str,
) -> Result<Value> {
    let serialized = serialize_bindings(bindings)?;
    debug!(
        "evaluating expression with {} binding(s): {expression}",
        serialized.len()
    );

    let handle = InterruptHandle::new();
    // Capacity one: the worker publishes exactly once and never blocks on a
    // receiver that already took the timeout branch. A publication landing
    // after the deadline parks in the slot and is dropped unread.
    let (sender, receiver) = mpsc::sync_channel::<Result<Value>>(1);

    let worker_config = config.clone();
    let worker_handle = handle.clone();
    let worker_expression = expression.to_string();
    let _ = thread::Builder::new()
        .name("templjs-eval".into())
        .spawn(move || {
            let outcome = run_in_sandbox(
                &worker_config,
                &worker_handle,
                &serialized,
                &worker_expression,
            );
            let _ = sender.send(outcome);
        })
        .map_err(|err| TemplateError::sandbox(format!("failed to spawn evaluation thread: {err}")))?;

    match receiver.recv_timeout(config.execution_timeout) {
        Ok(outcome) => outcome,
        Err(RecvTimeoutError::Timeout) => {
            // Fire-and-forget: the sandbox aborts the script on its own
            // schedule and the worker unwinds without anyone waiting on it.
            handle.terminate();
            warn!(
                "expression exceeded its {:?} budget, terminating: {expression}",
                config.execution_timeout
            );
            Err(TemplateError::execution_timeout(config.execution_timeout))
        }
        Err(RecvTimeoutError::Disconnected) => Err(TemplateError::sandbox(
            "evaluation thread exited without publishing a result",
        )),
    }
}

/// Encode every binding to JSON text, validating names first.
///
/// Runs on the caller's thread so a bad binding is reported before any
/// sandbox work starts.
fn serialize_bindings(bindings: &Bindings) -> Result<Vec<(String, String)>> {
    let mut serialized = Vec::with_capacity(bindings.len());
    for (key, value) in bindings {
        if !is_identifier(key) {
            return Err(TemplateError::invalid_binding_name(key));
        }
        let text = serde_json::to_string(value)
            .map_err(|source| TemplateError::binding_serialization(key, source))?;
        serialized.push((key.clone(), text));
    }
    Ok(serialized)
}

/// Binding keys are spliced into the injection script, so anything not
/// shaped like an identifier is rejected before it reaches the sandbox.
/// Reserved words pass this check and fail safely inside the sandbox as
/// injection errors.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => {
            (first == '_' || first == '$' || first.is_xid_start())
                && chars.all(|c| c == '$' || c.is_xid_continue())
        }
        None => false,
    }
}

/// Worker-side body: create the sandbox, inject bindings, run the
/// expression, decode what comes back.
fn run_in_sandbox(
    config: &EngineConfig,
    handle: &InterruptHandle,
    bindings: &[(String, String)],
    expression: &str,
) -> Result<Value> {
    let context = IsolatedContext::create(config, handle)
        .map_err(|err| TemplateError::sandbox(err.to_string()))?;

    for (key, text) in bindings {
        context
            .set_global(key, text)
            .map_err(|err| TemplateError::binding_injection(key, err.to_string()))?;
        // Materialize the native structure from the injected text. Rich
        // host-side value marshalling is not assumed reliable for arbitrary
        // nesting, so values only ever cross the boundary as JSON text.
        context
            .exec(&format!("{key} = JSON.parse({key})"))
            .map_err(|err| TemplateError::binding_injection(key, err.to_string()))?;
    }

    // Same boundary rule on the way out: the sandbox stringifies its own
    // result rather than handing back a structured value.
    let stringified = context
        .run(&format!("JSON.stringify(( {expression} ))"))
        .map_err(|err| TemplateError::evaluation(expression, err.to_string()))?;

    let text = stringified.ok_or_else(|| {
        TemplateError::result_decoding("expression produced a value with no JSON representation")
    })?;

    serde_json::from_str(&text).map_err(|err| TemplateError::result_decoding(err.to_string()))
}
