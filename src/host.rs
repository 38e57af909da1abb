//! QuickJS embedding behind a minimal capability surface
//!
//! The evaluator consumes the scripting host exclusively through this
//! module: create an isolated context, set string globals, run a script,
//! request termination of a running script from another thread. No engine
//! type leaks past this boundary; everything crossing it is text.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rquickjs::{CatchResultExt, Context, Runtime};
use thiserror::Error;

use crate::config::EngineConfig;

/// Failure reported by the scripting host, as a plain message.
#[derive(Error, Debug)]
#[error("{message}")]
pub(crate) struct HostError {
    message: String,
}

impl From<rquickjs::Error> for HostError {
    fn from(err: rquickjs::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// Requests termination of a script that may be running in another thread.
///
/// `terminate` is fire-and-forget: it flips a flag that the host's
/// interrupt callback observes the next time it polls, aborting the running
/// script without giving it a chance to clean up. Safe to call at any
/// point in the context's life, including after it is gone.
#[derive(Clone, Debug, Default)]
pub(crate) struct InterruptHandle {
    terminated: Arc<AtomicBool>,
}

impl InterruptHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Ask the host to abort the script currently running in the context
    /// wired to this handle.
    pub(crate) fn terminate(&self) {
        self.terminated.store(true, Ordering::Relaxed);
    }

    fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Relaxed)
    }
}

/// One single-use sandbox: a fresh QuickJS runtime and context pair.
///
/// Contexts share no state with each other; each one is created for one
/// evaluation and disposed when dropped. The interrupt callback registered
/// at creation is the only channel through which the outside world can
/// reach a running script.
pub(crate) struct IsolatedContext {
    context: Context,
    // Owns the interrupt callback; must outlive the context it guards.
    _runtime: Runtime,
}

impl IsolatedContext {
    /// Create a fresh context wired to `handle` for external termination.
    pub(crate) fn create(config: &EngineConfig, handle: &InterruptHandle) -> Result<Self, HostError> {
        let runtime = Runtime::new()?;
        if let Some(limit) = config.memory_limit {
            runtime.set_memory_limit(limit);
        }
        let handle = handle.clone();
        runtime.set_interrupt_handler(Some(Box::new(move || handle.is_terminated())));

        let context = Context::full(&runtime)?;
        Ok(Self {
            context,
            _runtime: runtime,
        })
    }

    /// Bind `name` in the sandbox's global scope to a string value.
    pub(crate) fn set_global(&self, name: &str, text: &str) -> Result<(), HostError> {
        self.context.with(|ctx| {
            ctx.globals()
                .set(name, text)
                .catch(&ctx)
                .map_err(|err| HostError {
                    message: err.to_string(),
                })
        })
    }

    /// Run a script for its effect, discarding whatever it evaluates to.
    pub(crate) fn exec(&self, script: &str) -> Result<(), HostError> {
        self.context.with(|ctx| {
            match ctx.eval::<rquickjs::Value, _>(script).catch(&ctx) {
                Ok(_) => Ok(()),
                Err(err) => Err(HostError {
                    message: err.to_string(),
                }),
            }
        })
    }

    /// Run a script and capture the string it evaluates to.
    ///
    /// `None` means the script produced no value at all (`undefined`); a
    /// non-string result is a host error.
    pub(crate) fn run(&self, script: &str) -> Result<Option<String>, HostError> {
        self.context.with(|ctx| {
            ctx.eval::<Option<String>, _>(script)
                .catch(&ctx)
                .map_err(|err| HostError {
                    message: err.to_string(),
                })
        })
    }
}
