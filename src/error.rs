//! Error types for expression evaluation and template resolution.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for templjs operations
pub type Result<T> = std::result::Result<T, TemplateError>;

/// Comprehensive error type for expression evaluation and template resolution
///
/// Every failure surfaces to the caller as exactly one of these variants;
/// nothing is swallowed or downgraded along the way. Template resolution is
/// all-or-nothing, so the first failing span aborts the whole call with the
/// span's error unchanged.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// A binding key is not usable as an identifier in the sandbox
    #[error("invalid binding name `{key}`: binding names must be identifiers")]
    InvalidBindingName {
        /// The offending binding key
        key: String,
    },

    /// A binding value could not be encoded to JSON text
    #[error("failed to serialize binding `{key}`: {source}")]
    BindingSerialization {
        /// The offending binding key
        key: String,
        /// The underlying encoder failure
        source: serde_json::Error,
    },

    /// The sandbox rejected setting or parsing an injected binding
    #[error("failed to inject binding `{key}`: {message}")]
    BindingInjection {
        /// The offending binding key
        key: String,
        /// The host's description of the failure
        message: String,
    },

    /// The sandbox failed to execute the expression
    #[error("failed to evaluate expression `{expression}`: {message}")]
    Evaluation {
        /// The expression text as supplied by the caller
        expression: String,
        /// The host's description of the failure (syntax error, thrown
        /// exception, reference to an undefined name)
        message: String,
    },

    /// The sandbox's output could not be decoded into a JSON value
    #[error("failed to decode evaluation result: {message}")]
    ResultDecoding {
        /// What went wrong while decoding
        message: String,
    },

    /// The expression exceeded its wall-clock budget and was terminated
    ///
    /// Deliberately not a sub-case of [`TemplateError::Evaluation`]: callers
    /// can match on it to tell "this was slow" apart from "this was wrong".
    #[error("execution timed out after {limit:?}")]
    ExecutionTimeout {
        /// The budget that was exceeded
        limit: Duration,
    },

    /// A template has an opening `{{` with no matching `}}`
    #[error("unmatched expression delimiter at byte {position}")]
    UnmatchedDelimiter {
        /// Byte offset of the orphaned opening delimiter
        position: usize,
    },

    /// The sandbox infrastructure itself failed
    ///
    /// Context creation or the evaluation worker broke, as opposed to the
    /// caller's expression or bindings being at fault.
    #[error("sandbox error: {message}")]
    Sandbox {
        /// Description of the infrastructure failure
        message: String,
    },
}

impl TemplateError {
    /// Create an invalid binding name error
    pub fn invalid_binding_name(key: impl Into<String>) -> Self {
        Self::InvalidBindingName { key: key.into() }
    }

    /// Create a binding serialization error
    pub fn binding_serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::BindingSerialization {
            key: key.into(),
            source,
        }
    }

    /// Create a binding injection error
    pub fn binding_injection(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BindingInjection {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an expression evaluation error
    pub fn evaluation(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Evaluation {
            expression: expression.into(),
            message: message.into(),
        }
    }

    /// Create a result decoding error
    pub fn result_decoding(message: impl Into<String>) -> Self {
        Self::ResultDecoding {
            message: message.into(),
        }
    }

    /// Create an execution timeout error
    pub fn execution_timeout(limit: Duration) -> Self {
        Self::ExecutionTimeout { limit }
    }

    /// Create an unmatched delimiter error
    pub fn unmatched_delimiter(position: usize) -> Self {
        Self::UnmatchedDelimiter { position }
    }

    /// Create a sandbox infrastructure error
    pub fn sandbox(message: impl Into<String>) -> Self {
        Self::Sandbox {
            message: message.into(),
        }
    }
}
