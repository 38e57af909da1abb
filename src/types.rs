//! Shared data-model types

use serde_json::{Map, Value};

/// Named values made available to an expression
///
/// Keys must be shaped like identifiers; values may be any JSON value. An
/// empty map means "no bindings". The crate treats a `Bindings` as a
/// read-only snapshot for the duration of one call and retains no
/// references into it afterwards.
pub type Bindings = Map<String, Value>;
