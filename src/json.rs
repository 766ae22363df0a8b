//! Internal JSON literal support backing the `ok!`, `status!`, and similar response macros.

pub use serde_json::json_internal;
