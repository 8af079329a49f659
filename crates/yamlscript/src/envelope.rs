//! Decoding of the JSON envelope returned by `load_ys_to_json`.
//!
//! libys answers every call with one of two shapes:
//!
//! ```text
//! {"data": <any JSON value>}
//! {"error": {"cause": "<message>", "type": "<exception class>", "trace": [...]}}
//! ```
//!
//! An `error` key always takes precedence over `data`.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// Decode a raw envelope into the evaluated data or an error.
pub fn decode(json: &str) -> Result<Value> {
    let mut envelope: Map<String, Value> = serde_json::from_str(json)?;

    if let Some(error) = envelope.remove("error") {
        return Err(evaluation_error(error));
    }

    envelope.remove("data").ok_or(Error::UnexpectedResponse)
}

fn evaluation_error(error: Value) -> Error {
    match error.get("cause").and_then(Value::as_str) {
        Some(cause) => Error::Evaluation {
            cause: cause.to_string(),
            kind: error.get("type").and_then(Value::as_str).map(str::to_string),
        },
        // Keep whatever the evaluator sent rather than lose it
        None => Error::Evaluation {
            cause: error.to_string(),
            kind: None,
        },
    }
}
