//! Response body decoding
//!
//! Two policies live here. Entity decoding is strict: a body that does not
//! match the expected shape is a `Decode` error. Outcome decoding is
//! permissive: mutating endpoints answer `{"success": true}`, and anything
//! else reads as "did not succeed" rather than as an error.

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::domain::result::{Error, Result};

/// Decode a response body as a typed entity
pub fn entity<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| Error::decode(format!("{} in response body", e)))
}

/// Interpret a response body as a success flag.
///
/// True only for a JSON object whose `success` field is boolean `true`.
/// Invalid JSON, non-objects, a missing field, `false` or a non-boolean
/// value all yield false.
pub fn success_flag(body: &str) -> bool {
    match serde_json::from_str::<JsonValue>(body) {
        Ok(JsonValue::Object(map)) => matches!(map.get("success"), Some(JsonValue::Bool(true))),
        _ => false,
    }
}
