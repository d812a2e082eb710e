//! Response envelope handling for the consumed GraphQL endpoint.
//!
//! The endpoint reports failures inside an otherwise successful body: an
//! `errors` array beside (or instead of) `data`. Bodies are screened for
//! errors before the requested root is deserialized.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::board::ports::TransportError;

/// Status code reported when the response body is missing entirely.
const MISSING_BODY_STATUS: &str = "INTERNAL_SERVER_ERROR";

/// Status code reported when errors carry no extension code.
const DEFAULT_ERROR_STATUS: &str = "500";

/// Extracts the error a response body reports, if any.
///
/// A null body maps to an unknown internal error. A body with an `errors`
/// key always maps to an error: the concatenated error messages, or the
/// serialized `errors` value when no message text exists, with the first
/// error's `extensions.code` (stringified) as the status.
#[must_use]
pub fn extract_error(body: &Value) -> Option<TransportError> {
    if body.is_null() {
        return Some(TransportError::graph("Unknown error", MISSING_BODY_STATUS));
    }
    let errors = body.get("errors")?;
    let message = join_messages(errors)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| errors.to_string());
    let status_code = errors
        .get(0)
        .and_then(|first| first.get("extensions"))
        .and_then(|extensions| extensions.get("code"))
        .map_or_else(|| DEFAULT_ERROR_STATUS.to_owned(), code_to_string);
    Some(TransportError::graph(message, status_code))
}

/// Decodes the named root object under `data`.
///
/// # Errors
///
/// Returns the body's reported error when one is present, or
/// [`TransportError::Malformed`] when the root is missing or fails to
/// deserialize.
pub fn decode_root<T: DeserializeOwned>(body: &Value, root: &str) -> Result<T, TransportError> {
    if let Some(error) = extract_error(body) {
        return Err(error);
    }
    let node = body
        .get("data")
        .and_then(|data| data.get(root))
        .ok_or_else(|| TransportError::malformed(format!("response has no data.{root}")))?;
    serde_json::from_value(node.clone())
        .map_err(|err| TransportError::malformed(format!("decoding data.{root}: {err}")))
}

fn join_messages(errors: &Value) -> Option<String> {
    let list = errors.as_array()?;
    Some(
        list.iter()
            .map(|error| {
                error
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
            })
            .collect::<String>(),
    )
}

fn code_to_string(code: &Value) -> String {
    code.as_str().map_or_else(|| code.to_string(), str::to_owned)
}
