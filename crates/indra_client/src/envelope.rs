//! Success/error discrimination for the service's `{status, message?, ...}` envelope.

use serde_json::Value;

use crate::error::ClientError;
use crate::operation::Operation;
use crate::transport::RawResponse;
use crate::Payload;

pub const STATUS_KEY: &str = "status";
pub const MESSAGE_KEY: &str = "message";
pub const STATUS_OK: &str = "ok";
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Parse a reply body into a JSON object.
pub fn decode(operation: Operation, response: RawResponse) -> Result<Payload, ClientError> {
    let invalid = |reason: String| ClientError::InvalidResponse {
        operation: operation.name(),
        status: response.status,
        reason,
    };
    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(invalid(format!("expected a JSON object, got {}", kind(&other)))),
        Err(err) => Err(invalid(err.to_string())),
    }
}

/// Strip `status` from an "ok" envelope, or turn anything else into [`ClientError::Remote`].
pub fn expect_ok(operation: Operation, mut envelope: Payload) -> Result<Payload, ClientError> {
    if !is_ok(&envelope) {
        return Err(ClientError::Remote {
            operation: operation.name(),
            message: error_message(&envelope),
        });
    }
    envelope.remove(STATUS_KEY);
    Ok(envelope)
}

/// Health probe verdict: a JSON object whose `status` is "ok". Anything else is unhealthy.
pub fn is_healthy(response: &RawResponse) -> bool {
    match serde_json::from_str::<Value>(&response.body) {
        Ok(Value::Object(map)) => is_ok(&map),
        _ => false,
    }
}

fn is_ok(envelope: &Payload) -> bool {
    envelope.get(STATUS_KEY).and_then(Value::as_str) == Some(STATUS_OK)
}

fn error_message(envelope: &Payload) -> String {
    match envelope.get(MESSAGE_KEY) {
        Some(Value::String(message)) => message.clone(),
        Some(Value::Null) | None => UNKNOWN_ERROR.to_string(),
        Some(other) => other.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
