use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure body produced by the cats service for any non-2xx response.
///
/// `detail` is either a plain message or a list of validation entries, each
/// carrying a `msg` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Value,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Value::String(detail.into()),
        }
    }

    pub fn validation(messages: &[&str]) -> Self {
        Self {
            detail: Value::Array(
                messages
                    .iter()
                    .map(|msg| serde_json::json!({ "msg": msg }))
                    .collect(),
            ),
        }
    }

    /// Flattens `detail` into one line, or `None` when it carries nothing usable.
    pub fn message(&self) -> Option<String> {
        if !is_truthy(&self.detail) {
            return None;
        }
        match &self.detail {
            Value::Array(entries) => Some(
                entries
                    .iter()
                    .map(|entry| match entry.get("msg") {
                        Some(msg) if is_truthy(msg) => value_text(msg),
                        _ => value_text(entry),
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            other => Some(value_text(other)),
        }
    }
}

/// Builds the user-facing message for a failed response. Falls back to
/// `HTTP {status}` whenever the body is not an object with a usable `detail`.
pub fn describe_failure(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .filter(Value::is_object)
        .and_then(|value| serde_json::from_value::<ErrorBody>(value).ok())
        .and_then(|body| body.message())
        .unwrap_or_else(|| format!("HTTP {status}"))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
