use serde_json::json;

use crate::validate::ValidationError;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Validation failures carry the offending field in details so the UI can
/// focus the right input.
pub fn validation(id: &str, e: &ValidationError) -> serde_json::Value {
    let details = e.field().map(|f| json!({ "field": f }));
    err(id, e.code(), e.to_string(), details)
}

/// Storage failures never mutate state; the anyhow chain goes in the message.
pub fn storage(id: &str, e: &anyhow::Error) -> serde_json::Value {
    err(id, "storage_failed", format!("{e:?}"), None)
}
