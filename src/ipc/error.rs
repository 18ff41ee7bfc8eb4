use crate::error::AppResult;
use serde_json::json;
use tracing::{error, warn};

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

pub fn respond(id: &str, method: &str, result: AppResult<serde_json::Value>) -> serde_json::Value {
    match result {
        Ok(v) => ok(id, v),
        Err(e) => {
            let code = e.code();
            if code == "store_failed" || code == "backup_failed" {
                error!(method, code, error = %e, "request failed");
            } else {
                warn!(method, code, error = %e, "request rejected");
            }
            err(id, code, e.to_string(), None)
        }
    }
}
