use crate::error::{AppError, AppResult};

pub fn get_required_str(params: &serde_json::Value, key: &str) -> AppResult<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| AppError::validation(format!("missing {}", key)))
}

pub fn get_optional_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

/// Missing or null reads as empty, so blank-field validation happens in one place.
pub fn get_str_or_empty(params: &serde_json::Value, key: &str) -> String {
    get_optional_str(params, key).unwrap_or_default()
}

pub fn get_required_usize(params: &serde_json::Value, key: &str) -> AppResult<usize> {
    params
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .ok_or_else(|| AppError::validation(format!("missing {}", key)))
}
