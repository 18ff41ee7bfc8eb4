use crate::error::AppResult;
use crate::ipc::error::respond;
use crate::ipc::helpers::get_required_str;
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState) -> AppResult<serde_json::Value> {
    Ok(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string()),
        "authenticated": state.session.authenticated,
    }))
}

fn handle_workspace_select(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    let path = PathBuf::from(get_required_str(params, "path")?);
    state.load(&path)?;
    Ok(json!({
        "workspacePath": path.to_string_lossy(),
        "authenticated": state.session.authenticated,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "health" => handle_health(state),
        "workspace.select" => handle_workspace_select(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, &req.method, result))
}
