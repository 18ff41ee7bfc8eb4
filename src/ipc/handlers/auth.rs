use crate::error::AppResult;
use crate::ipc::error::respond;
use crate::ipc::helpers::get_str_or_empty;
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use tracing::info;

fn handle_login(state: &mut AppState, params: &serde_json::Value) -> AppResult<serde_json::Value> {
    let username = get_str_or_empty(params, "username");
    let password = get_str_or_empty(params, "password");
    state.login(username.trim(), &password)?;
    info!(username = username.trim(), "logged in");
    Ok(json!({ "authenticated": true }))
}

fn handle_logout(state: &mut AppState) -> AppResult<serde_json::Value> {
    state.logout()?;
    info!("logged out");
    Ok(json!({ "authenticated": false }))
}

fn handle_status(state: &mut AppState) -> AppResult<serde_json::Value> {
    state.store()?;
    Ok(json!({ "authenticated": state.session.authenticated }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "auth.login" => handle_login(state, &req.params),
        "auth.logout" => handle_logout(state),
        "auth.status" => handle_status(state),
        _ => return None,
    };
    Some(respond(&req.id, &req.method, result))
}
