use crate::error::{AppError, AppResult};
use crate::ipc::error::respond;
use crate::ipc::helpers::{get_required_str, get_str_or_empty};
use crate::ipc::types::{AppState, Request};
use crate::model::ViewType;
use serde_json::json;

fn handle_institute_get(state: &mut AppState) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    Ok(json!({ "institute": state.book.institute }))
}

fn handle_institute_update(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let name = get_str_or_empty(params, "name");
    let address = get_str_or_empty(params, "address");
    let info = state.update_institute(&name, &address)?;
    Ok(json!({ "institute": info }))
}

fn handle_dashboard_stats(state: &mut AppState) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let book = &state.book;
    Ok(json!({
        "institute": book.institute,
        "classCount": book.classes.len(),
        "studentCount": book.students.len(),
        "holidayCount": book.holidays.len(),
    }))
}

fn handle_view_select(state: &mut AppState, params: &serde_json::Value) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let raw = get_required_str(params, "view")?;
    let view = ViewType::parse(&raw)
        .ok_or_else(|| AppError::validation(format!("unknown view: {}", raw)))?;
    state.select_view(view)?;
    Ok(json!({
        "view": state.session.view,
        "selectedClassId": state.session.selected_class,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "institute.get" => handle_institute_get(state),
        "institute.update" => handle_institute_update(state, &req.params),
        "dashboard.stats" => handle_dashboard_stats(state),
        "view.select" => handle_view_select(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, &req.method, result))
}
