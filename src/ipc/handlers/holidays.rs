use crate::calendar::MonthKey;
use crate::error::{AppError, AppResult};
use crate::ipc::error::respond;
use crate::ipc::helpers::{get_optional_str, get_required_str, get_str_or_empty};
use crate::ipc::types::{AppState, Request};
use crate::records::{self, ToggleOutcome};
use serde_json::json;
use tracing::info;

fn handle_holidays_list(state: &mut AppState) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    Ok(json!({ "holidays": state.book.holidays }))
}

fn handle_holidays_create(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let holiday = state.create_holiday(
        &get_str_or_empty(params, "date"),
        &get_str_or_empty(params, "name"),
    )?;
    Ok(json!({ "holiday": holiday }))
}

fn handle_holidays_update(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let id = get_required_str(params, "id")?;
    state.update_holiday(
        &id,
        &get_str_or_empty(params, "date"),
        &get_str_or_empty(params, "name"),
    )?;
    Ok(json!({ "ok": true }))
}

fn handle_holidays_delete(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let id = get_required_str(params, "id")?;
    state.delete_holiday(&id)?;
    Ok(json!({ "ok": true }))
}

fn handle_holidays_toggle(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let date = get_required_str(params, "date")?;
    let name = get_optional_str(params, "name");
    let outcome = state.toggle_holiday(&date, name.as_deref())?;
    let holiday = match &outcome {
        ToggleOutcome::Added(h) | ToggleOutcome::Removed(h) => Some(h.clone()),
        ToggleOutcome::Unchanged => None,
    };
    info!(date = %date, action = outcome.action(), "holiday toggled");
    Ok(json!({
        "action": outcome.action(),
        "holiday": holiday,
        "holidays": state.book.holidays,
    }))
}

fn handle_holidays_month(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let month = MonthKey::parse(&get_required_str(params, "month")?).map_err(AppError::Validation)?;
    Ok(json!({
        "month": month.to_string(),
        "holidays": records::holidays_in_month(&state.book.holidays, month),
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "holidays.list" => handle_holidays_list(state),
        "holidays.create" => handle_holidays_create(state, &req.params),
        "holidays.update" => handle_holidays_update(state, &req.params),
        "holidays.delete" => handle_holidays_delete(state, &req.params),
        "holidays.toggle" => handle_holidays_toggle(state, &req.params),
        "holidays.month" => handle_holidays_month(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, &req.method, result))
}
