use crate::error::AppResult;
use crate::ipc::error::respond;
use crate::ipc::helpers::{get_required_str, get_str_or_empty};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_classes_list(state: &mut AppState) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let book = &state.book;
    let classes: Vec<serde_json::Value> = book
        .classes
        .iter()
        .map(|c| {
            let student_count = book.students.iter().filter(|s| s.class_id == c.id).count();
            json!({
                "id": c.id,
                "name": c.name,
                "studentCount": student_count,
            })
        })
        .collect();
    Ok(json!({
        "classes": classes,
        "selectedClassId": state.session.selected_class,
    }))
}

fn handle_classes_create(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let class = state.create_class(&get_str_or_empty(params, "name"))?;
    Ok(json!({ "classId": class.id, "name": class.name }))
}

fn handle_classes_update(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let class_id = get_required_str(params, "classId")?;
    state.rename_class(&class_id, &get_str_or_empty(params, "name"))?;
    Ok(json!({ "ok": true }))
}

fn handle_classes_delete(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let class_id = get_required_str(params, "classId")?;
    let removed = state.delete_class(&class_id)?;
    Ok(json!({ "ok": true, "removedStudents": removed }))
}

fn handle_classes_select(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let class_id = get_required_str(params, "classId")?;
    state.select_class(&class_id)?;
    Ok(json!({
        "selectedClassId": class_id,
        "view": state.session.view,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "classes.list" => handle_classes_list(state),
        "classes.create" => handle_classes_create(state, &req.params),
        "classes.update" => handle_classes_update(state, &req.params),
        "classes.delete" => handle_classes_delete(state, &req.params),
        "classes.select" => handle_classes_select(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, &req.method, result))
}
