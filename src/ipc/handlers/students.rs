use crate::error::{AppError, AppResult};
use crate::ipc::error::respond;
use crate::ipc::helpers::{get_optional_str, get_required_str, get_str_or_empty};
use crate::ipc::types::{AppState, Request};
use crate::records::{self, StudentDraft};
use serde_json::json;

fn draft_from_params(params: &serde_json::Value) -> StudentDraft {
    StudentDraft {
        student_id: get_str_or_empty(params, "studentId"),
        name: get_str_or_empty(params, "name"),
        father_name: get_str_or_empty(params, "fatherName"),
        mother_name: get_str_or_empty(params, "motherName"),
    }
}

/// Falls back to the class picked with `classes.select`.
fn class_param(state: &AppState, params: &serde_json::Value) -> AppResult<String> {
    get_optional_str(params, "classId")
        .or_else(|| state.session.selected_class.clone())
        .ok_or_else(|| AppError::validation("please select a class first"))
}

fn handle_students_list(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let class_id = class_param(state, params)?;
    let Some(class) = state.book.classes.iter().find(|c| c.id == class_id) else {
        return Err(AppError::not_found("class not found"));
    };
    let students = records::students_in_class(&state.book.students, &class_id);
    Ok(json!({
        "classId": class.id,
        "className": class.name,
        "students": students,
    }))
}

fn handle_students_create(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let class_id = class_param(state, params)?;
    let student = state.create_student(&class_id, draft_from_params(params))?;
    Ok(json!({ "student": student }))
}

fn handle_students_update(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let id = get_required_str(params, "id")?;
    let student = state.update_student(&id, draft_from_params(params))?;
    Ok(json!({ "student": student }))
}

fn handle_students_delete(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let id = get_required_str(params, "id")?;
    state.delete_student(&id)?;
    Ok(json!({ "ok": true }))
}

fn handle_students_import(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let class_id = class_param(state, params)?;
    let text = get_required_str(params, "text")?;
    let added = state.import_students(&class_id, &text)?;
    Ok(json!({
        "imported": added.len(),
        "students": added,
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "students.list" => handle_students_list(state, &req.params),
        "students.create" => handle_students_create(state, &req.params),
        "students.update" => handle_students_update(state, &req.params),
        "students.delete" => handle_students_delete(state, &req.params),
        "students.import" => handle_students_import(state, &req.params),
        _ => return None,
    };
    Some(respond(&req.id, &req.method, result))
}
