use crate::attendance::EditField;
use crate::calendar::duration;
use crate::error::{AppError, AppResult};
use crate::ipc::error::respond;
use crate::ipc::helpers::{get_required_str, get_required_usize, get_str_or_empty};
use crate::ipc::types::{AppState, Request};
use crate::model::DailyAttendance;
use serde_json::json;

fn cell_json(student_id: &str, date: &str, cell: &DailyAttendance) -> serde_json::Value {
    json!({
        "studentId": student_id,
        "date": date,
        "status": cell.status.code(),
        "inTime": cell.in_time,
        "outTime": cell.out_time,
        "duration": duration(&cell.in_time, &cell.out_time),
    })
}

fn handle_generate(state: &mut AppState, params: &serde_json::Value) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let class_id = get_str_or_empty(params, "classId");
    let start = get_str_or_empty(params, "startMonth");
    let end = get_str_or_empty(params, "endMonth");
    let sheet = state.generate_sheet(&class_id, &start, &end)?;
    Ok(json!({ "sheet": sheet }))
}

fn handle_month_open(
    state: &mut AppState,
    params: &serde_json::Value,
) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let index = get_required_usize(params, "monthIndex")?;
    let view = state.month_view(index)?;
    Ok(json!({
        "month": view,
        "unsaved": state.book.has_unsaved_attendance(),
    }))
}

fn handle_cell(state: &mut AppState, params: &serde_json::Value) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let student_id = get_required_str(params, "studentId")?;
    let date = get_required_str(params, "date")?;
    let cell = state.cell(&student_id, &date)?;
    Ok(json!({ "cell": cell_json(&student_id, &date, &cell) }))
}

fn handle_edit(state: &mut AppState, params: &serde_json::Value) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let student_id = get_required_str(params, "studentId")?;
    let date = get_required_str(params, "date")?;
    let raw_field = get_required_str(params, "field")?;
    let field = EditField::parse(&raw_field)
        .ok_or_else(|| AppError::validation(format!("unknown field: {}", raw_field)))?;
    let value = get_str_or_empty(params, "value");
    let cell = state.apply_edit(&student_id, &date, field, &value)?;
    Ok(json!({
        "cell": cell_json(&student_id, &date, &cell),
        "unsaved": state.book.has_unsaved_attendance(),
    }))
}

fn handle_cycle(state: &mut AppState, params: &serde_json::Value) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let student_id = get_required_str(params, "studentId")?;
    let date = get_required_str(params, "date")?;
    let cell = state.cycle(&student_id, &date)?;
    Ok(json!({
        "cell": cell_json(&student_id, &date, &cell),
        "unsaved": state.book.has_unsaved_attendance(),
    }))
}

fn handle_summary(state: &mut AppState, params: &serde_json::Value) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let student_id = get_required_str(params, "studentId")?;
    let month = get_required_str(params, "month")?;
    let summary = state.summary(&student_id, &month)?;
    Ok(json!({ "summary": summary }))
}

fn handle_save(state: &mut AppState) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    let cells = state.save_attendance()?;
    Ok(json!({ "ok": true, "cells": cells }))
}

fn handle_discard(state: &mut AppState) -> AppResult<serde_json::Value> {
    state.require_auth()?;
    state.discard_attendance()?;
    Ok(json!({ "ok": true }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    let result = match req.method.as_str() {
        "attendance.generate" => handle_generate(state, &req.params),
        "attendance.monthOpen" => handle_month_open(state, &req.params),
        "attendance.cell" => handle_cell(state, &req.params),
        "attendance.edit" => handle_edit(state, &req.params),
        "attendance.cycle" => handle_cycle(state, &req.params),
        "attendance.summary" => handle_summary(state, &req.params),
        "attendance.save" => handle_save(state),
        "attendance.discard" => handle_discard(state),
        _ => return None,
    };
    Some(respond(&req.id, &req.method, result))
}
