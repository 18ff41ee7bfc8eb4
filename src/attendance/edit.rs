use super::derive::{derive, HolidaySet, TimeFiller, IN_WINDOW, OUT_WINDOW};
use crate::calendar::ClockTime;
use crate::error::{AppError, AppResult};
use crate::model::{AttendanceStatus, DailyAttendance, Overrides};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Status,
    InTime,
    OutTime,
}

impl EditField {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "status" => Some(EditField::Status),
            "inTime" => Some(EditField::InTime),
            "outTime" => Some(EditField::OutTime),
            _ => None,
        }
    }
}

/// P -> A -> L -> P; anything outside that loop restarts at P.
pub fn cycle_status(current: AttendanceStatus) -> AttendanceStatus {
    match current {
        AttendanceStatus::Present => AttendanceStatus::Absent,
        AttendanceStatus::Absent => AttendanceStatus::Leave,
        AttendanceStatus::Leave => AttendanceStatus::Present,
        AttendanceStatus::Holiday | AttendanceStatus::Unset => AttendanceStatus::Present,
    }
}

fn validate_time(value: &str) -> AppResult<String> {
    let t = value.trim();
    if t.is_empty() {
        return Ok(String::new());
    }
    ClockTime::parse(t)
        .map(|c| c.to_string())
        .ok_or_else(|| AppError::validation("time must be HH:MM (24-hour)"))
}

/// Writes the merged cell for (student, date) into `overrides` and returns it.
///
/// Nothing is written when the value fails validation.
fn apply_edit_in_place(
    overrides: &mut Overrides,
    holidays: &HolidaySet,
    student_id: &str,
    date: &str,
    field: EditField,
    value: &str,
    filler: &mut dyn TimeFiller,
) -> AppResult<DailyAttendance> {
    // derive() already returns the stored override verbatim when there is one.
    let mut cell = derive(overrides, holidays, student_id, date, filler);

    match field {
        EditField::Status => {
            let status = AttendanceStatus::parse(value)
                .ok_or_else(|| AppError::validation(format!("unknown status: {}", value)))?;
            cell.status = status;
            if status == AttendanceStatus::Present {
                cell.in_time = filler.draw(IN_WINDOW).to_string();
                cell.out_time = filler.draw(OUT_WINDOW).to_string();
            } else {
                cell.in_time.clear();
                cell.out_time.clear();
            }
        }
        EditField::InTime => cell.in_time = validate_time(value)?,
        EditField::OutTime => cell.out_time = validate_time(value)?,
    }

    overrides.set(student_id, date, cell.clone());
    Ok(cell)
}

/// Copy of `overrides` with the edit applied; the input is left as it was.
pub fn apply_edit(
    overrides: &Overrides,
    holidays: &HolidaySet,
    student_id: &str,
    date: &str,
    field: EditField,
    value: &str,
    filler: &mut dyn TimeFiller,
) -> AppResult<Overrides> {
    let mut next = overrides.clone();
    apply_edit_in_place(&mut next, holidays, student_id, date, field, value, filler)?;
    Ok(next)
}
