//! Record edits for the institute, classes, students and holidays.
//!
//! Every function here is a pure transition producing the next collection value;
//! persisting it is the caller's job (see `state`).

use crate::calendar::{parse_date, MonthKey};
use crate::error::{AppError, AppResult};
use crate::model::{ClassInfo, Holiday, Institute, Student};
use uuid::Uuid;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn required(value: &str, what: &str) -> AppResult<String> {
    let t = value.trim();
    if t.is_empty() {
        return Err(AppError::validation(format!("{} must not be empty", what)));
    }
    Ok(t.to_string())
}

pub fn institute(name: &str, address: &str) -> AppResult<Institute> {
    Ok(Institute {
        name: required(name, "name")?,
        address: required(address, "address")?,
    })
}

pub fn add_class(classes: &[ClassInfo], name: &str) -> AppResult<(Vec<ClassInfo>, ClassInfo)> {
    let class = ClassInfo {
        id: new_id(),
        name: required(name, "name")?,
    };
    let mut next = classes.to_vec();
    next.push(class.clone());
    Ok((next, class))
}

pub fn rename_class(classes: &[ClassInfo], class_id: &str, name: &str) -> AppResult<Vec<ClassInfo>> {
    let name = required(name, "name")?;
    if !classes.iter().any(|c| c.id == class_id) {
        return Err(AppError::not_found("class not found"));
    }
    Ok(classes
        .iter()
        .map(|c| {
            if c.id == class_id {
                ClassInfo {
                    id: c.id.clone(),
                    name: name.clone(),
                }
            } else {
                c.clone()
            }
        })
        .collect())
}

/// Next class list and next student list after dropping a class and everyone in it.
pub struct ClassRemoval {
    pub classes: Vec<ClassInfo>,
    pub students: Vec<Student>,
    pub removed_students: usize,
}

pub fn remove_class(classes: &[ClassInfo], students: &[Student], class_id: &str) -> AppResult<ClassRemoval> {
    if !classes.iter().any(|c| c.id == class_id) {
        return Err(AppError::not_found("class not found"));
    }
    let next_students: Vec<Student> = students
        .iter()
        .filter(|s| s.class_id != class_id)
        .cloned()
        .collect();
    Ok(ClassRemoval {
        classes: classes.iter().filter(|c| c.id != class_id).cloned().collect(),
        removed_students: students.len() - next_students.len(),
        students: next_students,
    })
}

#[derive(Debug, Clone, Default)]
pub struct StudentDraft {
    pub student_id: String,
    pub name: String,
    pub father_name: String,
    pub mother_name: String,
}

impl StudentDraft {
    fn into_student(self, id: String, class_id: String) -> AppResult<Student> {
        Ok(Student {
            id,
            student_id: required(&self.student_id, "studentId")?,
            name: required(&self.name, "name")?,
            father_name: self.father_name.trim().to_string(),
            mother_name: self.mother_name.trim().to_string(),
            class_id,
        })
    }
}

pub fn add_student(
    classes: &[ClassInfo],
    students: &[Student],
    class_id: &str,
    draft: StudentDraft,
) -> AppResult<(Vec<Student>, Student)> {
    if !classes.iter().any(|c| c.id == class_id) {
        return Err(AppError::not_found("class not found"));
    }
    let student = draft.into_student(new_id(), class_id.to_string())?;
    let mut next = students.to_vec();
    next.push(student.clone());
    Ok((next, student))
}

/// Replaces the editable fields; the student stays in its class.
pub fn update_student(students: &[Student], id: &str, draft: StudentDraft) -> AppResult<(Vec<Student>, Student)> {
    let Some(existing) = students.iter().find(|s| s.id == id) else {
        return Err(AppError::not_found("student not found"));
    };
    let updated = draft.into_student(existing.id.clone(), existing.class_id.clone())?;
    let next = students
        .iter()
        .map(|s| if s.id == id { updated.clone() } else { s.clone() })
        .collect();
    Ok((next, updated))
}

pub fn remove_student(students: &[Student], id: &str) -> AppResult<Vec<Student>> {
    if !students.iter().any(|s| s.id == id) {
        return Err(AppError::not_found("student not found"));
    }
    Ok(students.iter().filter(|s| s.id != id).cloned().collect())
}

pub fn students_in_class<'a>(students: &'a [Student], class_id: &str) -> Vec<&'a Student> {
    students.iter().filter(|s| s.class_id == class_id).collect()
}

/// Stable, so holidays sharing a date keep their relative order.
pub fn sort_holidays(holidays: &mut [Holiday]) {
    holidays.sort_by(|a, b| a.date.cmp(&b.date));
}

fn holiday_date(raw: &str) -> AppResult<String> {
    let d = parse_date(raw).ok_or_else(|| AppError::validation("date must be YYYY-MM-DD"))?;
    Ok(d.format("%Y-%m-%d").to_string())
}

pub fn add_holiday(holidays: &[Holiday], date: &str, name: &str) -> AppResult<(Vec<Holiday>, Holiday)> {
    let holiday = Holiday {
        id: new_id(),
        date: holiday_date(date)?,
        name: required(name, "name")?,
    };
    let mut next = holidays.to_vec();
    next.push(holiday.clone());
    sort_holidays(&mut next);
    Ok((next, holiday))
}

pub fn update_holiday(holidays: &[Holiday], id: &str, date: &str, name: &str) -> AppResult<Vec<Holiday>> {
    let date = holiday_date(date)?;
    let name = required(name, "name")?;
    if !holidays.iter().any(|h| h.id == id) {
        return Err(AppError::not_found("holiday not found"));
    }
    let mut next: Vec<Holiday> = holidays
        .iter()
        .map(|h| {
            if h.id == id {
                Holiday {
                    id: h.id.clone(),
                    date: date.clone(),
                    name: name.clone(),
                }
            } else {
                h.clone()
            }
        })
        .collect();
    sort_holidays(&mut next);
    Ok(next)
}

pub fn remove_holiday(holidays: &[Holiday], id: &str) -> AppResult<Vec<Holiday>> {
    if !holidays.iter().any(|h| h.id == id) {
        return Err(AppError::not_found("holiday not found"));
    }
    let mut next: Vec<Holiday> = holidays.iter().filter(|h| h.id != id).cloned().collect();
    sort_holidays(&mut next);
    Ok(next)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToggleOutcome {
    Added(Holiday),
    Removed(Holiday),
    Unchanged,
}

impl ToggleOutcome {
    pub fn action(&self) -> &'static str {
        match self {
            ToggleOutcome::Added(_) => "added",
            ToggleOutcome::Removed(_) => "removed",
            ToggleOutcome::Unchanged => "unchanged",
        }
    }
}

/// Date-header click: drop the holiday on `date` if there is one, otherwise declare
/// one when a non-blank name was given. Returns `None` for the collection when
/// nothing changed.
pub fn toggle_holiday(
    holidays: &[Holiday],
    date: &str,
    name: Option<&str>,
) -> AppResult<(Option<Vec<Holiday>>, ToggleOutcome)> {
    let date = holiday_date(date)?;
    if let Some(existing) = holidays.iter().find(|h| h.date == date) {
        let next = remove_holiday(holidays, &existing.id)?;
        return Ok((Some(next), ToggleOutcome::Removed(existing.clone())));
    }
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(n) => {
            let (next, added) = add_holiday(holidays, &date, n)?;
            Ok((Some(next), ToggleOutcome::Added(added)))
        }
        None => Ok((None, ToggleOutcome::Unchanged)),
    }
}

pub fn holidays_in_month(holidays: &[Holiday], month: MonthKey) -> Vec<Holiday> {
    let prefix = format!("{}-", month);
    let mut out: Vec<Holiday> = holidays
        .iter()
        .filter(|h| h.date.starts_with(&prefix))
        .cloned()
        .collect();
    sort_holidays(&mut out);
    out
}
