use super::derive::{day_kind, derive, HolidaySet, TimeFiller};
use super::summary::{month_summary, MonthSummary};
use crate::calendar::{duration, weekday_initial, MonthKey};
use crate::error::{AppError, AppResult};
use crate::model::{ClassInfo, Holiday, Overrides, Student};
use crate::records::holidays_in_month;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthDescriptor {
    /// `YYYY-MM`
    pub key: String,
    pub year: i32,
    /// Zero-based.
    pub month: u32,
    pub month_name: String,
    pub days: Vec<u32>,
}

impl MonthDescriptor {
    pub fn from_key(key: MonthKey) -> Self {
        Self {
            key: key.to_string(),
            year: key.year,
            month: key.month_index(),
            month_name: key.name().to_string(),
            days: (1..=key.days()).collect(),
        }
    }

    pub fn month_key(&self) -> MonthKey {
        MonthKey {
            year: self.year,
            month: self.month + 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sheet {
    pub class_id: String,
    pub class_name: String,
    pub students: Vec<Student>,
    pub months: Vec<MonthDescriptor>,
}

/// Inclusive calendar-month range. An inverted range is empty.
pub fn month_range(start: MonthKey, end: MonthKey) -> Vec<MonthDescriptor> {
    let mut out = Vec::new();
    let mut cur = start;
    while cur <= end {
        out.push(MonthDescriptor::from_key(cur));
        cur = cur.next();
    }
    out
}

fn roster_order(a: &Student, b: &Student) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn build_sheet(
    classes: &[ClassInfo],
    students: &[Student],
    class_id: &str,
    start_month: &str,
    end_month: &str,
) -> AppResult<Sheet> {
    if class_id.trim().is_empty() || start_month.trim().is_empty() || end_month.trim().is_empty() {
        return Err(AppError::validation("select a class and month range"));
    }
    let start = MonthKey::parse(start_month).map_err(AppError::Validation)?;
    let end = MonthKey::parse(end_month).map_err(AppError::Validation)?;
    let Some(class) = classes.iter().find(|c| c.id == class_id) else {
        return Err(AppError::not_found("class not found"));
    };

    let mut roster: Vec<Student> = students
        .iter()
        .filter(|s| s.class_id == class_id)
        .cloned()
        .collect();
    roster.sort_by(roster_order);

    Ok(Sheet {
        class_id: class.id.clone(),
        class_name: class.name.clone(),
        students: roster,
        months: month_range(start, end),
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayHeader {
    pub day: u32,
    pub date: String,
    pub weekday: &'static str,
    pub kind: &'static str,
    pub glyph: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub date: String,
    pub status: &'static str,
    pub in_time: String,
    pub out_time: String,
    pub duration: String,
    pub glyph: &'static str,
    pub editable: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow {
    pub id: String,
    pub student_id: String,
    pub name: String,
    pub father_name: String,
    pub mother_name: String,
    pub summary: MonthSummary,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub index: usize,
    pub month_count: usize,
    #[serde(flatten)]
    pub month: MonthDescriptor,
    pub headers: Vec<DayHeader>,
    pub rows: Vec<StudentRow>,
    pub holidays: Vec<Holiday>,
}

/// One page of the sheet. Sunday and holiday columns carry their glyph and no cell
/// data, whatever the override log holds for them.
pub fn render_month(
    sheet: &Sheet,
    index: usize,
    overrides: &Overrides,
    holidays: &[Holiday],
    filler: &mut dyn TimeFiller,
) -> AppResult<MonthView> {
    let Some(month) = sheet.months.get(index) else {
        return Err(AppError::validation(format!(
            "month index {} out of range (sheet has {} months)",
            index,
            sheet.months.len()
        )));
    };
    let key = month.month_key();
    let set = HolidaySet::from_holidays(holidays);

    let headers: Vec<DayHeader> = month
        .days
        .iter()
        .map(|&day| {
            let date = key.date_key(day);
            let kind = day_kind(&set, &date);
            DayHeader {
                day,
                weekday: weekday_initial(&date),
                kind: kind.as_str(),
                glyph: kind.glyph(),
                date,
            }
        })
        .collect();

    let rows = sheet
        .students
        .iter()
        .map(|s| {
            let cells = headers
                .iter()
                .map(|h| {
                    if !h.glyph.is_empty() {
                        return CellView {
                            date: h.date.clone(),
                            status: "",
                            in_time: String::new(),
                            out_time: String::new(),
                            duration: "-".to_string(),
                            glyph: h.glyph,
                            editable: false,
                        };
                    }
                    let cell = derive(overrides, &set, &s.id, &h.date, &mut *filler);
                    CellView {
                        date: h.date.clone(),
                        status: cell.status.code(),
                        duration: duration(&cell.in_time, &cell.out_time),
                        in_time: cell.in_time,
                        out_time: cell.out_time,
                        glyph: "",
                        editable: true,
                    }
                })
                .collect();
            StudentRow {
                id: s.id.clone(),
                student_id: s.student_id.clone(),
                name: s.name.clone(),
                father_name: s.father_name.clone(),
                mother_name: s.mother_name.clone(),
                summary: month_summary(overrides, &set, &s.id, key),
                cells,
            }
        })
        .collect();

    Ok(MonthView {
        index,
        month_count: sheet.months.len(),
        month: month.clone(),
        headers,
        rows,
        holidays: holidays_in_month(holidays, key),
    })
}
