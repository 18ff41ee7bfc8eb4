use super::derive::{day_kind, derive_status, HolidaySet};
use crate::calendar::MonthKey;
use crate::model::{AttendanceStatus, Overrides};
use serde::Serialize;

/// Monthly percentages under this are flagged.
pub const LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub present: u32,
    pub absent: u32,
    pub leave: u32,
    pub working_days: u32,
    /// Two decimals, e.g. `"80.00"`.
    pub percentage: String,
    pub below_threshold: bool,
}

pub fn month_summary(
    overrides: &Overrides,
    holidays: &HolidaySet,
    student_id: &str,
    month: MonthKey,
) -> MonthSummary {
    let mut present = 0;
    let mut absent = 0;
    let mut leave = 0;
    let mut working_days = 0;

    for day in 1..=month.days() {
        let date = month.date_key(day);
        if !day_kind(holidays, &date).is_working() {
            continue;
        }
        working_days += 1;
        match derive_status(overrides, holidays, student_id, &date) {
            AttendanceStatus::Present => present += 1,
            AttendanceStatus::Absent => absent += 1,
            AttendanceStatus::Leave => leave += 1,
            AttendanceStatus::Holiday | AttendanceStatus::Unset => {}
        }
    }

    let percentage = if working_days > 0 {
        format!("{:.2}", f64::from(present) / f64::from(working_days) * 100.0)
    } else {
        "0.00".to_string()
    };
    // Compare what is displayed, not the unrounded ratio.
    let below_threshold = percentage
        .parse::<f64>()
        .map(|p| p < LOW_ATTENDANCE_THRESHOLD)
        .unwrap_or(true);

    MonthSummary {
        present,
        absent,
        leave,
        working_days,
        percentage,
        below_threshold,
    }
}
