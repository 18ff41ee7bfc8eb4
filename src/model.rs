use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Institute {
    pub name: String,
    pub address: String,
}

impl Default for Institute {
    fn default() -> Self {
        Self {
            name: "My Institute".to_string(),
            address: "123 Education Lane".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    /// User-facing identifier, e.g. a roll number.
    pub student_id: String,
    pub name: String,
    #[serde(default)]
    pub father_name: String,
    #[serde(default)]
    pub mother_name: String,
    pub class_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: String,
    /// YYYY-MM-DD
    pub date: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "P")]
    Present,
    #[serde(rename = "A")]
    Absent,
    #[serde(rename = "L")]
    Leave,
    #[serde(rename = "H")]
    Holiday,
    #[default]
    #[serde(rename = "")]
    Unset,
}

impl AttendanceStatus {
    pub fn code(self) -> &'static str {
        match self {
            AttendanceStatus::Present => "P",
            AttendanceStatus::Absent => "A",
            AttendanceStatus::Leave => "L",
            AttendanceStatus::Holiday => "H",
            AttendanceStatus::Unset => "",
        }
    }

    /// Accepts the stored single-letter codes as well as the long names.
    pub fn parse(raw: &str) -> Option<Self> {
        let t = raw.trim();
        match t.to_ascii_lowercase().as_str() {
            "p" | "present" => Some(AttendanceStatus::Present),
            "a" | "absent" => Some(AttendanceStatus::Absent),
            "l" | "leave" => Some(AttendanceStatus::Leave),
            "h" | "holiday" => Some(AttendanceStatus::Holiday),
            "" | "unset" => Some(AttendanceStatus::Unset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAttendance {
    #[serde(default)]
    pub status: AttendanceStatus,
    #[serde(default)]
    pub in_time: String,
    #[serde(default)]
    pub out_time: String,
}

impl DailyAttendance {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Sparse attendance log: student record id -> date -> explicitly set cell.
///
/// Anything missing is derived again on read, so this is all that gets persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overrides(pub BTreeMap<String, BTreeMap<String, DailyAttendance>>);

impl Overrides {
    pub fn get(&self, student_id: &str, date: &str) -> Option<&DailyAttendance> {
        self.0.get(student_id).and_then(|days| days.get(date))
    }

    pub fn set(&mut self, student_id: &str, date: &str, cell: DailyAttendance) {
        self.0
            .entry(student_id.to_string())
            .or_default()
            .insert(date.to_string(), cell);
    }

    pub fn cell_count(&self) -> usize {
        self.0.values().map(|days| days.len()).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewType {
    Dashboard,
    College,
    Classes,
    Students,
    Attendance,
    Holidays,
}

impl ViewType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "dashboard" => Some(ViewType::Dashboard),
            "college" | "institute" => Some(ViewType::College),
            "classes" => Some(ViewType::Classes),
            "students" => Some(ViewType::Students),
            "attendance" => Some(ViewType::Attendance),
            "holidays" => Some(ViewType::Holidays),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_single_letter_codes() {
        let cell = DailyAttendance {
            status: AttendanceStatus::Leave,
            in_time: String::new(),
            out_time: String::new(),
        };
        let v = serde_json::to_value(&cell).expect("serialize");
        assert_eq!(v["status"], "L");
        assert_eq!(v["inTime"], "");

        let unset: DailyAttendance =
            serde_json::from_str(r#"{"status":"","inTime":"","outTime":""}"#).expect("parse");
        assert_eq!(unset.status, AttendanceStatus::Unset);
    }

    #[test]
    fn overrides_keep_the_stored_nested_shape() {
        let raw = r#"{"s1":{"2024-03-04":{"status":"A","inTime":"","outTime":""}}}"#;
        let o: Overrides = serde_json::from_str(raw).expect("parse overrides");
        assert_eq!(
            o.get("s1", "2024-03-04").map(|c| c.status),
            Some(AttendanceStatus::Absent)
        );
        assert!(o.get("s1", "2024-03-05").is_none());
        assert_eq!(o.cell_count(), 1);
        assert_eq!(serde_json::to_string(&o).expect("serialize"), raw);
    }

    #[test]
    fn status_parse_accepts_long_names() {
        assert_eq!(AttendanceStatus::parse("present"), Some(AttendanceStatus::Present));
        assert_eq!(AttendanceStatus::parse(" A "), Some(AttendanceStatus::Absent));
        assert_eq!(AttendanceStatus::parse(""), Some(AttendanceStatus::Unset));
        assert_eq!(AttendanceStatus::parse("x"), None);
    }
}
