use crate::db;
use crate::error::StoreError;
use crate::model::{ClassInfo, Holiday, Institute, Overrides, Student};
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, warn};

pub const KEY_PREFIX: &str = "attendanceApp_";
pub const AUTH_FLAG_KEY: &str = "isAuthenticated";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    CollegeInfo,
    Classes,
    Students,
    Holidays,
    Attendance,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::CollegeInfo => "collegeInfo",
            Collection::Classes => "classes",
            Collection::Students => "students",
            Collection::Holidays => "holidays",
            Collection::Attendance => "attendance",
        }
    }

    pub fn key(self) -> String {
        format!("{}{}", KEY_PREFIX, self.name())
    }
}

/// Whole-collection get/save over the workspace kv table.
///
/// Each call is one round-trip and waits out a fixed latency first. There are no
/// transactions across collections.
pub struct RecordStore {
    conn: Connection,
    latency: Duration,
    attendance_latency: Duration,
}

impl RecordStore {
    pub fn open(workspace: &Path, latency: Duration, attendance_latency: Duration) -> anyhow::Result<Self> {
        let conn = db::open_db(workspace)?;
        Ok(Self {
            conn,
            latency,
            attendance_latency,
        })
    }

    fn wait(&self, collection: Option<Collection>) {
        let d = match collection {
            Some(Collection::Attendance) => self.attendance_latency,
            _ => self.latency,
        };
        if !d.is_zero() {
            std::thread::sleep(d);
        }
    }

    fn read_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        db::kv_get(&self.conn, key).map_err(|source| {
            error!(key, error = %source, "store read failed");
            StoreError::Read {
                key: key.to_string(),
                source,
            }
        })
    }

    fn write_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        db::kv_set(&self.conn, key, value).map_err(|source| {
            error!(key, error = %source, "store write failed");
            StoreError::Write {
                key: key.to_string(),
                source,
            }
        })
    }

    fn get<T: DeserializeOwned>(&self, collection: Collection, default: T) -> Result<T, StoreError> {
        self.wait(Some(collection));
        let key = collection.key();
        let Some(raw) = self.read_raw(&key)? else {
            return Ok(default);
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Ok(v),
            Err(e) => {
                // Unreadable payloads behave like an absent key.
                warn!(key = %key, error = %e, "stored value is not valid JSON; using default");
                Ok(default)
            }
        }
    }

    fn save<T: Serialize>(&self, collection: Collection, value: &T) -> Result<(), StoreError> {
        self.wait(Some(collection));
        let key = collection.key();
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Write {
            key: key.clone(),
            source: e.into(),
        })?;
        self.write_raw(&key, &raw)?;
        debug!(key = %key, bytes = raw.len(), "collection saved");
        Ok(())
    }

    pub fn get_institute(&self) -> Result<Institute, StoreError> {
        self.get(Collection::CollegeInfo, Institute::default())
    }

    pub fn save_institute(&self, info: &Institute) -> Result<(), StoreError> {
        self.save(Collection::CollegeInfo, info)
    }

    pub fn get_classes(&self) -> Result<Vec<ClassInfo>, StoreError> {
        self.get(Collection::Classes, Vec::new())
    }

    pub fn save_classes(&self, classes: &[ClassInfo]) -> Result<(), StoreError> {
        self.save(Collection::Classes, &classes)
    }

    pub fn get_students(&self) -> Result<Vec<Student>, StoreError> {
        self.get(Collection::Students, Vec::new())
    }

    pub fn save_students(&self, students: &[Student]) -> Result<(), StoreError> {
        self.save(Collection::Students, &students)
    }

    pub fn get_holidays(&self) -> Result<Vec<Holiday>, StoreError> {
        self.get(Collection::Holidays, Vec::new())
    }

    pub fn save_holidays(&self, holidays: &[Holiday]) -> Result<(), StoreError> {
        self.save(Collection::Holidays, &holidays)
    }

    pub fn get_attendance(&self) -> Result<Overrides, StoreError> {
        self.get(Collection::Attendance, Overrides::default())
    }

    pub fn save_attendance(&self, overrides: &Overrides) -> Result<(), StoreError> {
        self.save(Collection::Attendance, overrides)
    }

    pub fn is_authenticated(&self) -> Result<bool, StoreError> {
        Ok(self.read_raw(AUTH_FLAG_KEY)?.as_deref() == Some("true"))
    }

    pub fn set_authenticated(&self, value: bool) -> Result<(), StoreError> {
        if value {
            self.write_raw(AUTH_FLAG_KEY, "true")
        } else {
            db::kv_delete(&self.conn, AUTH_FLAG_KEY).map_err(|source| StoreError::Write {
                key: AUTH_FLAG_KEY.to_string(),
                source,
            })
        }
    }
}
