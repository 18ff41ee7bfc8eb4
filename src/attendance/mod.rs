//! Attendance sheet engine: default derivation, the sparse override layer on top of
//! it, monthly summaries, and the (student x date) grid for a class.

pub mod derive;
pub mod edit;
pub mod sheet;
pub mod summary;

pub use derive::{
    day_kind, derive, derive_status, FixedTimes, HolidaySet, RandomTimes, TimeFiller,
};
pub use edit::{apply_edit, cycle_status, EditField};
pub use sheet::{build_sheet, render_month, MonthView, Sheet};
pub use summary::{month_summary, MonthSummary};
