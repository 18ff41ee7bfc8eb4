use crate::calendar::{is_sunday, ClockTime};
use crate::model::{AttendanceStatus, DailyAttendance, Holiday, Overrides};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Closed clock-time interval, minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl TimeWindow {
    #[cfg(test)]
    pub fn contains(&self, t: ClockTime) -> bool {
        self.start <= t && t <= self.end
    }
}

pub const IN_WINDOW: TimeWindow = TimeWindow {
    start: ClockTime::from_hm(9, 0),
    end: ClockTime::from_hm(10, 0),
};

pub const OUT_WINDOW: TimeWindow = TimeWindow {
    start: ClockTime::from_hm(16, 0),
    end: ClockTime::from_hm(17, 0),
};

/// Source of placeholder in/out times for cells nobody has touched yet.
pub trait TimeFiller {
    fn draw(&mut self, window: TimeWindow) -> ClockTime;
}

/// Uniform draw over every minute of the window.
pub struct RandomTimes {
    rng: StdRng,
}

impl RandomTimes {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TimeFiller for RandomTimes {
    fn draw(&mut self, window: TimeWindow) -> ClockTime {
        let m = self
            .rng
            .random_range(window.start.minutes()..=window.end.minutes());
        ClockTime::from_minutes(m)
    }
}

/// Always the start of the window.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedTimes;

impl TimeFiller for FixedTimes {
    fn draw(&mut self, window: TimeWindow) -> ClockTime {
        window.start
    }
}

#[derive(Debug, Clone, Default)]
pub struct HolidaySet(HashSet<String>);

impl HolidaySet {
    pub fn from_holidays(holidays: &[Holiday]) -> Self {
        Self(holidays.iter().map(|h| h.date.clone()).collect())
    }

    pub fn contains(&self, date: &str) -> bool {
        self.0.contains(date)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Working,
    Sunday,
    Holiday,
}

impl DayKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DayKind::Working => "working",
            DayKind::Sunday => "sunday",
            DayKind::Holiday => "holiday",
        }
    }

    /// Overlay shown in place of the status cell.
    pub fn glyph(self) -> &'static str {
        match self {
            DayKind::Working => "",
            DayKind::Sunday => "S",
            DayKind::Holiday => "HD",
        }
    }

    pub fn is_working(self) -> bool {
        self == DayKind::Working
    }
}

/// A declared holiday takes the overlay when it falls on a Sunday.
pub fn day_kind(holidays: &HolidaySet, date: &str) -> DayKind {
    if holidays.contains(date) {
        DayKind::Holiday
    } else if is_sunday(date) {
        DayKind::Sunday
    } else {
        DayKind::Working
    }
}

/// The cell a (student, date) pair has when nothing was recorded for it.
pub fn default_cell(holidays: &HolidaySet, date: &str, filler: &mut dyn TimeFiller) -> DailyAttendance {
    if !day_kind(holidays, date).is_working() {
        return DailyAttendance::empty();
    }
    DailyAttendance {
        status: AttendanceStatus::Present,
        in_time: filler.draw(IN_WINDOW).to_string(),
        out_time: filler.draw(OUT_WINDOW).to_string(),
    }
}

/// Override first, derived default otherwise.
pub fn derive(
    overrides: &Overrides,
    holidays: &HolidaySet,
    student_id: &str,
    date: &str,
    filler: &mut dyn TimeFiller,
) -> DailyAttendance {
    if let Some(cell) = overrides.get(student_id, date) {
        return cell.clone();
    }
    default_cell(holidays, date, filler)
}

/// Status part of [`derive`], without drawing placeholder times.
pub fn derive_status(
    overrides: &Overrides,
    holidays: &HolidaySet,
    student_id: &str,
    date: &str,
) -> AttendanceStatus {
    if let Some(cell) = overrides.get(student_id, date) {
        return cell.status;
    }
    if day_kind(holidays, date).is_working() {
        AttendanceStatus::Present
    } else {
        AttendanceStatus::Unset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holidays(dates: &[&str]) -> HolidaySet {
        let hs: Vec<Holiday> = dates
            .iter()
            .enumerate()
            .map(|(i, d)| Holiday {
                id: format!("h{i}"),
                date: d.to_string(),
                name: "Holiday".to_string(),
            })
            .collect();
        HolidaySet::from_holidays(&hs)
    }

    #[test]
    fn sundays_and_holidays_derive_an_empty_cell() {
        let hs = holidays(&["2024-06-05"]);
        let o = Overrides::default();
        let mut filler = RandomTimes::seeded(7);
        // 2024-06-02 and 2024-06-09 are Sundays.
        for date in ["2024-06-02", "2024-06-09", "2024-06-05"] {
            let cell = derive(&o, &hs, "s1", date, &mut filler);
            assert_eq!(cell, DailyAttendance::empty(), "{date}");
        }
    }

    #[test]
    fn working_days_default_to_present_within_windows() {
        let hs = HolidaySet::default();
        let o = Overrides::default();
        let mut filler = RandomTimes::seeded(42);
        for day in 3..=8 {
            let date = format!("2024-06-{:02}", day);
            for _ in 0..50 {
                let cell = derive(&o, &hs, "s1", &date, &mut filler);
                assert_eq!(cell.status, AttendanceStatus::Present);
                let in_t = ClockTime::parse(&cell.in_time).expect("in time");
                let out_t = ClockTime::parse(&cell.out_time).expect("out time");
                assert!(IN_WINDOW.contains(in_t), "{}", cell.in_time);
                assert!(OUT_WINDOW.contains(out_t), "{}", cell.out_time);
            }
        }
    }

    #[test]
    fn random_draw_reaches_both_window_edges() {
        let mut filler = RandomTimes::seeded(1);
        let mut seen_start = false;
        let mut seen_end = false;
        for _ in 0..5000 {
            let t = filler.draw(IN_WINDOW);
            seen_start |= t == IN_WINDOW.start;
            seen_end |= t == IN_WINDOW.end;
        }
        assert!(seen_start && seen_end);
    }

    #[test]
    fn override_wins_even_on_holidays() {
        let hs = holidays(&["2024-06-05"]);
        let mut o = Overrides::default();
        let stored = DailyAttendance {
            status: AttendanceStatus::Leave,
            in_time: String::new(),
            out_time: String::new(),
        };
        o.set("s1", "2024-06-05", stored.clone());
        o.set("s1", "2024-06-04", stored.clone());
        let mut filler = FixedTimes;
        assert_eq!(derive(&o, &hs, "s1", "2024-06-05", &mut filler), stored);
        assert_eq!(derive(&o, &hs, "s1", "2024-06-04", &mut filler), stored);
        // Other students are untouched.
        assert_eq!(
            derive(&o, &hs, "s2", "2024-06-04", &mut filler).status,
            AttendanceStatus::Present
        );
        assert_eq!(derive_status(&o, &hs, "s1", "2024-06-04"), AttendanceStatus::Leave);
    }

    #[test]
    fn default_layer_ignores_overrides_entirely() {
        let hs = HolidaySet::default();
        let cell = default_cell(&hs, "2024-06-04", &mut FixedTimes);
        assert_eq!(cell.in_time, "09:00");
        assert_eq!(cell.out_time, "16:00");
    }

    #[test]
    fn holiday_on_sunday_shows_holiday_glyph() {
        let hs = holidays(&["2024-06-02"]);
        assert_eq!(day_kind(&hs, "2024-06-02").glyph(), "HD");
        assert_eq!(day_kind(&hs, "2024-06-09").glyph(), "S");
        assert_eq!(day_kind(&hs, "2024-06-10"), DayKind::Working);
    }
}
