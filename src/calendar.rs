use chrono::{Datelike, Month, NaiveDate, Weekday};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl MonthKey {
    /// Parses `YYYY-MM`. Returns a message suitable for a bad_params reply.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let t = raw.trim();
        let Some((y, m)) = t.split_once('-') else {
            return Err("month must be YYYY-MM".to_string());
        };
        if y.len() != 4 || !y.bytes().all(|b| b.is_ascii_digit()) {
            return Err("month year must have four digits".to_string());
        }
        if m.len() != 2 || !m.bytes().all(|b| b.is_ascii_digit()) {
            return Err("month must be YYYY-MM".to_string());
        }
        let year = y
            .parse::<i32>()
            .map_err(|_| "month year must be numeric".to_string())?;
        let month = m
            .parse::<u32>()
            .map_err(|_| "month must be YYYY-MM".to_string())?;
        if !(1..=12).contains(&month) {
            return Err("month must be between 01 and 12".to_string());
        }
        Ok(Self { year, month })
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn days(self) -> u32 {
        days_in_month(self.year, self.month)
    }

    /// Zero-based month index, as the front-end counts months.
    pub fn month_index(self) -> u32 {
        self.month - 1
    }

    pub fn name(self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("")
    }

    pub fn date_key(self, day: u32) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, day)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if leap => 29,
        2 => 28,
        _ => 30,
    }
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Unparseable dates are never Sundays; they still fall through to the default cell.
pub fn is_sunday(date: &str) -> bool {
    parse_date(date)
        .map(|d| d.weekday() == Weekday::Sun)
        .unwrap_or(false)
}

/// First letter of the short English weekday name (`S`, `M`, `T`, ...).
pub fn weekday_initial(date: &str) -> &'static str {
    let Some(d) = parse_date(date) else {
        return "";
    };
    match d.weekday() {
        Weekday::Mon => "M",
        Weekday::Tue | Weekday::Thu => "T",
        Weekday::Wed => "W",
        Weekday::Fri => "F",
        Weekday::Sat | Weekday::Sun => "S",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    minutes: u32,
}

impl ClockTime {
    pub const fn from_hm(hours: u32, minutes: u32) -> Self {
        Self {
            minutes: hours * 60 + minutes,
        }
    }

    pub const fn from_minutes(minutes: u32) -> Self {
        Self { minutes }
    }

    pub fn minutes(self) -> u32 {
        self.minutes
    }

    /// Strict 24-hour `HH:MM`.
    pub fn parse(raw: &str) -> Option<Self> {
        let (h, m) = raw.trim().split_once(':')?;
        let two_digits = |p: &str| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit());
        if !two_digits(h) || !two_digits(m) {
            return None;
        }
        let h = h.parse::<u32>().ok()?;
        let m = m.parse::<u32>().ok()?;
        if h > 23 || m > 59 {
            return None;
        }
        Some(Self::from_hm(h, m))
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes / 60, self.minutes % 60)
    }
}

/// Same-day span between two clock times as `HH:MM`, or `-` when it is undefined.
pub fn duration(in_time: &str, out_time: &str) -> String {
    if in_time.trim().is_empty() || out_time.trim().is_empty() {
        return "-".to_string();
    }
    let (Some(start), Some(end)) = (ClockTime::parse(in_time), ClockTime::parse(out_time)) else {
        return "-".to_string();
    };
    if end <= start {
        return "-".to_string();
    }
    ClockTime::from_minutes(end.minutes() - start.minutes()).to_string()
}
