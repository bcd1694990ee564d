//! Stateless pattern matching for a single work-log line.
//!
//! A line is consumed left to right: an optional `YYYY-MM-DD` date, then a
//! `HH:MM-HH:MM` interval (or a bare `HH:MM` time), then either a task name
//! or a `% task -> project` assignment, then a trailing `# comment`.
//! Whatever survives all of that is returned untouched in `rest`.

use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?P<year>[0-9]{4})-(?P<month>1[0-2]|0[1-9])-(?P<day>3[01]|0[1-9]|[12][0-9])(?P<rest>.*)$",
    )
    .unwrap()
});

static TIME_INTERVAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?P<hour_from>2[0-3]|[01][0-9]):(?P<minute_from>[0-5][0-9])\s*-\s*(?P<hour_to>2[0-3]|[01][0-9]):(?P<minute_to>[0-5][0-9])(?P<rest>.*)$",
    )
    .unwrap()
});

static TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(?P<hour>2[0-3]|[01][0-9]):(?P<minute>[0-5][0-9])(?P<rest>.*)$").unwrap()
});

static TASK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(?P<task>[^#]+)(?P<rest>.*)$").unwrap());

static ASSIGNMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*%\s*(?P<task>[^#]+)->(?P<project>[^#]+)(?P<rest>.*)$").unwrap());

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*#\s*(?P<text>.*)$").unwrap());

/// A clock interval within one day, minute resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub hour_from: u32,
    pub minute_from: u32,
    pub hour_to: u32,
    pub minute_to: u32,
}

impl TimeInterval {
    pub fn start(&self) -> (u32, u32) {
        (self.hour_from, self.minute_from)
    }

    pub fn end(&self) -> (u32, u32) {
        (self.hour_to, self.minute_to)
    }

    /// An interval that does not advance the clock (start >= end).
    pub fn is_backwards(&self) -> bool {
        self.start() >= self.end()
    }

    /// Elapsed hours, floored at zero for backwards intervals.
    ///
    /// # Examples
    ///
    /// ```
    /// # use wlog_core::interpret::TimeInterval;
    /// let iv = TimeInterval { hour_from: 9, minute_from: 0, hour_to: 10, minute_to: 30 };
    /// assert_eq!(iv.elapsed_hours(), 1.5);
    /// ```
    pub fn elapsed_hours(&self) -> f64 {
        let hours = f64::from(self.hour_to as i32 - self.hour_from as i32);
        let minutes = f64::from(self.minute_to as i32 - self.minute_from as i32);
        (hours + round2(minutes / 60.0)).max(0.0)
    }
}

impl fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02} - {:02}:{:02}",
            self.hour_from, self.minute_from, self.hour_to, self.minute_to
        )
    }
}

/// Everything one line can carry. All fields are optional; `rest` holds the
/// trimmed text no pattern consumed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineFields {
    pub date: Option<NaiveDate>,
    pub interval: Option<TimeInterval>,
    pub elapsed: Option<f64>,
    pub task: Option<String>,
    pub project: Option<String>,
    pub comment: Option<String>,
    pub rest: String,
}

/// Matches one raw line against the grammar, in precedence order.
///
/// Pure and stateless: carried-date and overlap rules live in
/// [`crate::monitor::Monitor`], which interprets these fields in sequence.
pub fn analyze_line(line: &str) -> LineFields {
    let mut fields = LineFields::default();
    let mut remainder = line;

    if let Some(caps) = DATE.captures(remainder) {
        let year: i32 = caps["year"].parse().unwrap();
        let month: u32 = caps["month"].parse().unwrap();
        let day: u32 = caps["day"].parse().unwrap();
        // A syntactically valid but non-existent date (e.g. Feb 31) is left
        // unconsumed and ends up as unrecognized residue.
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            fields.date = Some(date);
            remainder = caps.name("rest").unwrap().as_str();
        }
    }

    if let Some(caps) = TIME_INTERVAL.captures(remainder) {
        let interval = TimeInterval {
            hour_from: caps["hour_from"].parse().unwrap(),
            minute_from: caps["minute_from"].parse().unwrap(),
            hour_to: caps["hour_to"].parse().unwrap(),
            minute_to: caps["minute_to"].parse().unwrap(),
        };
        fields.elapsed = Some(interval.elapsed_hours());
        fields.interval = Some(interval);
        remainder = caps.name("rest").unwrap().as_str();
    } else if let Some(caps) = TIME.captures(remainder) {
        let hour: u32 = caps["hour"].parse().unwrap();
        let minute: u32 = caps["minute"].parse().unwrap();
        fields.elapsed = Some(f64::from(hour) + round2(f64::from(minute) / 60.0));
        remainder = caps.name("rest").unwrap().as_str();
    }

    if fields.elapsed.is_some() {
        if let Some(caps) = TASK.captures(remainder) {
            let task = caps["task"].trim();
            if !task.is_empty() {
                fields.task = Some(task.to_string());
            }
            remainder = caps.name("rest").unwrap().as_str();
        }
    } else if let Some(caps) = ASSIGNMENT.captures(remainder) {
        let task = caps["task"].trim();
        let project = caps["project"].trim();
        if !task.is_empty() {
            fields.task = Some(task.to_string());
        }
        if !project.is_empty() {
            fields.project = Some(project.to_string());
        }
        remainder = caps.name("rest").unwrap().as_str();
    }

    if let Some(caps) = COMMENT.captures(remainder) {
        fields.comment = Some(caps["text"].trim().to_string());
        remainder = "";
    }

    fields.rest = remainder.trim().to_string();
    fields
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
