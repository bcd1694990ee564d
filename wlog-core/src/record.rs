use chrono::NaiveDate;

/// Hours spent on a task on a given date, taken from one log line.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    pub line: usize,
    pub date: NaiveDate,
    pub hours: f64,
    pub task: String,
}

/// A `% task -> project` directive, timestamped by its line position.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub line: usize,
    pub date: NaiveDate,
    pub task: String,
    pub project: String,
}

/// Trailing `#`-delimited text on an in-range line.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub line: usize,
    pub date: NaiveDate,
    pub text: String,
}

/// A non-fatal integrity problem found while reading the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub line: usize,
    pub message: String,
}
