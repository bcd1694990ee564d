//! The stateful run over a work log: carried date/time context, integrity
//! warnings, and the three accumulated record tables.

use chrono::NaiveDate;

use crate::interpret::{TimeInterval, analyze_line};
use crate::record::{Assignment, Comment, TimeEntry, Warning};
use crate::report::{Report, summarize};

/// Processes a work log line by line, carrying date and time context
/// forward, and accumulates entries, assignments, comments and warnings.
///
/// Only records whose effective date falls inside `[date_from, date_toex)`
/// are retained; warnings are recorded for the whole log regardless.
/// Nothing in the log can make processing fail.
#[derive(Debug)]
pub struct Monitor {
    date_from: NaiveDate,
    date_toex: NaiveDate,
    line: usize,
    date: Option<NaiveDate>,
    date_line: usize,
    interval: Option<TimeInterval>,
    interval_line: usize,
    entries: Vec<TimeEntry>,
    assignments: Vec<Assignment>,
    comments: Vec<Comment>,
    warnings: Vec<Warning>,
}

impl Monitor {
    /// A fresh run over the half-open date range `[date_from, date_toex)`.
    pub fn new(date_from: NaiveDate, date_toex: NaiveDate) -> Self {
        Self {
            date_from,
            date_toex,
            line: 0,
            date: None,
            date_line: 0,
            interval: None,
            interval_line: 0,
            entries: Vec::new(),
            assignments: Vec::new(),
            comments: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Feeds every line through [`Self::process_line`], in order.
    pub fn process<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.process_line(line.as_ref());
        }
    }

    /// Processes one physical line.
    ///
    /// Line numbers are 1-based and count every line fed in, including blank
    /// and out-of-range ones; they are the tie-break key for assignment
    /// resolution later.
    pub fn process_line(&mut self, raw: &str) {
        let fields = analyze_line(raw);
        self.line += 1;

        let mut date_changed = false;
        if let Some(date) = fields.date {
            date_changed = true;
            if let Some(prev) = self.date {
                if date < prev {
                    self.warn(format!(
                        "The date {} on line {} is smaller than the previous date {} on line {}",
                        date.format("%Y-%m-%d"),
                        self.line,
                        prev.format("%Y-%m-%d"),
                        self.date_line
                    ));
                } else if date == prev {
                    date_changed = false;
                }
            }
            self.date = Some(date);
            self.date_line = self.line;
        }

        if let Some(interval) = fields.interval {
            if interval.is_backwards() {
                self.warn(format!(
                    "The time {} on line {} is illegal",
                    interval, self.line
                ));
            }
        }

        if date_changed {
            // A new day: whatever interval this line carries becomes the
            // whole time context, with no overlap check against yesterday.
            self.interval = fields.interval;
            self.interval_line = self.line;
        } else if let Some(interval) = fields.interval {
            if let Some(prev) = self.interval {
                if interval.start() < prev.end() {
                    self.warn(format!(
                        "The time {} on line {} overlaps the previous time {} on line {}",
                        interval, self.line, prev, self.interval_line
                    ));
                }
            }
            self.interval = Some(interval);
            self.interval_line = self.line;
        }

        if !fields.rest.is_empty() {
            self.warn(format!(
                "Unrecognized content on line {}: {}",
                self.line, fields.rest
            ));
        }

        let Some(date) = self.date else { return };
        if date < self.date_from || date >= self.date_toex {
            return;
        }
        if let (Some(hours), Some(task)) = (fields.elapsed, fields.task.as_deref()) {
            self.entries.push(TimeEntry {
                line: self.line,
                date,
                hours,
                task: task.to_string(),
            });
        }
        if let (Some(task), Some(project)) = (fields.task, fields.project) {
            self.assignments.push(Assignment {
                line: self.line,
                date,
                task,
                project,
            });
        }
        if let Some(text) = fields.comment {
            self.comments.push(Comment {
                line: self.line,
                date,
                text,
            });
        }
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Consumes the run and aggregates it into a [`Report`].
    pub fn finish(self) -> Report {
        let summary = summarize(&self.entries, &self.assignments);
        Report {
            summary,
            comments: self.comments,
            warnings: self.warnings,
        }
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(Warning {
            line: self.line,
            message,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn mk_monitor() -> Monitor {
        Monitor::new(date(2021, 1, 1), date(2021, 2, 1))
    }

    #[test]
    fn date_only_line_updates_context_and_emits_nothing() {
        let mut m = mk_monitor();
        m.process_line("2021-01-05");
        assert!(m.entries().is_empty());
        assert!(m.assignments().is_empty());
        assert!(m.comments().is_empty());
        assert!(m.warnings().is_empty());
    }

    #[test]
    fn entry_uses_carried_date() {
        let mut m = mk_monitor();
        m.process(["2021-01-05", "09:00-10:00 writing"]);
        assert_eq!(m.entries().len(), 1);
        let e = &m.entries()[0];
        assert_eq!(e.line, 2);
        assert_eq!(e.date, date(2021, 1, 5));
        assert_eq!(e.hours, 1.0);
        assert_eq!(e.task, "writing");
    }

    #[test]
    fn date_regression_warns_but_adopts_new_date() {
        let mut m = mk_monitor();
        m.process(["2021-01-10", "2021-01-05", "09:00-10:00 x"]);
        assert_eq!(m.warnings().len(), 1);
        assert!(m.warnings()[0].message.contains("smaller than the previous date"));
        assert_eq!(m.warnings()[0].line, 2);
        assert_eq!(m.entries()[0].date, date(2021, 1, 5));
    }

    #[test]
    fn overlap_on_same_date_warns_once() {
        let mut m = mk_monitor();
        m.process(["2021-01-05", "09:00-11:00 a", "10:00-12:00 b"]);
        let overlaps: Vec<_> = m
            .warnings()
            .iter()
            .filter(|w| w.message.contains("overlaps"))
            .collect();
        assert_eq!(overlaps.len(), 1);
        assert_eq!(overlaps[0].line, 3);
    }

    #[test]
    fn repeated_date_keeps_overlap_check_alive() {
        let mut m = mk_monitor();
        m.process(["2021-01-05 09:00-11:00 a", "2021-01-05 10:00-12:00 b"]);
        assert_eq!(m.warnings().len(), 1);
        assert!(m.warnings()[0].message.contains("overlaps"));
    }

    #[test]
    fn new_date_resets_time_context() {
        let mut m = mk_monitor();
        m.process(["2021-01-05 09:00-11:00 a", "2021-01-06 10:00-12:00 b"]);
        assert!(m.warnings().is_empty());
    }

    #[test]
    fn illegal_interval_warns_and_keeps_zero_hour_entry() {
        let mut m = mk_monitor();
        m.process(["2021-01-05 09:00-08:00 x"]);
        assert_eq!(m.warnings().len(), 1);
        assert!(m.warnings()[0].message.contains("is illegal"));
        assert_eq!(m.entries().len(), 1);
        assert_eq!(m.entries()[0].hours, 0.0);
    }

    #[test]
    fn single_time_skips_interval_state() {
        let mut m = mk_monitor();
        // Bare times never arm the overlap check.
        m.process(["2021-01-05", "11:00 a", "09:00-10:00 b"]);
        assert!(m.warnings().is_empty());
        assert_eq!(m.entries().len(), 2);
        assert_eq!(m.entries()[0].hours, 11.0);
    }

    #[test]
    fn records_without_a_known_date_are_dropped() {
        let mut m = mk_monitor();
        m.process(["09:00-10:00 early bird", "% early bird -> nothing"]);
        assert!(m.entries().is_empty());
        assert!(m.assignments().is_empty());
    }

    #[test]
    fn out_of_range_dates_keep_warnings_only() {
        let mut m = mk_monitor();
        m.process(["2020-12-31", "09:00-11:00 a", "10:00-12:00 b", "# note"]);
        assert!(m.entries().is_empty());
        assert!(m.comments().is_empty());
        assert_eq!(m.warnings().len(), 1);
        assert!(m.warnings()[0].message.contains("overlaps"));
    }

    #[test]
    fn range_is_half_open() {
        let mut m = mk_monitor();
        m.process(["2021-02-01", "09:00-10:00 too late"]);
        assert!(m.entries().is_empty());
        m.process(["2021-01-01", "09:00-10:00 just in time"]);
        assert_eq!(m.entries().len(), 1);
    }

    #[test]
    fn assignment_and_comment_are_recorded() {
        let mut m = mk_monitor();
        m.process(["2021-01-05", "% writing -> bookA # pen name"]);
        assert_eq!(m.assignments().len(), 1);
        let a = &m.assignments()[0];
        assert_eq!((a.line, a.task.as_str(), a.project.as_str()), (2, "writing", "bookA"));
        assert_eq!(m.comments().len(), 1);
        assert_eq!(m.comments()[0].text, "pen name");
    }

    #[test]
    fn unrecognized_residue_warns() {
        let mut m = mk_monitor();
        m.process(["2021-01-05", "% dangling"]);
        assert_eq!(m.warnings().len(), 1);
        assert!(m.warnings()[0].message.contains("Unrecognized content"));
        assert!(m.warnings()[0].message.contains("% dangling"));
    }

    #[test]
    fn line_numbers_count_every_line() {
        let mut m = mk_monitor();
        m.process(["", "2021-01-05", "", "09:00-10:00 x"]);
        assert_eq!(m.entries()[0].line, 4);
    }
}
