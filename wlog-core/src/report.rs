//! Aggregation of the accumulated records into day-indexed hour tables.
//!
//! Two pivots come out of a run: hours per task per day, and hours per
//! project per day, the latter obtained by resolving each entry to the
//! nearest assignment at or after the entry's own line.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::record::{Assignment, Comment, TimeEntry, Warning};

/// A sparse label x day hour matrix with derived `TOTAL` margins.
///
/// Rows and date columns iterate in ascending order; cells missing from the
/// underlying data read as `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct DayTable {
    dates: Vec<NaiveDate>,
    rows: BTreeMap<String, BTreeMap<NaiveDate, f64>>,
}

impl DayTable {
    /// Builds a table by summing `(label, date, hours)` cells.
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (String, NaiveDate, f64)>,
    {
        let mut rows: BTreeMap<String, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
        let mut dates = BTreeSet::new();
        for (label, date, hours) in cells {
            *rows.entry(label).or_default().entry(date).or_insert(0.0) += hours;
            dates.insert(date);
        }
        Self {
            dates: dates.into_iter().collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The date columns, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The row labels, ascending.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// One cell, `0.0` when the row never touched that day.
    pub fn value(&self, label: &str, date: NaiveDate) -> f64 {
        self.rows
            .get(label)
            .and_then(|row| row.get(&date))
            .copied()
            .unwrap_or(0.0)
    }

    /// The `TOTAL` column cell for one row.
    pub fn row_total(&self, label: &str) -> f64 {
        self.rows
            .get(label)
            .map(|row| row.values().sum())
            .unwrap_or(0.0)
    }

    /// The `TOTAL` row cell for one day.
    pub fn date_total(&self, date: NaiveDate) -> f64 {
        self.rows.values().filter_map(|row| row.get(&date)).sum()
    }

    /// The corner cell: all hours in the table.
    pub fn grand_total(&self) -> f64 {
        self.rows.values().flat_map(|row| row.values()).sum()
    }
}

/// The aggregated tables plus the per-task candidate project sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub task_table: DayTable,
    pub project_table: DayTable,
    /// Every task seen in an entry or an assignment, mapped to the distinct
    /// projects assigned to it (possibly none, possibly several).
    pub task_projects: BTreeMap<String, BTreeSet<String>>,
}

impl Summary {
    /// Tasks with no assigned project at all.
    pub fn unassigned_tasks(&self) -> Vec<&str> {
        self.task_projects
            .iter()
            .filter(|(_, projects)| projects.is_empty())
            .map(|(task, _)| task.as_str())
            .collect()
    }

    /// Tasks assigned to two or more projects, with their candidate lists.
    pub fn multiply_assigned_tasks(&self) -> Vec<(&str, &BTreeSet<String>)> {
        self.task_projects
            .iter()
            .filter(|(_, projects)| projects.len() >= 2)
            .map(|(task, projects)| (task.as_str(), projects))
            .collect()
    }
}

/// Everything a run produces: the summary (absent when there is no data),
/// plus the ordered comment and warning lists.
#[derive(Debug)]
pub struct Report {
    pub summary: Option<Summary>,
    pub comments: Vec<Comment>,
    pub warnings: Vec<Warning>,
}

/// Aggregates entries and assignments into a [`Summary`].
///
/// Returns `None` when either side is empty; a log with hours but no
/// assignments (or the other way round) has nothing to report, which is a
/// legitimate terminal state rather than an error.
pub fn summarize(entries: &[TimeEntry], assignments: &[Assignment]) -> Option<Summary> {
    if entries.is_empty() || assignments.is_empty() {
        return None;
    }

    let mut task_projects: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for entry in entries {
        task_projects.entry(entry.task.clone()).or_default();
    }
    for assignment in assignments {
        task_projects
            .entry(assignment.task.clone())
            .or_default()
            .insert(assignment.project.clone());
    }

    // Only tasks with at least one assignment make it into the tables.
    let assigned: BTreeSet<&str> = assignments.iter().map(|a| a.task.as_str()).collect();
    let retained: Vec<&TimeEntry> = entries
        .iter()
        .filter(|e| assigned.contains(e.task.as_str()))
        .collect();

    let task_table = DayTable::from_cells(
        retained
            .iter()
            .map(|e| (e.task.clone(), e.date, e.hours)),
    );

    let project_table = DayTable::from_cells(retained.iter().filter_map(|entry| {
        resolve_project(entry, assignments).map(|project| (project.to_string(), entry.date, entry.hours))
    }));

    Some(Summary {
        task_table,
        project_table,
        task_projects,
    })
}

/// The assignment governing an entry: among assignments for the same task
/// declared at or after the entry's line, the one with the smallest line
/// number. Assignments declared strictly before the entry never apply.
fn resolve_project<'a>(entry: &TimeEntry, assignments: &'a [Assignment]) -> Option<&'a str> {
    assignments
        .iter()
        .filter(|a| a.task == entry.task && a.line >= entry.line)
        .min_by_key(|a| a.line)
        .map(|a| a.project.as_str())
}
