//! Plain-text rendering of a finished report.
//!
//! Task table:
//!   `Task Table`
//!   rows of `label  day-cells...  TOTAL`, wrapped into blocks when the
//!   date columns exceed the display width.
//!
//! All helpers build `String`s; printing is the caller's business.

use chrono::NaiveDate;

use crate::report::{DayTable, Report};

const CELL_WIDTH: usize = 10;
const TOTAL_LABEL: &str = "TOTAL";

/// Render the whole report: both tables, assignment diagnostics, comments
/// and warnings. Collapses to a notice when there is nothing to tabulate.
pub fn format_report(report: &Report, width: usize) -> String {
    let Some(summary) = &report.summary else {
        return "No data.\n".to_string();
    };

    let mut sections = Vec::new();
    sections.push(format_table("Task Table", &summary.task_table, width));
    sections.push(format_table("Project Table", &summary.project_table, width));

    let unassigned = summary.unassigned_tasks();
    if !unassigned.is_empty() {
        sections.push(format!(
            "Tasks assigned to no projects: {}\n",
            unassigned.join(", ")
        ));
    }

    let multi = summary.multiply_assigned_tasks();
    if !multi.is_empty() {
        let mut s = format!(
            "Tasks assigned to multiple projects: {}\n",
            multi
                .iter()
                .map(|(task, _)| *task)
                .collect::<Vec<_>>()
                .join(", ")
        );
        for (task, projects) in &multi {
            s.push_str(&format!(
                "{}: {}\n",
                task,
                projects.iter().cloned().collect::<Vec<_>>().join(", ")
            ));
        }
        sections.push(s);
    }

    if !report.comments.is_empty() {
        let mut s = String::from("Comments:\n");
        for comment in &report.comments {
            s.push_str(&format!("{:08}: {}\n", comment.line, comment.text));
        }
        sections.push(s);
    }

    if !report.warnings.is_empty() {
        let mut s = String::from("Warnings:\n");
        for warning in &report.warnings {
            s.push_str(&format!("{:08}: {}\n", warning.line, warning.message));
        }
        sections.push(s);
    }

    sections.join("\n")
}

/// Render one titled table with its `TOTAL` margins.
///
/// Date columns that do not fit `width` wrap into further blocks, each
/// repeating the row labels.
pub fn format_table(title: &str, table: &DayTable, width: usize) -> String {
    let label_width = table
        .labels()
        .map(str::len)
        .chain([TOTAL_LABEL.len()])
        .max()
        .unwrap_or(TOTAL_LABEL.len());

    // Date columns plus the trailing TOTAL column; `None` is TOTAL.
    let columns: Vec<Option<NaiveDate>> = table
        .dates()
        .iter()
        .copied()
        .map(Some)
        .chain([None])
        .collect();
    let per_block = ((width.saturating_sub(label_width)) / (CELL_WIDTH + 2)).max(1);

    let mut out = format!("{title}\n");
    let blocks: Vec<String> = columns
        .chunks(per_block)
        .map(|chunk| format_block(table, label_width, chunk))
        .collect();
    out.push_str(&blocks.join("\n"));
    out
}

fn format_block(table: &DayTable, label_width: usize, columns: &[Option<NaiveDate>]) -> String {
    let mut out = String::new();

    out.push_str(&" ".repeat(label_width));
    for column in columns {
        let header = match column {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => TOTAL_LABEL.to_string(),
        };
        out.push_str(&format!("  {header:>CELL_WIDTH$}"));
    }
    out.push('\n');

    for label in table.labels() {
        out.push_str(&format_row(table, label_width, columns, label));
    }
    out.push_str(&format_row(table, label_width, columns, TOTAL_LABEL));
    out
}

fn format_row(
    table: &DayTable,
    label_width: usize,
    columns: &[Option<NaiveDate>],
    label: &str,
) -> String {
    let is_total_row = label == TOTAL_LABEL;
    let mut out = format!("{label:<label_width$}");
    for column in columns {
        let value = match (is_total_row, column) {
            (false, Some(date)) => table.value(label, *date),
            (false, None) => table.row_total(label),
            (true, Some(date)) => table.date_total(*date),
            (true, None) => table.grand_total(),
        };
        out.push_str(&format!("  {value:>CELL_WIDTH$.2}"));
    }
    out.push('\n');
    out
}
