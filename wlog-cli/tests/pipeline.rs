use std::fs;
use std::io::Write;

use chrono::NaiveDate;
use wlog_core::Monitor;
use wlog_core::render::format_report;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn run_over(content: &str, from: NaiveDate, toex: NaiveDate) -> wlog_core::Report {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    let read_back = fs::read_to_string(file.path()).unwrap();

    let mut monitor = Monitor::new(from, toex);
    monitor.process(read_back.lines());
    monitor.finish()
}

#[test]
fn work_log_file_to_report() {
    let log = "2021-01-05\n09:00-10:00 writing #draft\n% writing -> bookA\n";
    let report = run_over(log, date(2021, 1, 1), date(2021, 2, 1));

    assert!(report.warnings.is_empty());
    assert_eq!(report.comments.len(), 1);
    assert_eq!(report.comments[0].text, "draft");

    let summary = report.summary.as_ref().unwrap();
    let d = date(2021, 1, 5);
    assert_eq!(summary.task_table.value("writing", d), 1.0);
    assert_eq!(summary.task_table.row_total("writing"), 1.0);
    assert_eq!(summary.project_table.value("bookA", d), 1.0);
    assert_eq!(summary.project_table.row_total("bookA"), 1.0);

    let text = format_report(&report, 100);
    assert!(text.contains("Task Table"));
    assert!(text.contains("writing"));
    assert!(text.contains("Project Table"));
    assert!(text.contains("bookA"));
    assert!(text.contains("00000002: draft"));
}

#[test]
fn log_without_assignments_reports_no_data() {
    let log = "2021-01-05\n09:00-10:00 writing\n";
    let report = run_over(log, date(2021, 1, 1), date(2021, 2, 1));
    assert!(report.summary.is_none());
    assert_eq!(format_report(&report, 100), "No data.\n");
}

#[test]
fn messy_log_collects_warnings_but_still_tabulates() {
    let log = concat!(
        "2021-01-10\n",
        "09:00-11:00 coding\n",
        "10:00-12:00 coding\n", // overlaps
        "2021-01-05 gibberish\n", // regression, then residue
        "09:00-08:00 coding\n", // illegal, floored to 0.0
        "% coding -> toolbox\n",
    );
    let report = run_over(log, date(2021, 1, 1), date(2021, 2, 1));

    let messages: Vec<&str> = report
        .warnings
        .iter()
        .map(|w| w.message.as_str())
        .collect();
    assert_eq!(messages.len(), 4);
    assert!(messages[0].contains("overlaps"));
    assert!(messages[1].contains("smaller than the previous date"));
    assert!(messages[2].contains("Unrecognized content"));
    assert!(messages[3].contains("is illegal"));

    let summary = report.summary.unwrap();
    assert_eq!(summary.task_table.value("coding", date(2021, 1, 10)), 4.0);
    assert_eq!(summary.task_table.value("coding", date(2021, 1, 5)), 0.0);
    assert_eq!(summary.project_table.row_total("toolbox"), 4.0);
}
