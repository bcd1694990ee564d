mod cli;

use std::fs;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use wlog_core::dates::{add_month, previous_month, sub_month};
use wlog_core::render::format_report;
use wlog_core::{Config, Monitor};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::new();
    let config = Config::load()?;

    let today = Local::now().date_naive();
    let Some((date_from, date_toex)) = resolve_range(cli.from, cli.toex, today) else {
        println!("Warning: to-date must be strictly greater than from-date");
        return Ok(());
    };

    let work = cli
        .work
        .or(config.work_file)
        .context("no work-log file given and no work_file in config.toml")?;
    let content =
        fs::read_to_string(&work).with_context(|| format!("reading {}", work.display()))?;

    let mut monitor = Monitor::new(date_from, date_toex);
    monitor.process(content.lines());
    let report = monitor.finish();

    let width = cli.width.unwrap_or(config.display_width);
    print!("{}", format_report(&report, width));
    Ok(())
}

/// Resolve the half-open date range from the given bounds.
///
/// Both given: taken as is, `None` when the range is empty or backwards.
/// One given: the other lands a calendar month away. Neither: the whole
/// previous calendar month relative to `today`.
fn resolve_range(
    from: Option<NaiveDate>,
    toex: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<(NaiveDate, NaiveDate)> {
    match (from, toex) {
        (Some(from), Some(toex)) => (from < toex).then_some((from, toex)),
        (Some(from), None) => Some((from, add_month(from))),
        (None, Some(toex)) => Some((sub_month(toex), toex)),
        (None, None) => Some(previous_month(today)),
    }
}
