use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// wlog — per-task and per-project hour tables from a work log
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Work-log file to read. Falls back to `work_file` from config.toml.
    #[arg()]
    pub work: Option<PathBuf>,

    /// Date from, inclusive (e.g. `2021-01-01`). Without --toex, the range
    /// covers one month from this date.
    #[arg(long, short)]
    pub from: Option<NaiveDate>,

    /// Date to, exclusive. Without --from, the range covers the month
    /// leading up to this date.
    #[arg(long, short)]
    pub toex: Option<NaiveDate>,

    /// Display width (columns) for the printed tables.
    #[arg(long, short)]
    pub width: Option<usize>,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}
