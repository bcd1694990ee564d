use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{fs, path::PathBuf};

/// Table output is wrapped to this many columns unless overridden.
const DEFAULT_DISPLAY_WIDTH: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    /// Work-log file to read when the CLI is given none.
    pub work_file: Option<PathBuf>,
    /// Maximum width (in columns) of the printed tables.
    pub display_width: usize,
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    work_file: Option<PathBuf>,
    display_width: Option<usize>,
}

impl Config {
    /// Load config from disk (first XDG path, then native) and apply defaults.
    /// A missing or unreadable file just means defaults.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|_| FileConfig {
            work_file: None,
            display_width: None,
        });

        Ok(Self {
            work_file: file_config.work_file,
            display_width: file_config.display_width.unwrap_or(DEFAULT_DISPLAY_WIDTH),
        })
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("wlog")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("wlog").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig {
            work_file: None,
            display_width: None,
        })
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }
}
