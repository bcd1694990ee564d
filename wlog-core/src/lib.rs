pub mod config;
pub mod dates;
pub mod interpret;
pub mod monitor;
pub mod record;
pub mod render;
pub mod report;

pub use config::Config;
pub use monitor::Monitor;
pub use report::{Report, Summary};
