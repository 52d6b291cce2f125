//! CLI argument parsing for the watcher.
//!
//! Secrets never come from flags; they are read from the environment by
//! `config`. Flags only tune where and how often the watcher polls.
use crate::config::{DEFAULT_POLL_INTERVAL_SECS, DEFAULT_TELEGRAM_API};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Default log file, written next to the working directory.
pub const DEFAULT_LOG_FILE: &str = "review-watch.log";

#[derive(Parser, Debug)]
#[command(
    name = "review-watch",
    version,
    about = "Poll the homework review API and report status changes to Telegram",
    after_help = "Environment:\n  PRACTICUM_TOKEN     OAuth token for the homework status API (required)\n  TELEGRAM_TOKEN      Telegram bot token (required)\n  CHAT_ID             Telegram chat to notify (required)\n  PRACTICUM_ENDPOINT  Status endpoint (overridden by --endpoint)\n  RUST_LOG            Log filter (default: info)"
)]
pub struct RootArgs {
    /// Homework status endpoint URL
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Telegram Bot API base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_TELEGRAM_API)]
    pub telegram_api: String,

    /// Seconds to sleep after every poll cycle
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = DEFAULT_POLL_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub interval_secs: u64,

    /// Initial from_date watermark in Unix seconds (defaults to now)
    #[arg(long, value_name = "TS", allow_negative_numbers = true)]
    pub from_date: Option<i64>,

    /// Stop after this many cycles instead of polling forever
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub max_cycles: Option<u64>,

    /// Append logs to this file as well as stderr
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log to stderr only
    #[arg(long, conflicts_with = "log_file")]
    pub no_log_file: bool,
}

impl RootArgs {
    pub fn log_file(&self) -> Option<&Path> {
        (!self.no_log_file).then_some(self.log_file.as_path())
    }
}
