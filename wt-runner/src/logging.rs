//! This module sets up logging for the runner.

use std::{env, path::PathBuf};
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{filter::LevelFilter, fmt::Layer, prelude::*, EnvFilter};
use tracing_unwrap::ResultExt;

/// The common prefix for the runner's log files.
const LOG_PREFIX: &str = "wish-tree.log";

/// The directory for everything the runner writes, taken from `$DATA_DIR` or `./data` by default.
pub fn data_dir() -> PathBuf {
    env::var_os("DATA_DIR").map_or_else(|| PathBuf::from("./data"), PathBuf::from)
}

/// Initialise a subscriber for tracing to log to `stdout` and a daily log file.
///
/// The returned guard must be held until the end of `main`, or the last logs may never be
/// written.
pub fn init_tracing() -> WorkerGuard {
    let (appender, guard) = non_blocking(rolling::daily(data_dir().join("logs"), LOG_PREFIX));

    let subscriber = tracing_subscriber::registry()
        .with(
            Layer::new()
                .with_writer(appender)
                .with_ansi(false)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::DEBUG.into())
                        .parse_lossy(""),
                ),
        )
        .with(
            Layer::new()
                .with_writer(std::io::stdout)
                .with_ansi(true)
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::INFO.into())
                        .from_env_lossy(),
                ),
        );

    tracing::subscriber::set_global_default(subscriber)
        .expect_or_log("Setting the global default for tracing should be okay");

    guard
}
