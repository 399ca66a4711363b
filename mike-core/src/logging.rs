use std::{
    env,
    fs::{File, OpenOptions, create_dir_all},
    path::{Path, PathBuf},
};

use color_eyre::{Result, eyre::WrapErr};
use tracing::{info, level_filters::LevelFilter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{self, PROJECT_NAME};

/// Log level variable read when `RUST_LOG` is not set.
pub const LOG_ENV: &str = "MIKE_LOGLEVEL";
const LOG_FILE: &str = "mike.log";

/// Appends every trace to `mike.log` in the data directory, the terminal is kept for the user.
///
/// The level is read from `RUST_LOG`, then from `MIKE_LOGLEVEL`, and defaults to INFO.
///
/// # Errors
///
/// Will return an error if the log file can't be opened or a subscriber is already set.
pub fn init() -> Result<()> {
    let directory = config::get_data_dir();
    let log_file = open_log_file(&directory)?;

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter());

    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;

    info!(
        "{PROJECT_NAME} {} logging to {}",
        env!("CARGO_PKG_VERSION"),
        log_path(&directory).display()
    );
    Ok(())
}

fn log_path(directory: &Path) -> PathBuf {
    directory.join(LOG_FILE)
}

/// Opens the log file for appending, earlier sessions are kept.
fn open_log_file(directory: &Path) -> Result<File> {
    create_dir_all(directory)?;
    let path = log_path(directory);
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("Failed to open log file {}", path.display()))
}

fn env_filter() -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::INFO.into());
    let variable = [EnvFilter::DEFAULT_ENV, LOG_ENV]
        .into_iter()
        .find(|variable| env::var(variable).is_ok_and(|value| !value.trim().is_empty()));
    match variable {
        Some(variable) => builder.with_env_var(variable).from_env_lossy(),
        None => builder.parse_lossy(""),
    }
}
