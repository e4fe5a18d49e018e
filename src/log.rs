// src/log.rs
//! Logging front door.
//!
//! The `logf!`/`logd!`/`logw!`/`loge!` macros forward to `tracing`, so library
//! code never decides where lines go. The binary calls [`init`] once to attach
//! a stderr writer and (optionally) an append-only log file in the data dir.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, fmt::time::ChronoLocal, prelude::*};

const TIME_FORMAT: &str = "%H:%M:%S";

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `verbose` when set. Calling this twice is harmless;
/// the second call is ignored.
pub fn init(verbose: bool, log_file: Option<&Path>) -> io::Result<()> {
    let default_level = if verbose { "iia_scrape=debug" } else { "iia_scrape=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_timer(ChronoLocal::new(s!(TIME_FORMAT)));

    let file_layer = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .with_target(false)
                    .with_timer(ChronoLocal::new(s!(TIME_FORMAT))),
            )
        }
        None => None,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    Ok(())
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        ::tracing::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Warning-level logging
#[macro_export]
macro_rules! logw {
    ($($arg:tt)*) => {
        ::tracing::warn!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        ::tracing::error!($($arg)*)
    };
}
