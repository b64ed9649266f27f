//! Tracing subscriber setup
//!
//! `RUST_LOG` wins when set; otherwise the given directive applies. Init is
//! idempotent so embedding applications that already installed a subscriber
//! keep theirs.

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// Initialize console logging
pub fn init_tracing(directive: &str) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(env_filter(directive))
        .try_init()
        .ok();
}

/// Initialize logging to a file with a non-blocking writer
///
/// The returned guard must be held for the lifetime of the program; dropping
/// it flushes and stops the writer thread.
pub fn init_file_tracing(directive: &str, log_path: &Path) -> std::io::Result<WorkerGuard> {
    let directory = log_path.parent().unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .ok_or_else(|| std::io::Error::other("log path has no file name"))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(false).with_writer(writer))
        .with(env_filter(directive))
        .try_init()
        .ok();

    Ok(guard)
}
