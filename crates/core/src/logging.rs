//! Logging setup shared by the naming binaries.
//!
//! Output goes to a daily rolling file per component. Two environment
//! variables adjust it:
//!
//! - `NAMING_LOG` is an `EnvFilter` directive (`RUST_LOG` is honored when it
//!   is unset, then `info`).
//! - `NAMING_LOG_DIR` replaces the default `~/.naming/logs`.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_DIR: &str = ".naming/logs";
pub const LOG_DIR_ENV: &str = "NAMING_LOG_DIR";
pub const LOG_FILTER_ENV: &str = "NAMING_LOG";
const DEFAULT_FILTER: &str = "info";

pub fn log_dir() -> PathBuf {
    resolve_log_dir(std::env::var_os(LOG_DIR_ENV).map(PathBuf::from), dirs::home_dir())
}

fn resolve_log_dir(configured: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    match configured {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => home.unwrap_or_else(|| PathBuf::from(".")).join(LOG_DIR),
    }
}

fn resolve_filter(naming_log: Option<String>, rust_log: Option<String>) -> EnvFilter {
    [naming_log, rust_log]
        .into_iter()
        .flatten()
        .filter(|directive| !directive.trim().is_empty())
        .find_map(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// File name prefix for a component's log, e.g. `naming-cli`.
fn file_prefix(component: &str) -> String {
    let component = component.trim();
    if component.is_empty() {
        "naming".to_string()
    } else {
        format!("naming-{component}")
    }
}

/// Install the global subscriber. Keep the returned guard alive for as long
/// as file output should be flushed.
pub fn init_logging(component: &str, to_stderr: bool) -> WorkerGuard {
    init_logging_in(&log_dir(), component, to_stderr)
}

pub fn init_logging_in(log_dir: &Path, component: &str, to_stderr: bool) -> WorkerGuard {
    if let Err(e) = std::fs::create_dir_all(log_dir) {
        eprintln!("Cannot create log directory {}: {}", log_dir.display(), e);
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, file_prefix(component));
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = resolve_filter(
        std::env::var(LOG_FILTER_ENV).ok(),
        std::env::var("RUST_LOG").ok(),
    );

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);
    let stderr_layer = to_stderr.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    // A second init (tests, embedding hosts) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    guard
}
