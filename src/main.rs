//! msmaaedeh binary entrypoint. The i18n subsystem lives in the library crate.

mod args;

use std::fmt;
use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;

struct SiteTimer;

impl tracing_subscriber::fmt::time::FormatTime for SiteTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now()
            .format("%Y-%m-%d-T %H:%M:%S")
            .to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize tracing, writing to `<config_dir>/logs/msmaaedeh.log`.
///
/// Inputs:
/// - `args`: Parsed arguments (log level and config directory)
///
/// Details:
/// - `RUST_LOG` wins over `--log-level`/`--verbose`
/// - Falls back to stderr when the log file cannot be opened
fn init_logging(args: &args::Args) {
    let level = args::determine_log_level(args);
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level))
    };
    let config_dir = msmaaedeh::paths::config_dir(args.config_dir.as_deref());
    let log_path = msmaaedeh::paths::logs_dir(&config_dir).join("msmaaedeh.log");
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(SiteTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(SiteTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

fn main() -> ExitCode {
    let args = args::Args::parse();
    init_logging(&args);
    tracing::info!(command = ?args.command, "msmaaedeh starting");
    let code = args::run(&args);
    tracing::info!("msmaaedeh exited");
    code
}
