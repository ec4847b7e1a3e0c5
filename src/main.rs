//! tunescout binary entrypoint kept minimal. The one-shot runner lives in
//! [`tunescout::app`].

use std::sync::OnceLock;
use std::{fmt, time::SystemTime};

use clap::Parser;

use tunescout::args::{Args, determine_log_level};
use tunescout::util;

struct TunescoutTimer;

impl tracing_subscriber::fmt::time::FormatTime for TunescoutTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let secs = match SystemTime::now().duration_since(std::time::UNIX_EPOCH) {
            Ok(d) => i64::try_from(d.as_secs()).unwrap_or(0),
            Err(_) => 0,
        };
        let s = util::ts_to_date(Some(secs)); // "YYYY-MM-DD HH:MM:SS"
        let ts = s.replacen(' ', "-T", 1); // "YYYY-MM-DD-T HH:MM:SS"
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Install the tracing subscriber writing to
/// `~/.config/tunescout/logs/tunescout.log`, falling back to stderr.
fn init_logging(level: &str) {
    let mut log_path = util::paths::logs_dir();
    log_path.push("tunescout.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
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
                .with_timer(TunescoutTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            // Fallback: init stderr logger to avoid blocking startup
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_timer(TunescoutTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(determine_log_level(&args));

    tracing::info!(term = ?args.term, entity = %args.entity, "tunescout starting");
    if let Err(err) = tunescout::app::run(&args).await {
        tracing::error!(error = %err, "search failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
}
