//! Opt-in JSON trace logging so carousel transitions can be inspected without touching the TUI.

use crate::config::{AppConfig, LogLevel};
use std::env;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Subscriber;
use tracing_subscriber::fmt::time::UtcTime;

static TRACING_INIT: OnceLock<()> = OnceLock::new();

/// `$CAROUSEL_TRACE_LOG`, or `carousel_trace.jsonl` in the temp dir.
#[must_use]
pub fn tracing_log_path() -> PathBuf {
    env::var("CAROUSEL_TRACE_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| env::temp_dir().join("carousel_trace.jsonl"))
}

/// JSON lines with RFC 3339 UTC timestamps, no span context.
fn json_subscriber(
    level: LogLevel,
    file: File,
) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .json()
        .with_max_level(tracing::Level::from(level))
        .with_timer(UtcTime::rfc_3339())
        .with_writer(file)
        .with_current_span(false)
        .with_span_list(false)
        .finish()
}

fn init_tracing_once(config: &AppConfig, once: &OnceLock<()>) {
    if !config.tracing_enabled() {
        return;
    }
    once.get_or_init(|| {
        // Nothing is installed yet, so an unopenable trace file just leaves tracing off.
        let Ok(file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(tracing_log_path())
        else {
            return;
        };
        let subscriber = json_subscriber(config.log_level, file);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Install the global JSON subscriber when `config` enables tracing. Later calls are no-ops.
pub fn init_tracing(config: &AppConfig) {
    init_tracing_once(config, &TRACING_INIT);
}
