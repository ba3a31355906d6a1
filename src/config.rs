//! Shared runtime flags so the library's tracing setup and the binary agree on one schema.

use clap::{Args, ValueEnum};

/// Verbosity for the trace file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    #[default]
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Write JSON trace events (see CAROUSEL_TRACE_LOG)
    #[arg(long = "logs", default_value_t = false)]
    pub logs: bool,

    /// Disable all logging, overriding --logs
    #[arg(long = "no-logs", default_value_t = false)]
    pub no_logs: bool,

    /// Most verbose level written to the trace file
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Debug)]
    pub log_level: LogLevel,
}

impl AppConfig {
    /// Tracing is opt-in and `--no-logs` always wins.
    #[must_use]
    pub fn tracing_enabled(&self) -> bool {
        self.logs && !self.no_logs
    }
}
