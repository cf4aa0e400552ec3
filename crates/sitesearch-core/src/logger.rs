//! Grouped, levelled build logging.
//!
//! The index builder reports progress through a [`BuildLogger`] handed to it
//! at construction time. [`TracingLogger`] forwards everything to `tracing`;
//! [`MemoryLogger`] keeps the lines so callers can inspect them.

use std::sync::{Mutex, PoisonError};

use tracing::{error, info, warn};

/// Severity of a build log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Logging collaborator. Calls never affect control flow.
pub trait BuildLogger: Send + Sync {
    /// Log one message.
    fn log(&self, message: &str, level: LogLevel);

    /// Mark the start of a named group of lines.
    ///
    /// Groups only delimit output. One logger may be shared by concurrent
    /// builds, so implementations keep no per-group state.
    fn start_group(&self, title: &str);

    /// Mark the end of the most recently started group.
    fn end_group(&self);

    /// Log a titled table of counters.
    fn summary(&self, title: &str, rows: &[(&str, usize)]);
}

/// [`BuildLogger`] backed by `tracing` events.
///
/// Events land in whatever span the caller is in; the aggregator opens one
/// per build.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BuildLogger for TracingLogger {
    fn log(&self, message: &str, level: LogLevel) {
        match level {
            LogLevel::Info => info!("{message}"),
            LogLevel::Success => info!(success = true, "{message}"),
            LogLevel::Warning => warn!("{message}"),
            LogLevel::Error => error!("{message}"),
        }
    }

    fn start_group(&self, title: &str) {
        info!(group = title, "started");
    }

    fn end_group(&self) {
        info!("finished");
    }

    fn summary(&self, title: &str, rows: &[(&str, usize)]) {
        info!("{title}:");
        for (key, value) in rows {
            info!("   {key}: {value}");
        }
    }
}

/// [`BuildLogger`] that records every line in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded lines, in order.
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recorded messages of one level.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    fn push(&self, level: LogLevel, message: String) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((level, message));
    }
}

impl BuildLogger for MemoryLogger {
    fn log(&self, message: &str, level: LogLevel) {
        self.push(level, message.to_string());
    }

    fn start_group(&self, title: &str) {
        self.push(LogLevel::Info, format!("> {title}"));
    }

    fn end_group(&self) {
        self.push(LogLevel::Info, "<".to_string());
    }

    fn summary(&self, title: &str, rows: &[(&str, usize)]) {
        let body = rows
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.push(LogLevel::Info, format!("{title}: {body}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_logger_records_levels() {
        let logger = MemoryLogger::new();
        logger.start_group("Index");
        logger.log("found 3 docs", LogLevel::Success);
        logger.log("no route for pages/x", LogLevel::Warning);
        logger.summary("Summary", &[("Total items", 3), ("Docs", 1)]);
        logger.end_group();

        assert_eq!(logger.lines().len(), 5);
        assert_eq!(
            logger.messages(LogLevel::Warning),
            vec!["no route for pages/x".to_string()]
        );
        assert!(
            logger
                .messages(LogLevel::Info)
                .contains(&"Summary: Total items=3, Docs=1".to_string())
        );
    }

    #[test]
    fn test_tracing_logger_is_stateless() {
        let logger = TracingLogger::new();
        logger.end_group();
        logger.start_group("first");
        logger.start_group("second");
        logger.log("inside", LogLevel::Warning);
        logger.end_group();
        logger.end_group();
        assert_eq!(std::mem::size_of::<TracingLogger>(), 0);
    }

    #[test]
    fn test_level_names() {
        assert_eq!(LogLevel::Warning.as_str(), "warning");
        assert_eq!(LogLevel::Success.as_str(), "success");
    }
}
