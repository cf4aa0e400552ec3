//! Client logging collaborator.

use std::cell::RefCell;

/// Receives engine diagnostics. Calls never affect control flow.
pub trait ClientLogger {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Logs to the browser console on wasm32 and to `tracing` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger;

#[cfg(target_arch = "wasm32")]
impl ClientLogger for ConsoleLogger {
    fn info(&self, message: &str) {
        web_sys::console::log_1(&message.into());
    }

    fn warn(&self, message: &str) {
        web_sys::console::warn_1(&message.into());
    }

    fn error(&self, message: &str) {
        web_sys::console::error_1(&message.into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl ClientLogger for ConsoleLogger {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

/// Severity recorded by [`MemoryClientLogger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientLogLevel {
    Info,
    Warn,
    Error,
}

/// Keeps log lines in memory.
#[derive(Debug, Default)]
pub struct MemoryClientLogger {
    lines: RefCell<Vec<(ClientLogLevel, String)>>,
}

impl MemoryClientLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self, level: ClientLogLevel) -> Vec<String> {
        self.lines
            .borrow()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn push(&self, level: ClientLogLevel, message: &str) {
        self.lines.borrow_mut().push((level, message.to_string()));
    }
}

impl ClientLogger for MemoryClientLogger {
    fn info(&self, message: &str) {
        self.push(ClientLogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.push(ClientLogLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(ClientLogLevel::Error, message);
    }
}

impl<L: ClientLogger + ?Sized> ClientLogger for std::rc::Rc<L> {
    fn info(&self, message: &str) {
        (**self).info(message);
    }

    fn warn(&self, message: &str) {
        (**self).warn(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}
