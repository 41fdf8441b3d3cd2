//! Out-of-band diagnostic log.
//!
//! Command outcomes that must not reach the rendered view end up here. Every
//! entry is also emitted as a `tracing` event.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Oldest entries are dropped past this many.
pub const MAX_ENTRIES: usize = 256;

#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// Shared, never-rendered log. Clones append to the same entries.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticLog {
    entries: Rc<RefCell<VecDeque<LogEntry>>>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Info | LogLevel::Success => tracing::info!("{}", message),
            LogLevel::Warning => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        }

        let mut entries = self.entries.borrow_mut();
        if entries.len() == MAX_ENTRIES {
            entries.pop_front();
        }
        entries.push_back(LogEntry {
            timestamp: current_time(),
            level,
            message,
        });
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().iter().cloned().collect()
    }

    pub fn last(&self) -> Option<LogEntry> {
        self.entries.borrow().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}
