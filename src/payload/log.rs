//! Log messages routed through the log queue
//!
//! Call sites on any thread build a [`LogMessage`] and push it onto the log
//! queue; the log sink thread pops them and forwards each one to `tracing`
//! with [`LogMessage::emit`]. This keeps slow subscribers off the media
//! threads.

use std::time::SystemTime;

use tracing::Level;

/// A structured log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    /// Severity
    pub level: Level,
    /// Module or subsystem that produced the entry
    pub target: String,
    /// Message text
    pub message: String,
    /// When the entry was created
    pub timestamp: SystemTime,
    /// Name of the producing thread, if it has one
    pub thread: Option<String>,
}

impl LogMessage {
    /// Create a log entry stamped with the current time and thread name
    pub fn new(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            target: target.into(),
            message: message.into(),
            timestamp: SystemTime::now(),
            thread: std::thread::current().name().map(str::to_owned),
        }
    }

    /// Create an info-level entry
    pub fn info(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Level::INFO, target, message)
    }

    /// Create a warn-level entry
    pub fn warn(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Level::WARN, target, message)
    }

    /// Create an error-level entry
    pub fn error(target: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Level::ERROR, target, message)
    }

    /// Forward the entry to the active `tracing` subscriber
    pub fn emit(&self) {
        let thread = self.thread.as_deref().unwrap_or("<unnamed>");
        match self.level {
            Level::ERROR => {
                tracing::error!(origin = %self.target, thread = thread, "{}", self.message)
            }
            Level::WARN => {
                tracing::warn!(origin = %self.target, thread = thread, "{}", self.message)
            }
            Level::INFO => {
                tracing::info!(origin = %self.target, thread = thread, "{}", self.message)
            }
            Level::DEBUG => {
                tracing::debug!(origin = %self.target, thread = thread, "{}", self.message)
            }
            _ => tracing::trace!(origin = %self.target, thread = thread, "{}", self.message),
        }
    }
}
