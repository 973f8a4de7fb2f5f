use std::fmt;

use chrono::{DateTime, Local};

use crate::Level;

/// One accepted log entry. Built once per emit, never mutated afterwards.
#[derive(Debug, Clone)]
pub struct LogRecord {
    timestamp: DateTime<Local>,
    level: Level,
    message: String,
    rendered: String,
}

impl LogRecord {
    pub(crate) fn new(
        timestamp: DateTime<Local>,
        level: Level,
        message: String,
        rendered: String,
    ) -> Self {
        Self {
            timestamp,
            level,
            message,
            rendered,
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn level(&self) -> Level {
        self.level
    }

    /// The raw message text passed to the emit call.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The formatted line, without any color decoration.
    pub fn rendered(&self) -> &str {
        &self.rendered
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}
