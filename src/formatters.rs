use chrono::{DateTime, Local};

use crate::{Level, LogFormatter};

const RESET: &str = "\x1b[0m";

/// Renders `[<timestamp>] <LEVEL>: <message>`.
pub struct DefaultFormatter {
    datetime_format: String,
}

impl DefaultFormatter {
    pub fn new() -> Self {
        Self {
            datetime_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        }
    }

    pub fn with_datetime_format(datetime_format: impl Into<String>) -> Self {
        Self {
            datetime_format: datetime_format.into(),
        }
    }
}

impl Default for DefaultFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl LogFormatter for DefaultFormatter {
    fn render(&self, timestamp: DateTime<Local>, level: Level, message: &str) -> String {
        format!(
            "[{}] {}: {}",
            timestamp.format(&self.datetime_format),
            level.name(),
            message
        )
    }

    fn decorate(&self, level: Level, line: &str) -> String {
        format!("{}{}{}", level.ansi_color(), line, RESET)
    }
}
