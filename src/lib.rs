//! Process-wide leveled logging with in-memory history retention.
//!
//! One [`Logger`] serializes every emit behind a single lock: messages are
//! filtered by severity, timestamped, written to the console (optionally
//! colorized), appended to an inspectable history, and forwarded to a file
//! sink when one is configured. [`logger()`] exposes a shared instance for
//! the whole process.

mod formatters;
mod global;
mod level;
mod logger;
mod record;
mod sinks;

pub use formatters::DefaultFormatter;
pub use global::logger;
pub use level::Level;
pub use logger::{Builder, Logger, Status};
pub use record::LogRecord;
pub use sinks::{ConsoleSink, FileSink, NullSink};

use chrono::{DateTime, Local};

pub trait LogFormatter: Sync + Send {
    /// Produces the plain line stored in history and written to sinks.
    fn render(&self, timestamp: DateTime<Local>, level: Level, message: &str) -> String;

    /// Console variant of an already rendered line, used when colors are on.
    fn decorate(&self, _level: Level, line: &str) -> String {
        line.to_string()
    }
}

pub trait LogSink: Sync + Send {
    fn write_line(&self, line: &str) -> eyre::Result<()>;
    fn flush(&self) -> eyre::Result<()>;
}
