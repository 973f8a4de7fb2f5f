use std::{
    fmt,
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use chrono::Local;

use crate::{
    formatters::DefaultFormatter,
    sinks::{ConsoleSink, FileSink, NullSink},
    Level, LogFormatter, LogRecord, LogSink,
};

struct State {
    min_level: Level,
    history: Vec<LogRecord>,
    console_colors: bool,
    file_sink: bool,
}

/// The shared logging service. All mutable state sits behind one mutex, so
/// concurrent emits are totally ordered and never interleave their console
/// output or tear the history.
pub struct Logger {
    state: Mutex<State>,
    formatter: Box<dyn LogFormatter>,
    console: Box<dyn LogSink>,
    file: Box<dyn LogSink>,
}

impl Logger {
    fn new(
        min_level: Level,
        console_colors: bool,
        file_sink: bool,
        formatter: Box<dyn LogFormatter>,
        console: Box<dyn LogSink>,
        file: Box<dyn LogSink>,
    ) -> Self {
        Self {
            state: Mutex::new(State {
                min_level,
                history: Vec::new(),
                console_colors,
                file_sink,
            }),
            formatter,
            console,
            file,
        }
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    // Every operation mutates state through a single call, so a poisoned
    // lock still holds a consistent State and the guard can be recovered.
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Records `message` at `level`. Below the current threshold this is a
    /// silent no-op. Otherwise the timestamp, console write, history append
    /// and file write all happen in one critical section, so two concurrent
    /// emits never mix their side effects.
    pub fn emit(&self, level: Level, message: &str) {
        let mut state = self.state();

        if level.rank() < state.min_level.rank() {
            return;
        }

        let timestamp = Local::now();
        let rendered = self.formatter.render(timestamp, level, message);

        let console_line = if state.console_colors {
            self.formatter.decorate(level, &rendered)
        } else {
            rendered.clone()
        };

        // Sink trouble never reaches the emit caller.
        let _ = self.console.write_line(&console_line);

        if state.file_sink {
            let _ = self.file.write_line(&rendered);
        }

        state
            .history
            .push(LogRecord::new(timestamp, level, message.to_string(), rendered));
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.emit(Level::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    pub fn fatal(&self, message: &str) {
        self.emit(Level::Fatal, message);
    }

    /// Changes the threshold for every subsequent emit, then announces the
    /// change at `Info`. The announcement is filtered against the threshold
    /// just installed, so raising it past `Info` keeps the announcement out
    /// of the history too.
    pub fn set_min_level(&self, level: Level) {
        {
            let mut state = self.state();
            state.min_level = level;
        }

        self.info(&format!("Log level changed to: {}", level));
    }

    /// Toggles color decoration of console output. History text is never
    /// affected.
    pub fn set_console_colors(&self, enabled: bool) {
        self.state().console_colors = enabled;
    }

    /// Toggles forwarding of rendered lines to the file sink. Records are
    /// retained in history either way.
    pub fn set_file_sink(&self, enabled: bool) {
        self.state().file_sink = enabled;
    }

    /// A copy of the history at this instant. Taken under the emit lock, so
    /// it is always a consistent prefix of the emitted records.
    pub fn snapshot_history(&self) -> Vec<LogRecord> {
        self.state().history.clone()
    }

    /// Drops all retained records. Threshold and sink toggles keep their
    /// values.
    pub fn clear_history(&self) {
        self.state().history.clear();
    }

    pub fn status(&self) -> Status {
        let state = self.state();

        Status {
            min_level: state.min_level,
            entries: state.history.len(),
            console_colors: state.console_colors,
            file_sink: state.file_sink,
        }
    }

    pub fn flush(&self) {
        let _ = self.console.flush();
        let _ = self.file.flush();
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::new(
            Level::Info,
            true,
            false,
            Box::new(DefaultFormatter::new()),
            Box::new(ConsoleSink::new()),
            Box::new(NullSink::new()),
        )
    }
}

/// Point-in-time view of the logger configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    pub min_level: Level,
    pub entries: usize,
    pub console_colors: bool,
    pub file_sink: bool,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn on_off(enabled: bool) -> &'static str {
            if enabled {
                "enabled"
            } else {
                "disabled"
            }
        }

        writeln!(f, "Log level: {}", self.min_level)?;
        writeln!(f, "Entries retained: {}", self.entries)?;
        writeln!(f, "File sink: {}", on_off(self.file_sink))?;
        write!(f, "Console colors: {}", on_off(self.console_colors))
    }
}

pub struct Builder {
    min_level: Level,
    console_colors: bool,
    file_path: Option<PathBuf>,
    formatter: Box<dyn LogFormatter>,
    console: Box<dyn LogSink>,
}

impl Builder {
    pub fn new() -> Self {
        Self {
            min_level: Level::Info,
            console_colors: true,
            file_path: None,
            formatter: Box::new(DefaultFormatter::new()),
            console: Box::new(ConsoleSink::new()),
        }
    }

    pub fn with_min_level(self, min_level: Level) -> Self {
        Self { min_level, ..self }
    }

    pub fn with_console_colors(self, console_colors: bool) -> Self {
        Self {
            console_colors,
            ..self
        }
    }

    /// Routes rendered lines to a file at `path` and enables the file toggle.
    /// The file is opened by `build`.
    pub fn with_file_sink(self, path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: Some(path.into()),
            ..self
        }
    }

    pub fn with_console_sink(self, console: Box<dyn LogSink>) -> Self {
        Self { console, ..self }
    }

    pub fn with_formatter(self, formatter: Box<dyn LogFormatter>) -> Self {
        Self { formatter, ..self }
    }

    pub fn build(self) -> eyre::Result<Logger> {
        let (file, file_sink): (Box<dyn LogSink>, bool) = match &self.file_path {
            Some(path) => (Box::new(FileSink::new(path)?), true),
            None => (Box::new(NullSink::new()), false),
        };

        Ok(Logger::new(
            self.min_level,
            self.console_colors,
            file_sink,
            self.formatter,
            self.console,
            file,
        ))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
