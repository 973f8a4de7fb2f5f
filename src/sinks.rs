use std::{
    fs::File,
    io::{LineWriter, Write},
    path::Path,
    sync::Mutex,
};

use eyre::Context;

use crate::LogSink;

/// Writes rendered lines to stdout.
pub struct ConsoleSink {
    handle: std::io::Stdout,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            handle: std::io::stdout(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ConsoleSink {
    fn write_line(&self, line: &str) -> eyre::Result<()> {
        let mut writer = self.handle.lock();

        writeln!(writer, "{}", line)?;
        writer.flush().context("Can't flush stdout")
    }

    fn flush(&self) -> eyre::Result<()> {
        self.handle.lock().flush().context("Can't flush stdout")
    }
}

/// Appends rendered lines to a file, one per line, flushed per write.
pub struct FileSink {
    file: Mutex<LineWriter<File>>,
}

impl FileSink {
    pub fn new(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed opening or creating log file {}", path.display()))?;

        Ok(Self {
            file: Mutex::new(LineWriter::new(file)),
        })
    }
}

impl LogSink for FileSink {
    fn write_line(&self, line: &str) -> eyre::Result<()> {
        let mut file = self.file.lock().map_err(|e| eyre::eyre!(e.to_string()))?;

        writeln!(file, "{}", line)?;
        file.flush().context("Can't flush log file")
    }

    fn flush(&self) -> eyre::Result<()> {
        let mut file = self.file.lock().map_err(|e| eyre::eyre!(e.to_string()))?;
        file.flush().context("Can't flush log file")
    }
}

/// Discards everything. Stands in for the durable sink when no path is
/// configured, so enabling the file toggle degrades silently.
pub struct NullSink {}

impl NullSink {
    pub fn new() -> Self {
        Self {}
    }
}

impl LogSink for NullSink {
    fn write_line(&self, _line: &str) -> eyre::Result<()> {
        Ok(())
    }

    fn flush(&self) -> eyre::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_appends_one_line_per_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        let sink = FileSink::new(&path).unwrap();
        sink.write_line("first").unwrap();
        sink.write_line("second").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn file_sink_reopens_existing_file_in_append_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");

        FileSink::new(&path).unwrap().write_line("old").unwrap();
        FileSink::new(&path).unwrap().write_line("new").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "old\nnew\n");
    }

    #[test]
    fn file_sink_fails_on_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("app.log");

        assert!(FileSink::new(&path).is_err());
    }
}
