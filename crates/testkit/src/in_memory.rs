//! In-memory sinks, formatter, clock, and diagnostics for tests.

use crate::errors::sink_closed_error;
use chrono::{DateTime, Utc};
use logwire_ports::{
    Clock, DateLayout, DiagnosticSink, FormatError, Formatter, LogRecord,
};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct SinkState {
    bytes: Vec<u8>,
    writes: usize,
}

/// Output sink that keeps every byte and counts write calls.
///
/// Clones share the same buffer, so a test can keep a handle while the writer
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    state: Arc<Mutex<SinkState>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.state.lock().expect("memory sink lock").bytes.clone()
    }

    /// Everything written so far, as UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.contents()).into_owned()
    }

    /// Number of `write` calls received.
    pub fn write_count(&self) -> usize {
        self.state.lock().expect("memory sink lock").writes
    }
}

impl Write for &MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().expect("memory sink lock");
        state.bytes.extend_from_slice(buf);
        state.writes += 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self).flush()
    }
}

/// Output sink whose every write fails with a broken pipe.
#[derive(Debug, Clone, Default)]
pub struct FailingSink {
    attempts: Arc<Mutex<usize>>,
}

impl FailingSink {
    /// Create a failing sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of write attempts received.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().expect("failing sink lock")
    }
}

impl Write for &FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        *self.attempts.lock().expect("failing sink lock") += 1;
        Err(sink_closed_error())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Formatter that records every record it receives.
///
/// Renders `level|message|key=value,...\n`, or fails with a serialization
/// error when built with [`RecordingFormatter::failing`].
#[derive(Debug, Clone, Default)]
pub struct RecordingFormatter {
    records: Arc<Mutex<Vec<(LogRecord, DateLayout)>>>,
    fail: bool,
}

impl RecordingFormatter {
    /// Recording formatter that succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recording formatter whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Records received so far, with the layout they were formatted with.
    pub fn records(&self) -> Vec<(LogRecord, DateLayout)> {
        self.records.lock().expect("recording formatter lock").clone()
    }
}

impl Formatter for RecordingFormatter {
    fn format(&self, record: &LogRecord, layout: &DateLayout) -> Result<Vec<u8>, FormatError> {
        self.records
            .lock()
            .expect("recording formatter lock")
            .push((record.clone(), layout.clone()));
        if self.fail {
            return Err(FormatError::Serialization {
                message: "recording formatter told to fail".to_string(),
            });
        }

        let tags: Vec<String> = record
            .tags
            .iter()
            .map(|tag| format!("{}={}", tag.key, tag.value))
            .collect();
        Ok(format!(
            "{}|{}|{}\n",
            record.level_name(),
            record.message,
            tags.join(",")
        )
        .into_bytes())
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Clock frozen at `millis` after the Unix epoch.
    pub fn at_millis(millis: i64) -> Self {
        Self(DateTime::from_timestamp_millis(millis).unwrap_or_default())
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self(DateTime::default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Diagnostic sink that captures lines.
#[derive(Debug, Default)]
pub struct MemoryDiagnostics {
    lines: Mutex<Vec<String>>,
}

impl MemoryDiagnostics {
    /// Drain captured lines.
    pub fn take(&self) -> Vec<String> {
        let mut guard = self.lines.lock().expect("memory diagnostics lock");
        std::mem::take(&mut *guard)
    }
}

impl DiagnosticSink for MemoryDiagnostics {
    fn write_line(&self, line: &str) {
        let mut guard = self.lines.lock().expect("memory diagnostics lock");
        guard.push(line.to_string());
    }
}
