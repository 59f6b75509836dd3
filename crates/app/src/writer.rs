//! Log writer: decode, filter, merge context tags, format, write.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};
use logwire_domain::{DateLayout, Level, LogRecord, TagContext, parse_log};
use logwire_ports::{Clock, DiagnosticSink, Formatter};
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Prefix of the diagnostic line reported when a record cannot be formatted.
pub const FORMAT_FAILURE_PREFIX: &str = "logwire: failed to write log: ";

/// Writer configuration: threshold, formatter, and timestamp layout.
#[derive(Clone)]
pub struct WriterOptions {
    /// Records below this level are dropped.
    pub min_level: Level,
    /// Formatter used for every record.
    pub formatter: Arc<dyn Formatter>,
    /// Timestamp layout handed to the formatter.
    pub date_layout: DateLayout,
}

impl WriterOptions {
    /// Options with an explicit date layout.
    pub fn new(min_level: Level, formatter: Arc<dyn Formatter>, date_layout: DateLayout) -> Self {
        Self {
            min_level,
            formatter,
            date_layout,
        }
    }

    /// Options that omit the timestamp.
    pub fn without_timestamp(min_level: Level, formatter: Arc<dyn Formatter>) -> Self {
        Self::new(min_level, formatter, DateLayout::Omit)
    }
}

impl fmt::Debug for WriterOptions {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("WriterOptions")
            .field("min_level", &self.min_level)
            .field("date_layout", &self.date_layout)
            .finish_non_exhaustive()
    }
}

/// Side collaborators of a writer.
#[derive(Clone)]
pub struct WriterDeps {
    /// Time source for record timestamps.
    pub clock: Arc<dyn Clock>,
    /// Side channel for formatting failures.
    pub diagnostics: Arc<dyn DiagnosticSink>,
}

/// Byte sink adapter that turns raw log statements into formatted records.
///
/// Every `write` call is one log statement: the buffer is decoded, dropped
/// when below the minimum level, merged with the context tags visible at its
/// level, formatted, and handed to the sink with a single `write_all`.
/// Dropped and unformattable records still report the whole buffer as
/// written; sink errors are returned unchanged.
pub struct LogWriter<W> {
    context: TagContext,
    sink: W,
    options: WriterOptions,
    deps: WriterDeps,
}

impl<W> LogWriter<W> {
    /// Bind a context, a sink, and options.
    pub fn new(context: TagContext, sink: W, options: WriterOptions, deps: WriterDeps) -> Self {
        Self {
            context,
            sink,
            options,
            deps,
        }
    }

    /// Context whose tags are merged into every record.
    pub const fn context(&self) -> &TagContext {
        &self.context
    }

    /// Writer options.
    pub const fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Borrow the sink.
    pub const fn sink(&self) -> &W {
        &self.sink
    }

    /// Consume the writer and return the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Build the record for one raw statement, or `None` when it is dropped.
    pub fn record_for(&self, buf: &[u8]) -> Option<LogRecord> {
        let decoded = parse_log(buf);
        if !decoded.level.is_at_least(self.options.min_level) {
            return None;
        }

        let mut tags = self.context.tags_at_or_below(decoded.level);
        tags.extend(decoded.tags);
        Some(LogRecord::new(
            decoded.level,
            String::from_utf8_lossy(&decoded.message),
            tags,
            round_to_millis(self.deps.clock.now()),
        ))
    }

    fn render(&self, buf: &[u8]) -> Option<Vec<u8>> {
        let record = self.record_for(buf)?;
        match self.options.formatter.format(&record, &self.options.date_layout) {
            Ok(line) if line.is_empty() => None,
            Ok(line) => Some(line),
            Err(error) => {
                self.deps
                    .diagnostics
                    .write_line(&format!("{FORMAT_FAILURE_PREFIX}{error}"));
                None
            },
        }
    }
}

impl<W: Write> Write for LogWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(line) = self.render(buf) {
            self.sink.write_all(&line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}

/// Shared writes, for sinks that accept writes through a shared reference.
impl<W> Write for &LogWriter<W>
where
    for<'a> &'a W: Write,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(line) = self.render(buf) {
            let mut sink = &self.sink;
            sink.write_all(&line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut sink = &self.sink;
        sink.flush()
    }
}

impl<W: fmt::Debug> fmt::Debug for LogWriter<W> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LogWriter")
            .field("context", &self.context)
            .field("sink", &self.sink)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

fn round_to_millis(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp
        .duration_round(TimeDelta::milliseconds(1))
        .unwrap_or(timestamp)
}
