//! # logwire
//!
//! Structured log envelopes for plain text loggers.
//!
//! Producers encode a severity and tags into the message text with
//! [`Envelope`]; a [`LogWriter`] installed as the logger's output decodes the
//! envelope, drops records below its threshold, merges the tags of its
//! [`TagContext`], and writes one JSON or text line per record.
//!
//! ```
//! use logwire::{Envelope, TagContext, json_log_writer};
//! use std::io::Write;
//!
//! let context = TagContext::new().append_info("requestId", "req_1");
//! let mut writer = json_log_writer(context, Vec::new());
//! writer
//!     .write_all(Envelope::warn().with_int("attempt", 3).with_message("retrying").as_bytes())
//!     .ok();
//! assert!(!writer.into_inner().is_empty());
//! ```
//!
//! This crate depends on `adapters`, `app`, `config`, and `domain`.

use std::sync::Arc;

pub use logwire_adapters::{
    AnsiColorizer, JsonFormatter, PlainColorizer, StderrDiagnostics, SystemClock, TabAligner,
    TextFormatter, strip_ansi,
};
pub use logwire_app::{FORMAT_FAILURE_PREFIX, LogWriter, WriterDeps, WriterOptions};
pub use logwire_config::{
    ConfigFormat, OutputFormat, ValidatedWriterConfig, WriterConfig, WriterEnv,
    apply_env_overrides, load_writer_config_from_path, load_writer_config_from_sources,
    load_writer_config_std_env,
};
pub use logwire_domain::{
    DateLayout, DateLayoutError, DecodedLog, Envelope, Level, LevelParseError, LogRecord, Tag,
    TagContext, TagKind, TagValue, parse_log,
};
pub use logwire_ports::{
    Clock, ColorClass, Colorizer, ColumnAligner, DiagnosticSink, FormatError, Formatter,
};
pub use logwire_shared::{ErrorClass, ErrorCode, ErrorEnvelope};

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// JSON output at [`Level::INFO`] with RFC 3339 timestamps.
pub fn json_options() -> WriterOptions {
    WriterOptions::new(Level::INFO, Arc::new(JsonFormatter), DateLayout::Rfc3339)
}

/// Colored text output at [`Level::INFO`] with RFC 3339 timestamps.
pub fn text_options() -> WriterOptions {
    WriterOptions::new(Level::INFO, Arc::new(TextFormatter::colored()), DateLayout::Rfc3339)
}

/// Options that never render a timestamp, for reproducible output.
pub fn no_timestamp_options(min_level: Level, formatter: Arc<dyn Formatter>) -> WriterOptions {
    WriterOptions::without_timestamp(min_level, formatter)
}

/// System clock and stderr diagnostics.
pub fn default_deps() -> WriterDeps {
    WriterDeps {
        clock: Arc::new(SystemClock),
        diagnostics: Arc::new(StderrDiagnostics),
    }
}

/// Writer with explicit options and the default collaborators.
pub fn log_writer<W>(context: TagContext, sink: W, options: WriterOptions) -> LogWriter<W> {
    LogWriter::new(context, sink, options, default_deps())
}

/// JSON writer at [`Level::INFO`].
pub fn json_log_writer<W>(context: TagContext, sink: W) -> LogWriter<W> {
    log_writer(context, sink, json_options())
}

/// Colored text writer at [`Level::INFO`].
pub fn text_log_writer<W>(context: TagContext, sink: W) -> LogWriter<W> {
    log_writer(context, sink, text_options())
}

/// Options described by a validated config.
pub fn options_from_config(config: &ValidatedWriterConfig) -> WriterOptions {
    let formatter: Arc<dyn Formatter> = match config.format {
        OutputFormat::Json => Arc::new(JsonFormatter),
        OutputFormat::Text if config.color => Arc::new(TextFormatter::colored()),
        OutputFormat::Text => Arc::new(TextFormatter::plain()),
    };
    WriterOptions::new(config.min_level, formatter, config.date_layout.clone())
}

/// Writer built from a validated config.
pub fn log_writer_from_config<W>(
    context: TagContext,
    sink: W,
    config: &ValidatedWriterConfig,
) -> LogWriter<W> {
    log_writer(context, sink, options_from_config(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn facade_version_is_set() {
        assert!(!facade_crate_version().is_empty());
    }

    #[test]
    fn presets_default_to_info_and_rfc3339() {
        for options in [json_options(), text_options()] {
            assert_eq!(options.min_level, Level::INFO);
            assert_eq!(options.date_layout, DateLayout::Rfc3339);
        }
        let bare = no_timestamp_options(Level::WARN, Arc::new(JsonFormatter));
        assert!(bare.date_layout.is_omitted());
        assert_eq!(bare.min_level, Level::WARN);
    }

    #[test]
    fn config_selects_level_and_layout() {
        let config = ValidatedWriterConfig {
            min_level: Level::ERROR,
            format: OutputFormat::Text,
            date_layout: DateLayout::Omit,
            color: false,
        };
        let options = options_from_config(&config);
        assert_eq!(options.min_level, Level::ERROR);
        assert_eq!(options.date_layout, DateLayout::Omit);
    }

    #[test]
    fn plain_text_config_writes_without_escape_codes() -> std::io::Result<()> {
        let config = ValidatedWriterConfig {
            min_level: Level::INFO,
            format: OutputFormat::Text,
            date_layout: DateLayout::Omit,
            color: false,
        };
        let mut writer = log_writer_from_config(TagContext::new(), Vec::new(), &config);
        writer.write_all(b"hello")?;
        assert_eq!(writer.into_inner(), b" info  hello\n");
        Ok(())
    }
}
