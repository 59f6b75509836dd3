//! Inline envelope encoder.
//!
//! An [`Envelope`] carries a severity and an ordered list of tags inside the
//! text of a log message, so a plain string-accepting logger can transport
//! structured data untouched. The wire layout is private to this crate:
//!
//! ```text
//! -+-logwire-+-\n
//! _level\tint\t3\n
//! attempt\tint\t3\n
//! -+-logwire-+-\n
//! retrying
//! ```
//!
//! Keys and values escape backslash, tab, newline and carriage return, so a
//! block line never spans lines and the closing marker is always found at a
//! line start.

use crate::{Level, TagValue};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::panic::Location;
use std::path::Path;

/// Marker line that opens and closes an envelope block.
pub(crate) const MARKER: &str = "-+-logwire-+-\n";
/// Reserved key of the severity line.
pub(crate) const LEVEL_KEY: &str = "_level";

/// Severity plus tags, encoded for embedding in a message string.
///
/// Builders take `&self` and return a new envelope, so a partially built
/// envelope can be shared and extended along different branches.
///
/// ```
/// use logwire_domain::{Envelope, parse_log, Level};
///
/// let line = Envelope::warn().with_int("attempt", 3).with_message("retrying");
/// let decoded = parse_log(line.as_bytes());
/// assert_eq!(decoded.level, Level::WARN);
/// assert_eq!(&*decoded.message, b"retrying");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Envelope {
    lines: String,
}

impl Envelope {
    /// Envelope carrying only a severity.
    #[must_use]
    pub fn level(level: Level) -> Self {
        let mut lines = String::new();
        push_line(&mut lines, LEVEL_KEY, "int", &level.ordinal().to_string());
        Self { lines }
    }

    /// Envelope at [`Level::TRACE`].
    #[must_use]
    pub fn trace() -> Self {
        Self::level(Level::TRACE)
    }

    /// Envelope at [`Level::DEBUG`].
    #[must_use]
    pub fn debug() -> Self {
        Self::level(Level::DEBUG)
    }

    /// Envelope at [`Level::INFO`].
    #[must_use]
    pub fn info() -> Self {
        Self::level(Level::INFO)
    }

    /// Envelope at [`Level::WARN`].
    #[must_use]
    pub fn warn() -> Self {
        Self::level(Level::WARN)
    }

    /// Envelope at [`Level::ERROR`].
    #[must_use]
    pub fn error() -> Self {
        Self::level(Level::ERROR)
    }

    /// Envelope at [`Level::FATAL`].
    #[must_use]
    pub fn fatal() -> Self {
        Self::level(Level::FATAL)
    }

    /// Append a tag of any supported kind.
    #[must_use]
    pub fn with_tag(&self, key: &str, value: impl Into<TagValue>) -> Self {
        let value = value.into();
        let text = match &value {
            TagValue::Raw(raw) => raw.to_string(),
            other => other.to_string(),
        };
        let mut lines = self.lines.clone();
        push_line(&mut lines, key, value.kind().wire_name(), &text);
        Self { lines }
    }

    /// Append a string tag.
    #[must_use]
    pub fn with_string(&self, key: &str, value: &str) -> Self {
        self.with_tag(key, value)
    }

    /// Append an integer tag.
    #[must_use]
    pub fn with_int(&self, key: &str, value: i64) -> Self {
        self.with_tag(key, value)
    }

    /// Append a float tag.
    #[must_use]
    pub fn with_float(&self, key: &str, value: f64) -> Self {
        self.with_tag(key, value)
    }

    /// Append a boolean tag.
    #[must_use]
    pub fn with_bool(&self, key: &str, value: bool) -> Self {
        self.with_tag(key, value)
    }

    /// Append any serializable value as a raw JSON tag.
    pub fn with_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<Self, serde_json::Error> {
        TagValue::serialized(value).map(|value| self.with_tag(key, value))
    }

    /// Append the caller's `file line` as the `trace` tag.
    #[must_use]
    #[track_caller]
    pub fn with_trace(&self) -> Self {
        let location = Location::caller();
        let file = Path::new(location.file())
            .file_name()
            .map_or_else(|| location.file().into(), |name| name.to_string_lossy());
        self.with_string("trace", &format!("{file} {}", location.line()))
    }

    /// Append the error's description as the `error` tag.
    #[must_use]
    pub fn with_error<E>(&self, error: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        self.with_string("error", &error.to_string())
    }

    /// Terminal step: the envelope followed by the rendered message.
    ///
    /// Pass `format_args!` for templated messages.
    pub fn with_message(&self, message: impl fmt::Display) -> String {
        format!("{self}{message}")
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(MARKER)?;
        formatter.write_str(&self.lines)?;
        formatter.write_str(MARKER)
    }
}

impl From<Envelope> for String {
    fn from(envelope: Envelope) -> Self {
        envelope.to_string()
    }
}

fn push_line(lines: &mut String, key: &str, kind: &str, value: &str) {
    lines.push_str(&escape_field(key));
    lines.push('\t');
    lines.push_str(kind);
    lines.push('\t');
    lines.push_str(&escape_field(value));
    lines.push('\n');
}

pub(crate) fn escape_field(field: &str) -> Cow<'_, str> {
    if !field.contains(['\\', '\t', '\n', '\r']) {
        return Cow::Borrowed(field);
    }
    let mut escaped = String::with_capacity(field.len() + 8);
    for ch in field.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    Cow::Owned(escaped)
}

pub(crate) fn unescape_field(field: &str) -> Cow<'_, str> {
    if !field.contains('\\') {
        return Cow::Borrowed(field);
    }
    let mut unescaped = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            unescaped.push(ch);
            continue;
        }
        match chars.next() {
            Some('\\') => unescaped.push('\\'),
            Some('t') => unescaped.push('\t'),
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some(other) => {
                unescaped.push('\\');
                unescaped.push(other);
            },
            None => unescaped.push('\\'),
        }
    }
    Cow::Owned(unescaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_envelope_has_single_level_line() {
        let encoded = Envelope::warn().to_string();
        assert_eq!(encoded, format!("{MARKER}_level\tint\t3\n{MARKER}"));
    }

    #[test]
    fn tags_are_appended_in_call_order() {
        let encoded = Envelope::info()
            .with_string("first", "a")
            .with_int("second", 2)
            .to_string();
        let first = encoded.find("first").unwrap_or(usize::MAX);
        let second = encoded.find("second").unwrap_or(0);
        assert!(first < second);
    }

    #[test]
    fn builders_do_not_mutate_the_receiver() {
        let base = Envelope::info().with_string("shared", "yes");
        let left = base.with_int("branch", 1);
        let right = base.with_int("branch", 2);

        assert_ne!(left, right);
        assert!(!base.to_string().contains("branch"));
    }

    #[test]
    fn with_message_appends_rendered_template() {
        let line = Envelope::info().with_message(format_args!("Hello {}", "World"));
        assert!(line.ends_with(&format!("{MARKER}Hello World")));
    }

    #[test]
    fn with_trace_records_this_file() {
        let encoded = Envelope::info().with_trace().to_string();
        assert!(encoded.contains("trace\tstring\tenvelope.rs "));
    }

    #[test]
    fn escaping_round_trips_control_characters() {
        let raw = "tab\there\nnew\\line\rcr \\n literal";
        let escaped = escape_field(raw);
        assert!(!escaped.contains(['\t', '\n', '\r']));
        assert_eq!(unescape_field(&escaped), raw);
    }

    #[test]
    fn unescape_keeps_unknown_sequences() {
        assert_eq!(unescape_field("a\\qb\\"), "a\\qb\\");
    }
}
