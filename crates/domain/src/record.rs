//! Decoded log record and timestamp layout.

use crate::{Level, Tag};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, SecondsFormat, Utc};
use logwire_shared::{ErrorCode, ErrorEnvelope};
use std::fmt::{self, Write as _};

/// How a record's timestamp is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum DateLayout {
    /// Omit the timestamp entirely.
    Omit,
    /// RFC 3339 with second precision in UTC, e.g. `2024-05-01T12:00:00Z`.
    #[default]
    Rfc3339,
    /// Custom `strftime` pattern.
    Pattern(String),
}

/// Failure to render a timestamp with a custom pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLayoutError {
    /// Offending pattern.
    pub pattern: String,
}

impl fmt::Display for DateLayoutError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "invalid date pattern {:?}", self.pattern)
    }
}

impl std::error::Error for DateLayoutError {}

impl From<DateLayoutError> for ErrorEnvelope {
    fn from(error: DateLayoutError) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::new("domain", "invalid_date_layout"), message)
            .with_metadata("pattern", error.pattern)
    }
}

impl DateLayout {
    /// Build a layout from its configuration name.
    ///
    /// `none`/`omit` omit the date, `rfc3339` selects the default layout, and
    /// anything else is treated as a `strftime` pattern.
    pub fn from_name(name: &str) -> Result<Self, DateLayoutError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "omit" => Ok(Self::Omit),
            "rfc3339" => Ok(Self::Rfc3339),
            _ => {
                let layout = Self::Pattern(name.to_string());
                layout.validate()?;
                Ok(layout)
            },
        }
    }

    /// Returns true when the layout omits the timestamp.
    #[must_use]
    pub const fn is_omitted(&self) -> bool {
        matches!(self, Self::Omit)
    }

    /// Reject patterns chrono cannot render.
    pub fn validate(&self) -> Result<(), DateLayoutError> {
        match self {
            Self::Pattern(pattern) => {
                if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                    return Err(DateLayoutError {
                        pattern: pattern.clone(),
                    });
                }
                Ok(())
            },
            Self::Omit | Self::Rfc3339 => Ok(()),
        }
    }

    /// Render `timestamp`, or `None` for [`DateLayout::Omit`].
    pub fn render(&self, timestamp: &DateTime<Utc>) -> Result<Option<String>, DateLayoutError> {
        match self {
            Self::Omit => Ok(None),
            Self::Rfc3339 => Ok(Some(timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))),
            Self::Pattern(pattern) => {
                let mut rendered = String::new();
                write!(rendered, "{}", timestamp.format(pattern)).map_err(|_| DateLayoutError {
                    pattern: pattern.clone(),
                })?;
                Ok(Some(rendered))
            },
        }
    }
}

/// One decoded, filtered, and merged log entry, ready for a formatter.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Severity decoded from the envelope.
    pub level: Level,
    /// Message text with trailing newlines removed.
    pub message: String,
    /// Context tags followed by in-place tags.
    pub tags: Vec<Tag>,
    /// Moment the record was written.
    pub timestamp: DateTime<Utc>,
}

impl LogRecord {
    /// Build a record, stripping trailing newlines from the message.
    pub fn new(
        level: Level,
        message: impl Into<String>,
        tags: Vec<Tag>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut message = message.into();
        let trimmed = message.trim_end_matches('\n').len();
        message.truncate(trimmed);
        Self {
            level,
            message,
            tags,
            timestamp,
        }
    }

    /// Canonical level name.
    #[must_use]
    pub const fn level_name(&self) -> &'static str {
        self.level.name()
    }

    /// Level ordinal.
    #[must_use]
    pub const fn level_code(&self) -> i32 {
        self.level.ordinal()
    }
}
