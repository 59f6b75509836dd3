//! Severity scale shared by envelopes, context tags, and writers.

use logwire_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordinal severity of a log record.
///
/// Named levels occupy `1..=5`. Any ordinal below [`Level::DEBUG`] renders as
/// `trace` and any ordinal above [`Level::ERROR`] renders as `fatal`, so every
/// integer decoded from an envelope has a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(i32);

impl Level {
    /// Virtual level below debug.
    pub const TRACE: Self = Self(0);
    /// Debug level.
    pub const DEBUG: Self = Self(1);
    /// Info level. Default for messages without an envelope.
    pub const INFO: Self = Self(2);
    /// Warn level.
    pub const WARN: Self = Self(3);
    /// Error level.
    pub const ERROR: Self = Self(4);
    /// Fatal level.
    pub const FATAL: Self = Self(5);

    /// Wrap a raw ordinal. Out-of-range values are kept as-is.
    #[must_use]
    pub const fn from_ordinal(ordinal: i32) -> Self {
        Self(ordinal)
    }

    /// Raw ordinal.
    #[must_use]
    pub const fn ordinal(self) -> i32 {
        self.0
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self.0 {
            1 => "debug",
            2 => "info",
            3 => "warn",
            4 => "error",
            ordinal if ordinal < 1 => "trace",
            _ => "fatal",
        }
    }

    /// Returns true when `self` is at or above `threshold`.
    #[must_use]
    pub const fn is_at_least(self, threshold: Self) -> bool {
        self.0 >= threshold.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::INFO
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Failure to parse a level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelParseError {
    /// Trimmed input that matched no level.
    pub input: String,
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown log level {:?} (expected trace, debug, info, warn, error, fatal or an integer)",
            self.input
        )
    }
}

impl std::error::Error for LevelParseError {}

impl From<LevelParseError> for ErrorEnvelope {
    fn from(error: LevelParseError) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::new("domain", "invalid_level"), message)
            .with_metadata("input", error.input)
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    /// Accepts level names (case-insensitive, `warning` as an alias) or ordinals.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        if let Ok(ordinal) = trimmed.parse::<i32>() {
            return Ok(Self(ordinal));
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::TRACE),
            "debug" => Ok(Self::DEBUG),
            "info" => Ok(Self::INFO),
            "warn" | "warning" => Ok(Self::WARN),
            "error" => Ok(Self::ERROR),
            "fatal" => Ok(Self::FATAL),
            _ => Err(LevelParseError {
                input: trimmed.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_levels_have_canonical_names() {
        let names: Vec<&str> = [
            Level::TRACE,
            Level::DEBUG,
            Level::INFO,
            Level::WARN,
            Level::ERROR,
            Level::FATAL,
        ]
        .into_iter()
        .map(Level::name)
        .collect();
        assert_eq!(names, ["trace", "debug", "info", "warn", "error", "fatal"]);
    }

    #[test]
    fn out_of_range_ordinals_fall_back() {
        assert_eq!(Level::from_ordinal(-7).name(), "trace");
        assert_eq!(Level::from_ordinal(0).name(), "trace");
        assert_eq!(Level::from_ordinal(6).name(), "fatal");
        assert_eq!(Level::from_ordinal(i32::MAX).name(), "fatal");
    }

    #[test]
    fn threshold_comparison_is_inclusive() {
        assert!(Level::WARN.is_at_least(Level::WARN));
        assert!(Level::FATAL.is_at_least(Level::WARN));
        assert!(!Level::INFO.is_at_least(Level::WARN));
        assert!(Level::DEBUG < Level::INFO);
    }

    #[test]
    fn parses_names_and_ordinals() {
        assert_eq!("WARN".parse::<Level>(), Ok(Level::WARN));
        assert_eq!(" warning ".parse::<Level>(), Ok(Level::WARN));
        assert_eq!("4".parse::<Level>(), Ok(Level::ERROR));
        assert_eq!("-1".parse::<Level>(), Ok(Level::from_ordinal(-1)));
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn parse_error_maps_to_envelope() {
        let envelope: Option<ErrorEnvelope> = "loud".parse::<Level>().err().map(Into::into);
        let envelope = envelope.as_ref();
        assert_eq!(
            envelope.map(|error| error.code.code()),
            Some("invalid_level")
        );
        assert_eq!(
            envelope.and_then(|error| error.metadata.get("input").map(String::as_str)),
            Some("loud")
        );
    }
}
