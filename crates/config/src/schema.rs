//! Writer configuration schema, defaults, and validation.
//!
//! - Deserialization uses `serde` (TOML or JSON).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.

use logwire_domain::{DateLayout, Level};
use logwire_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum level setting: a level name or a raw ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LevelSetting {
    /// Raw ordinal, e.g. `3`.
    Ordinal(i32),
    /// Level name, e.g. `"warn"`.
    Name(String),
}

impl Default for LevelSetting {
    fn default() -> Self {
        Self::Name(Level::INFO.name().to_string())
    }
}

/// Output format of a writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Aligned human-readable text.
    Text,
}

impl OutputFormat {
    /// Parse a format name (case-insensitive).
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// Canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Text => "text",
        }
    }
}

const DEFAULT_DATE_LAYOUT: &str = "rfc3339";

/// Writer configuration as read from a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct WriterConfig {
    /// Minimum level; lower records are dropped.
    pub level: LevelSetting,
    /// Output format.
    pub format: OutputFormat,
    /// `rfc3339`, `none`, or a `strftime` pattern.
    pub date_layout: String,
    /// Colorize text output.
    pub color: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            level: LevelSetting::default(),
            format: OutputFormat::default(),
            date_layout: DEFAULT_DATE_LAYOUT.to_string(),
            color: true,
        }
    }
}

impl WriterConfig {
    /// Validate the config and resolve typed settings.
    pub fn validate(self) -> Result<ValidatedWriterConfig, ConfigSchemaError> {
        let min_level = match &self.level {
            LevelSetting::Ordinal(ordinal) => Level::from_ordinal(*ordinal),
            LevelSetting::Name(name) => {
                name.parse()
                    .map_err(|_| ConfigSchemaError::InvalidLevel {
                        value: name.clone(),
                    })?
            },
        };
        let date_layout = DateLayout::from_name(&self.date_layout).map_err(|error| {
            ConfigSchemaError::InvalidDateLayout {
                pattern: error.pattern,
            }
        })?;

        Ok(ValidatedWriterConfig {
            min_level,
            format: self.format,
            date_layout,
            color: self.color,
        })
    }
}

/// Validated writer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWriterConfig {
    /// Minimum level.
    pub min_level: Level,
    /// Output format.
    pub format: OutputFormat,
    /// Resolved timestamp layout.
    pub date_layout: DateLayout,
    /// Colorize text output.
    pub color: bool,
}

impl Default for ValidatedWriterConfig {
    fn default() -> Self {
        Self {
            min_level: Level::INFO,
            format: OutputFormat::Json,
            date_layout: DateLayout::Rfc3339,
            color: true,
        }
    }
}

/// Parse a writer config from a JSON string and validate it.
pub fn parse_writer_config_json(input: &str) -> Result<ValidatedWriterConfig, ErrorEnvelope> {
    let config: WriterConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate().map_err(Into::into)
}

/// Parse a writer config from a TOML string and validate it.
pub fn parse_writer_config_toml(input: &str) -> Result<ValidatedWriterConfig, ErrorEnvelope> {
    let config: WriterConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate().map_err(Into::into)
}

/// Validation failures for [`WriterConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// `level` names no known level.
    InvalidLevel {
        /// Raw value.
        value: String,
    },
    /// `dateLayout` is not a renderable `strftime` pattern.
    InvalidDateLayout {
        /// Raw pattern.
        pattern: String,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidLevel { .. } => ErrorCode::new("config", "invalid_level"),
            Self::InvalidDateLayout { .. } => ErrorCode::new("config", "invalid_date_layout"),
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLevel { value } => {
                write!(formatter, "level: unknown log level {value:?}")
            },
            Self::InvalidDateLayout { pattern } => {
                write!(formatter, "dateLayout: invalid date pattern {pattern:?}")
            },
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::InvalidLevel { value } => envelope
                .with_metadata("field", "level")
                .with_metadata("value", value),
            ConfigSchemaError::InvalidDateLayout { pattern } => envelope
                .with_metadata("field", "dateLayout")
                .with_metadata("value", pattern),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_to_info_json_rfc3339() -> Result<(), ConfigSchemaError> {
        let validated = WriterConfig::default().validate()?;
        assert_eq!(validated, ValidatedWriterConfig::default());
        Ok(())
    }

    #[test]
    fn toml_accepts_names_and_ordinals() -> Result<(), ErrorEnvelope> {
        let named = parse_writer_config_toml("level = \"WARN\"\nformat = \"text\"\n")?;
        assert_eq!(named.min_level, Level::WARN);
        assert_eq!(named.format, OutputFormat::Text);

        let ordinal = parse_writer_config_toml("level = 4\ndateLayout = \"none\"\n")?;
        assert_eq!(ordinal.min_level, Level::ERROR);
        assert_eq!(ordinal.date_layout, DateLayout::Omit);
        Ok(())
    }

    #[test]
    fn json_accepts_custom_patterns() -> Result<(), ErrorEnvelope> {
        let validated =
            parse_writer_config_json(r#"{"dateLayout":"%H:%M:%S","color":false}"#)?;
        assert_eq!(
            validated.date_layout,
            DateLayout::Pattern("%H:%M:%S".to_string())
        );
        assert!(!validated.color);
        Ok(())
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = parse_writer_config_toml("colour = true\n").err();
        assert_eq!(
            error.as_ref().map(|error| error.code.code()),
            Some("invalid_toml")
        );
    }

    #[test]
    fn invalid_level_surfaces_metadata() {
        let error = parse_writer_config_json(r#"{"level":"loud"}"#).err();
        let error = error.as_ref();
        assert_eq!(error.map(|error| error.code.code()), Some("invalid_level"));
        assert_eq!(
            error.and_then(|error| error.metadata.get("value").cloned()),
            Some("loud".to_string())
        );
    }

    #[test]
    fn invalid_date_pattern_is_rejected_up_front() {
        let error = parse_writer_config_toml("dateLayout = \"%Q\"\n").err();
        assert_eq!(
            error.as_ref().map(|error| error.code.code()),
            Some("invalid_date_layout")
        );
    }

    #[test]
    fn output_format_names_parse() {
        assert_eq!(OutputFormat::parse(" TEXT "), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("yaml"), None);
        assert_eq!(OutputFormat::Json.as_str(), "json");
    }
}
