//! Environment variable parsing and env-to-config merging.
//!
//! Env parsing is strict: a variable that is present must hold a valid value.

use crate::schema::{LevelSetting, OutputFormat, ValidatedWriterConfig, WriterConfig};
use logwire_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var: minimum level (name or ordinal).
pub const ENV_LEVEL: &str = "LOGWIRE_LEVEL";
/// Env var: output format (`json` or `text`).
pub const ENV_FORMAT: &str = "LOGWIRE_FORMAT";
/// Env var: date layout (`rfc3339`, `none`, or a `strftime` pattern).
pub const ENV_DATE_LAYOUT: &str = "LOGWIRE_DATE_LAYOUT";
/// Env var: colorize text output.
pub const ENV_COLOR: &str = "LOGWIRE_COLOR";

const ENV_VARS: [&str; 4] = [ENV_LEVEL, ENV_FORMAT, ENV_DATE_LAYOUT, ENV_COLOR];

/// Parsed env overrides. `None` leaves the config value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterEnv {
    /// Minimum level override.
    pub level: Option<String>,
    /// Output format override.
    pub format: Option<OutputFormat>,
    /// Date layout override.
    pub date_layout: Option<String>,
    /// Color override.
    pub color: Option<bool>,
}

impl WriterEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            level: parse_optional_trimmed_string(map, ENV_LEVEL)?,
            format: parse_optional_format(map, ENV_FORMAT)?,
            date_layout: parse_optional_trimmed_string(map, ENV_DATE_LAYOUT)?,
            color: parse_optional_bool(map, ENV_COLOR)?,
        })
    }

    /// Parse env overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ENV_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }

        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.level.is_none()
            && self.format.is_none()
            && self.date_layout.is_none()
            && self.color.is_none()
    }
}

/// Apply env overrides on top of `base`, then validate.
pub fn apply_env_overrides(
    base: WriterConfig,
    env: &WriterEnv,
) -> Result<ValidatedWriterConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(level) = &env.level {
        tracing::debug!(var = ENV_LEVEL, value = %level, "applying env override");
        config.level = LevelSetting::Name(level.clone());
    }
    if let Some(format) = env.format {
        tracing::debug!(var = ENV_FORMAT, value = format.as_str(), "applying env override");
        config.format = format;
    }
    if let Some(date_layout) = &env.date_layout {
        tracing::debug!(var = ENV_DATE_LAYOUT, value = %date_layout, "applying env override");
        config.date_layout.clone_from(date_layout);
    }
    if let Some(color) = env.color {
        tracing::debug!(var = ENV_COLOR, value = color, "applying env override");
        config.color = color;
    }

    config.validate().map_err(Into::into)
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<String>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned()))
}

fn parse_optional_format(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<OutputFormat>, EnvParseError> {
    let Some(raw) = parse_optional_trimmed_string(map, var)? else {
        return Ok(None);
    };

    OutputFormat::parse(&raw)
        .map(Some)
        .ok_or(EnvParseError::InvalidEnum { var, value: raw })
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

/// Env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "env_empty"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "env_invalid_bool"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "env_invalid_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} is set but empty"),
            Self::InvalidBool { var, value } => {
                write!(formatter, "{var} must be a boolean, got {value:?}")
            },
            Self::InvalidEnum { var, value } => {
                write!(formatter, "{var} has an unsupported value {value:?}")
            },
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => {
                envelope = envelope.with_metadata("env_var", var);
            },
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidEnum { var, value } => {
                envelope = envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value);
            },
        }

        envelope
    }
}
