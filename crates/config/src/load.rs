//! Config loading helpers (file + env).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::{ValidatedWriterConfig, WriterConfig, WriterEnv, apply_env_overrides};
use logwire_shared::{ErrorClass, ErrorCode, ErrorEnvelope, Result};
use std::path::Path;

/// Config file syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

/// Load the writer config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`WriterEnv`)
/// - config text
/// - defaults (`WriterConfig::default()`)
pub fn load_writer_config_from_sources(
    config_text: Option<(&str, ConfigFormat)>,
    env: &WriterEnv,
) -> Result<ValidatedWriterConfig> {
    let config = match config_text {
        None => WriterConfig::default(),
        Some((input, format)) => parse_config_unvalidated(input, format)?,
    };

    // env is applied last and also validates the resulting config.
    apply_env_overrides(config, env)
}

/// Load the writer config from an optional file path.
pub fn load_writer_config_from_path(
    config_path: Option<&Path>,
    env: &WriterEnv,
) -> Result<ValidatedWriterConfig> {
    let config = match config_path {
        None => WriterConfig::default(),
        Some(path) => {
            let format = detect_config_format(path)?;
            let config_text = read_config_file(path)?;
            parse_config_unvalidated(&config_text, format)?
        },
    };

    apply_env_overrides(config, env)
}

/// Load the writer config from std env and an optional file path.
pub fn load_writer_config_std_env(
    config_path: Option<&Path>,
) -> Result<ValidatedWriterConfig> {
    let env = WriterEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_writer_config_from_path(config_path, &env)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &WriterConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<WriterConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn detect_config_format(path: &Path) -> Result<ConfigFormat, ErrorEnvelope> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => Ok(ConfigFormat::Json),
        Some("toml") => Ok(ConfigFormat::Toml),
        _ => Err(ErrorEnvelope::expected(
            ErrorCode::new("config", "unsupported_format"),
            "config file must end in .toml or .json",
        )
        .with_metadata("path", path.display().to_string())),
    }
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        ErrorEnvelope::from(error).with_metadata("path", path.display().to_string())
    })
}
