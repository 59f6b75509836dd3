//! # logwire-config
//!
//! Writer configuration schema, validation, and env overrides.
//! This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (file + env).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_COLOR, ENV_DATE_LAYOUT, ENV_FORMAT, ENV_LEVEL, EnvParseError, WriterEnv,
    apply_env_overrides,
};
pub use load::{
    ConfigFormat, load_writer_config_from_path, load_writer_config_from_sources,
    load_writer_config_std_env, to_pretty_toml,
};
pub use schema::{
    ConfigSchemaError, LevelSetting, OutputFormat, ValidatedWriterConfig, WriterConfig,
    parse_writer_config_json, parse_writer_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
