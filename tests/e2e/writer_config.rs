//! Config-driven writer E2E tests.

use logwire::{
    ConfigFormat, Envelope, Level, OutputFormat, TagContext, WriterEnv,
    load_writer_config_from_sources, log_writer_from_config,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::io::Write;

#[test]
fn toml_config_with_env_override_drives_the_writer() -> Result<(), Box<dyn Error>> {
    let file = r#"
level = "debug"
format = "text"
dateLayout = "none"
color = false
"#;
    let env = WriterEnv::from_map(&BTreeMap::from([
        ("LOGWIRE_FORMAT".to_string(), "json".to_string()),
        ("LOGWIRE_LEVEL".to_string(), "warn".to_string()),
    ]))?;
    let config = load_writer_config_from_sources(Some((file, ConfigFormat::Toml)), &env)?;
    assert_eq!(config.format, OutputFormat::Json);
    assert_eq!(config.min_level, Level::WARN);

    let mut writer = log_writer_from_config(TagContext::new(), Vec::new(), &config);
    writer.write_all(Envelope::info().with_message("hidden").as_bytes())?;
    writer.write_all(Envelope::error().with_message("shown").as_bytes())?;

    let output = writer.into_inner();
    let line: Value = serde_json::from_slice(&output)?;
    assert_eq!(line["message"], "shown");
    assert!(line.get("date").is_none());
    Ok(())
}
