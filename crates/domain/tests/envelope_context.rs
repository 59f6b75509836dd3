//! Integration coverage for envelopes, decoding, and context tags.

use logwire_domain::{
    DateLayout, Envelope, Level, LevelParseError, Tag, TagContext, TagValue, parse_log,
};
use logwire_shared::ErrorEnvelope;

#[test]
fn decoded_tags_follow_context_tags() {
    let context = TagContext::new()
        .append_info("requestId", "req_1")
        .append_error("payload", "{\"big\":true}");
    let line = Envelope::warn().with_int("attempt", 3).with_message("retrying\n");
    let decoded = parse_log(line.as_bytes());

    let mut tags = context.tags_at_or_below(decoded.level);
    tags.extend(decoded.tags);

    assert_eq!(
        tags,
        vec![
            Tag::new("requestId", Level::INFO, "req_1"),
            Tag::new("attempt", Level::WARN, 3_i64),
        ]
    );
    assert_eq!(&*decoded.message, b"retrying\n");
}

#[test]
fn shared_envelope_prefix_serves_several_messages() {
    let base = Envelope::error().with_string("component", "db");
    let first = parse_log(base.with_message("connect failed").as_bytes()).tags;
    let second = parse_log(base.with_bool("retry", false).with_message("gave up").as_bytes()).tags;

    assert_eq!(first.len(), 1);
    assert_eq!(
        second.last().map(|tag| tag.value.clone()),
        Some(TagValue::Bool(false))
    );
}

#[test]
fn bare_envelope_decodes_to_empty_message() {
    let line = Envelope::fatal().to_string();
    let decoded = parse_log(line.as_bytes());
    assert_eq!(decoded.level, Level::FATAL);
    assert!(decoded.message.is_empty());
}

#[test]
fn level_parse_errors_map_into_error_envelopes() -> Result<(), LevelParseError> {
    let Err(error) = "verbose".parse::<Level>() else {
        return Err(LevelParseError {
            input: "verbose".to_string(),
        });
    };

    let envelope: ErrorEnvelope = error.into();
    assert_eq!(envelope.code.namespace(), "domain");
    assert_eq!(envelope.code.code(), "invalid_level");
    assert_eq!(envelope.metadata.get("input"), Some(&"verbose".to_string()));
    Ok(())
}

#[test]
fn date_layout_errors_map_into_error_envelopes() {
    let envelope: Option<ErrorEnvelope> = DateLayout::from_name("%Y-%").err().map(Into::into);
    assert_eq!(
        envelope.as_ref().map(|error| error.code.code()),
        Some("invalid_date_layout")
    );
    assert_eq!(
        envelope
            .as_ref()
            .and_then(|error| error.metadata.get("pattern").cloned()),
        Some("%Y-%".to_string())
    );
}
