//! Envelope encode/decode E2E tests through the public facade.

use logwire::{Envelope, ErrorEnvelope, Level, Tag, TagContext, TagValue, parse_log};
use serde::Serialize;
use serde_json::json;
use std::error::Error;

#[derive(Serialize)]
struct Payload {
    id: u32,
    tags: Vec<&'static str>,
}

#[test]
fn producer_tags_survive_the_trip() -> Result<(), Box<dyn Error>> {
    let line = Envelope::error()
        .with_string("service", "billing")
        .with_int("attempt", 4)
        .with_float("ratio", 0.25)
        .with_bool("retry", false)
        .with_json("payload", &Payload {
            id: 9,
            tags: vec!["a", "b"],
        })?
        .with_message(format_args!("charge {} failed", "inv_7"));

    let decoded = parse_log(line.as_bytes());
    assert_eq!(decoded.level, Level::ERROR);
    assert_eq!(&*decoded.message, b"charge inv_7 failed");
    assert_eq!(
        decoded.tags,
        vec![
            Tag::new("service", Level::ERROR, "billing"),
            Tag::new("attempt", Level::ERROR, 4_i64),
            Tag::new("ratio", Level::ERROR, 0.25),
            Tag::new("retry", Level::ERROR, false),
            Tag::new(
                "payload",
                Level::ERROR,
                TagValue::Raw(json!({ "id": 9, "tags": ["a", "b"] }))
            ),
        ]
    );
    Ok(())
}

#[test]
fn control_characters_in_values_are_preserved() {
    let value = "line one\nline\ttwo\r\\end";
    let line = Envelope::info().with_string("text", value).with_message("m");
    let decoded = parse_log(line.as_bytes());
    assert_eq!(
        decoded.tags.first().map(|tag| tag.value.clone()),
        Some(TagValue::from(value))
    );
}

#[test]
fn messages_from_other_loggers_pass_through() {
    let decoded = parse_log(b"[2024-05-01] something happened");
    assert_eq!(decoded.level, Level::INFO);
    assert_eq!(&*decoded.message, b"[2024-05-01] something happened");
    assert!(decoded.tags.is_empty());
}

#[test]
fn contexts_fork_per_request() -> Result<(), ErrorEnvelope> {
    let service = TagContext::new().append_info("service", "billing");
    let first = service
        .append_info("requestId", "r1")
        .append_serialized(Level::DEBUG, "headers", &json!({ "accept": "json" }))?;
    let second = service.append_info("requestId", "r2");

    assert_eq!(service.len(), 1);
    assert_eq!(first.len(), 3);
    assert_eq!(first.tags_at_or_below(Level::TRACE).len(), 0);
    assert_eq!(first.tags_at_or_below(Level::DEBUG).len(), 1);
    assert_eq!(
        second.tags().last().map(|tag| tag.value.clone()),
        Some(TagValue::from("r2"))
    );
    Ok(())
}
