//! JSON writer E2E tests.

use logwire::{
    Envelope, JsonFormatter, Level, LogWriter, TagContext, WriterDeps, no_timestamp_options,
};
use logwire_testkit::{FixedClock, MemoryDiagnostics, MemorySink};
use serde_json::{Value, json};
use std::error::Error;
use std::io::Write;
use std::sync::Arc;

fn writer(context: TagContext, min_level: Level) -> (LogWriter<MemorySink>, MemorySink) {
    let sink = MemorySink::new();
    let writer = LogWriter::new(
        context,
        sink.clone(),
        no_timestamp_options(min_level, Arc::new(JsonFormatter)),
        WriterDeps {
            clock: Arc::new(FixedClock::default()),
            diagnostics: Arc::new(MemoryDiagnostics::default()),
        },
    );
    (writer, sink)
}

#[test]
fn retrying_line_matches_exactly() -> Result<(), Box<dyn Error>> {
    let (mut writer, sink) = writer(TagContext::new(), Level::INFO);
    writer.write_all(
        Envelope::info()
            .with_int("attempt", 3)
            .with_message("retrying")
            .as_bytes(),
    )?;

    assert_eq!(
        sink.text(),
        "{\"levelCode\":2,\"level\":\"info\",\"message\":\"retrying\",\"attempt\":[3]}\n"
    );
    Ok(())
}

#[test]
fn tags_above_the_record_level_stay_hidden() -> Result<(), Box<dyn Error>> {
    let context = TagContext::new()
        .append_info("requestId", "r1")
        .append_error("body", "{...}");
    let (mut writer, sink) = writer(context, Level::INFO);

    writer.write_all(Envelope::warn().with_message("slow").as_bytes())?;
    writer.write_all(Envelope::error().with_message("failed").as_bytes())?;

    let lines: Vec<Value> = sink
        .text()
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(
        lines,
        vec![
            json!({ "levelCode": 3, "level": "warn", "message": "slow", "requestId": ["r1"] }),
            json!({
                "levelCode": 4,
                "level": "error",
                "message": "failed",
                "requestId": ["r1"],
                "body": ["{...}"],
            }),
        ]
    );
    Ok(())
}

#[test]
fn reserved_tag_keys_are_prefixed() -> Result<(), Box<dyn Error>> {
    let (mut writer, sink) = writer(TagContext::new(), Level::INFO);
    writer.write_all(
        Envelope::info()
            .with_string("message", "shadow")
            .with_message("real")
            .as_bytes(),
    )?;

    let line: Value = serde_json::from_slice(&sink.contents())?;
    assert_eq!(line["message"], json!("real"));
    assert_eq!(line["tag.message"], json!(["shadow"]));
    Ok(())
}

#[test]
fn below_threshold_writes_nothing() -> Result<(), Box<dyn Error>> {
    let (mut writer, sink) = writer(TagContext::new(), Level::WARN);
    writer.write_all(b"plain info")?;
    writer.write_all(Envelope::debug().with_message("noise").as_bytes())?;
    assert_eq!(sink.write_count(), 0);
    Ok(())
}
