//! Text writer E2E tests.

use logwire::{
    DateLayout, Envelope, Level, LogWriter, TagContext, TextFormatter, WriterDeps, WriterOptions,
    strip_ansi,
};
use logwire_testkit::{FixedClock, MemoryDiagnostics, MemorySink};
use std::error::Error;
use std::io::Write;
use std::sync::Arc;

fn deps() -> WriterDeps {
    WriterDeps {
        clock: Arc::new(FixedClock::at_millis(1_714_564_800_250)),
        diagnostics: Arc::new(MemoryDiagnostics::default()),
    }
}

#[test]
fn plain_text_line_is_aligned() -> Result<(), Box<dyn Error>> {
    let sink = MemorySink::new();
    let mut writer = LogWriter::new(
        TagContext::new(),
        sink.clone(),
        WriterOptions::new(
            Level::INFO,
            Arc::new(TextFormatter::plain()),
            DateLayout::Rfc3339,
        ),
        deps(),
    );

    writer.write_all(
        Envelope::info()
            .with_int("attempt", 3)
            .with_message("retrying")
            .as_bytes(),
    )?;
    assert_eq!(
        sink.text(),
        " info  2024-05-01T12:00:00Z  attempt:3  retrying\n"
    );
    Ok(())
}

#[test]
fn colored_text_strips_to_plain_text() -> Result<(), Box<dyn Error>> {
    let sink = MemorySink::new();
    let mut writer = LogWriter::new(
        TagContext::new().append_info("job", "sync"),
        sink.clone(),
        WriterOptions::new(
            Level::INFO,
            Arc::new(TextFormatter::colored()),
            DateLayout::from_name("%H:%M:%S")?,
        ),
        deps(),
    );

    writer.write_all(Envelope::error().with_message("disk full").as_bytes())?;
    let text = sink.text();
    assert!(text.contains('\x1b'));
    assert_eq!(strip_ansi(&text), "error  12:00:00  job:sync  disk full\n");
    Ok(())
}
