//! Envelope decoder.
//!
//! Parsing never fails: buffers without a complete envelope are returned as
//! plain messages at [`Level::INFO`], and malformed typed values degrade to
//! their literal text.

use crate::envelope::{LEVEL_KEY, MARKER, unescape_field};
use crate::{Level, Tag, TagKind, TagValue};
use std::borrow::Cow;

/// Result of decoding one raw log buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLog<'a> {
    /// Severity from the envelope, or [`Level::INFO`].
    pub level: Level,
    /// Residual message text with envelope blocks removed.
    pub message: Cow<'a, [u8]>,
    /// In-place tags in order of appearance, stamped with `level`.
    pub tags: Vec<Tag>,
}

impl<'a> DecodedLog<'a> {
    fn plain(buffer: &'a [u8]) -> Self {
        Self {
            level: Level::INFO,
            message: Cow::Borrowed(buffer),
            tags: Vec::new(),
        }
    }
}

/// Decode severity, message, and tags from a raw buffer.
///
/// Every complete envelope block in the buffer is decoded; text around the
/// blocks is concatenated into the message and leading spaces are trimmed.
/// The last severity line wins.
#[must_use]
pub fn parse_log(buffer: &[u8]) -> DecodedLog<'_> {
    let marker = MARKER.as_bytes();
    let mut level = None;
    let mut tags = Vec::new();
    let mut message = Vec::new();
    let mut cursor = 0;
    let mut decoded_any = false;

    while let Some(open) = find(buffer, marker, cursor) {
        let block_start = open + marker.len();
        let Some(close) = find_closing(buffer, marker, block_start) else {
            break;
        };
        message.extend_from_slice(buffer.get(cursor..open).unwrap_or_default());
        decode_block(
            buffer.get(block_start..close).unwrap_or_default(),
            &mut level,
            &mut tags,
        );
        decoded_any = true;
        cursor = close + marker.len();
    }

    if !decoded_any {
        return DecodedLog::plain(buffer);
    }

    message.extend_from_slice(buffer.get(cursor..).unwrap_or_default());
    let leading = message.iter().take_while(|byte| **byte == b' ').count();
    message.drain(..leading);

    let level = level.unwrap_or(Level::INFO);
    for tag in &mut tags {
        tag.level = level;
    }

    DecodedLog {
        level,
        message: Cow::Owned(message),
        tags,
    }
}

fn decode_block(block: &[u8], level: &mut Option<Level>, tags: &mut Vec<Tag>) {
    for raw_line in block.split(|byte| *byte == b'\n') {
        if raw_line.is_empty() {
            continue;
        }
        let line = String::from_utf8_lossy(raw_line);
        let mut fields = line.splitn(3, '\t');
        let (Some(key), Some(kind), Some(value)) = (fields.next(), fields.next(), fields.next())
        else {
            continue;
        };

        if key == LEVEL_KEY {
            *level = Some(value.trim().parse().map_or(Level::INFO, Level::from_ordinal));
            continue;
        }

        let value = unescape_field(value);
        tags.push(Tag {
            key: unescape_field(key).into_owned(),
            level: Level::INFO,
            value: decode_value(kind, &value),
        });
    }
}

fn decode_value(kind: &str, text: &str) -> TagValue {
    let fallback = || TagValue::String(text.to_string());
    match TagKind::from_wire_name(kind) {
        Some(TagKind::String) | None => fallback(),
        Some(TagKind::Int) => text.parse().map_or_else(|_| fallback(), TagValue::Int),
        Some(TagKind::Float) => text.parse().map_or_else(|_| fallback(), TagValue::Float),
        Some(TagKind::Bool) => text.parse().map_or_else(|_| fallback(), TagValue::Bool),
        Some(TagKind::Raw) => serde_json::from_str(text).map_or_else(|_| fallback(), TagValue::Raw),
    }
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|offset| from + offset)
}

/// The closing marker sits at the start of the block or right after a newline.
fn find_closing(haystack: &[u8], needle: &[u8], block_start: usize) -> Option<usize> {
    let mut from = block_start;
    loop {
        let candidate = find(haystack, needle, from)?;
        if candidate == block_start || haystack.get(candidate - 1) == Some(&b'\n') {
            return Some(candidate);
        }
        from = candidate + 1;
    }
}
