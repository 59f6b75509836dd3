//! JSON line formatter.

use logwire_ports::{DateLayout, FormatError, Formatter, LogRecord, TagValue};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Cow;

const RESERVED_KEYS: [&str; 4] = ["levelCode", "level", "date", "message"];
const SHADOWED_PREFIX: &str = "tag.";

/// Formatter producing one JSON object per record.
///
/// Keys appear in a fixed order: `levelCode`, `level`, `date` (unless the
/// layout omits it), `message`, then one array per distinct tag key in order
/// of first appearance. Tag keys that collide with the fixed keys are written
/// as `tag.<key>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord, layout: &DateLayout) -> Result<Vec<u8>, FormatError> {
        let date = layout.render(&record.timestamp)?;
        let line = JsonLine {
            record,
            date: date.as_deref(),
            groups: group_tags(record)?,
        };
        let mut bytes = serde_json::to_vec(&line)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

struct JsonLine<'a> {
    record: &'a LogRecord,
    date: Option<&'a str>,
    groups: Vec<(Cow<'a, str>, Vec<&'a TagValue>)>,
}

impl Serialize for JsonLine<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("levelCode", &self.record.level_code())?;
        map.serialize_entry("level", self.record.level_name())?;
        if let Some(date) = self.date {
            map.serialize_entry("date", date)?;
        }
        map.serialize_entry("message", &self.record.message)?;
        for (key, values) in &self.groups {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

fn group_tags(record: &LogRecord) -> Result<Vec<(Cow<'_, str>, Vec<&TagValue>)>, FormatError> {
    let mut groups: Vec<(Cow<'_, str>, Vec<&TagValue>)> = Vec::new();
    for tag in &record.tags {
        if matches!(tag.value, TagValue::Float(value) if !value.is_finite()) {
            return Err(FormatError::NonFiniteFloat {
                key: tag.key.clone(),
            });
        }
        let key = output_key(&tag.key);
        match groups.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, values)) => values.push(&tag.value),
            None => groups.push((key, vec![&tag.value])),
        }
    }
    Ok(groups)
}

fn output_key(key: &str) -> Cow<'_, str> {
    if RESERVED_KEYS.contains(&key) {
        Cow::Owned(format!("{SHADOWED_PREFIX}{key}"))
    } else {
        Cow::Borrowed(key)
    }
}
