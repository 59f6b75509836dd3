//! Human-readable text formatter.

use crate::align::TabAligner;
use crate::color::{AnsiColorizer, PlainColorizer};
use logwire_ports::{
    ColorClass, Colorizer, ColumnAligner, DateLayout, FormatError, Formatter, LogRecord,
};
use std::borrow::Cow;
use std::sync::Arc;

/// Formatter producing aligned, optionally colored text lines.
///
/// Cells are the level name (left-padded for `info` and `warn` so level names
/// line up), the timestamp, one `key:value` cell per tag, and the message.
/// The timestamp cell is dropped when the layout omits it and the message cell
/// is dropped when the message is empty.
#[derive(Clone)]
pub struct TextFormatter {
    colorizer: Arc<dyn Colorizer>,
    aligner: Arc<dyn ColumnAligner>,
}

impl TextFormatter {
    /// Formatter with explicit collaborators.
    pub fn new(colorizer: Arc<dyn Colorizer>, aligner: Arc<dyn ColumnAligner>) -> Self {
        Self { colorizer, aligner }
    }

    /// ANSI-colored formatter with default alignment.
    #[must_use]
    pub fn colored() -> Self {
        Self::new(Arc::new(AnsiColorizer), Arc::new(TabAligner::default()))
    }

    /// Uncolored formatter with default alignment.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(Arc::new(PlainColorizer), Arc::new(TabAligner::default()))
    }

    fn cells(&self, record: &LogRecord, date: Option<&str>) -> Vec<String> {
        let mut cells = Vec::with_capacity(record.tags.len() + 3);
        cells.push(
            self.colorizer
                .colorize(ColorClass::for_level(record.level), &padded_level(record.level_name())),
        );
        if let Some(date) = date {
            cells.push(self.colorizer.colorize(ColorClass::Timestamp, date));
        }
        cells.extend(record.tags.iter().map(|tag| {
            format!(
                "{}:{}",
                escape_cell(&tag.key),
                escape_cell(&tag.value.to_string())
            )
        }));

        let message = record.message.trim_end_matches('\n');
        if !message.is_empty() {
            cells.push(message.to_string());
        }
        cells
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::colored()
    }
}

impl std::fmt::Debug for TextFormatter {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("TextFormatter").finish_non_exhaustive()
    }
}

impl Formatter for TextFormatter {
    fn format(&self, record: &LogRecord, layout: &DateLayout) -> Result<Vec<u8>, FormatError> {
        let date = layout.render(&record.timestamp)?;
        let joined = self.cells(record, date.as_deref()).join("\t");
        let lines: Vec<&str> = joined.split('\n').collect();

        let mut output = self.aligner.align(&lines).join("\n");
        output.push('\n');
        Ok(output.into_bytes())
    }
}

/// Keeps a tag on one row: tabs and line breaks would split the cell.
fn escape_cell(text: &str) -> Cow<'_, str> {
    if !text.contains(['\t', '\n', '\r']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace('\t', "\\t")
            .replace('\n', "\\n")
            .replace('\r', "\\r"),
    )
}

fn padded_level(name: &str) -> String {
    match name {
        "info" | "warn" => format!(" {name}"),
        other => other.to_string(),
    }
}
