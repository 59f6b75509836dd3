//! Elastic tab-stop column alignment.

use crate::color::strip_ansi;
use logwire_ports::ColumnAligner;

/// Default gap between columns.
pub const DEFAULT_PADDING: usize = 2;

/// Aligner that turns tab-terminated cells into space-padded columns.
///
/// A column spans consecutive lines that have a tab-terminated cell at that
/// position; every cell in it is padded to the widest cell plus `padding`.
/// Widths count characters with ANSI color sequences removed.
#[derive(Debug, Clone, Copy)]
pub struct TabAligner {
    padding: usize,
}

impl TabAligner {
    /// Aligner with a custom column gap.
    #[must_use]
    pub const fn with_padding(padding: usize) -> Self {
        Self { padding }
    }
}

impl Default for TabAligner {
    fn default() -> Self {
        Self::with_padding(DEFAULT_PADDING)
    }
}

impl ColumnAligner for TabAligner {
    fn align(&self, lines: &[&str]) -> Vec<String> {
        let rows: Vec<Vec<&str>> = lines.iter().map(|line| line.split('\t').collect()).collect();
        let cell_widths: Vec<Vec<usize>> = rows
            .iter()
            .map(|cells| {
                let terminated = cells.len().saturating_sub(1);
                cells.iter().take(terminated).map(|cell| visible_width(cell)).collect()
            })
            .collect();
        let column_widths = column_widths(&cell_widths, self.padding);

        rows.iter()
            .zip(cell_widths.iter().zip(&column_widths))
            .map(|(cells, (widths, columns))| {
                let mut line = String::new();
                for (index, cell) in cells.iter().enumerate() {
                    line.push_str(cell);
                    if let (Some(width), Some(column)) = (widths.get(index), columns.get(index)) {
                        line.extend(std::iter::repeat_n(' ', column.saturating_sub(*width)));
                    }
                }
                line
            })
            .collect()
    }
}

fn visible_width(cell: &str) -> usize {
    strip_ansi(cell).chars().count()
}

fn column_widths(cell_widths: &[Vec<usize>], padding: usize) -> Vec<Vec<usize>> {
    let mut columns: Vec<Vec<usize>> = cell_widths.iter().map(|row| vec![0; row.len()]).collect();
    let column_count = cell_widths.iter().map(Vec::len).max().unwrap_or(0);

    for column in 0..column_count {
        let mut block_start = None;
        for index in 0..=cell_widths.len() {
            let in_block = cell_widths.get(index).is_some_and(|row| row.len() > column);
            match (in_block, block_start) {
                (true, None) => block_start = Some(index),
                (false, Some(start)) => {
                    let block = cell_widths.get(start..index).unwrap_or_default();
                    let width = block
                        .iter()
                        .filter_map(|row| row.get(column))
                        .max()
                        .copied()
                        .unwrap_or(0)
                        + padding;
                    for row in columns.get_mut(start..index).unwrap_or_default() {
                        if let Some(slot) = row.get_mut(column) {
                            *slot = width;
                        }
                    }
                    block_start = None;
                },
                _ => {},
            }
        }
    }

    columns
}
