//! Column alignment boundary contract.

/// Boundary contract for aligning tab-separated cells into columns.
///
/// Input lines hold cells separated by `\t`; output lines replace the tabs
/// with padding. The last cell of a line is never padded.
pub trait ColumnAligner: Send + Sync {
    /// Align `lines` into columns.
    fn align(&self, lines: &[&str]) -> Vec<String>;
}
