//! Color boundary contract.

use logwire_domain::Level;

/// Semantic color slot for a piece of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorClass {
    /// Trace level names.
    Trace,
    /// Debug level names.
    Debug,
    /// Info level names.
    Info,
    /// Warn level names.
    Warn,
    /// Error level names and failure diagnostics.
    Error,
    /// Fatal level names.
    Fatal,
    /// Timestamps.
    Timestamp,
}

impl ColorClass {
    /// Color slot for a level name, with the same fallbacks as [`Level::name`].
    #[must_use]
    pub const fn for_level(level: Level) -> Self {
        match level.ordinal() {
            1 => Self::Debug,
            2 => Self::Info,
            3 => Self::Warn,
            4 => Self::Error,
            ordinal if ordinal < 1 => Self::Trace,
            _ => Self::Fatal,
        }
    }
}

/// Boundary contract for terminal coloring.
pub trait Colorizer: Send + Sync {
    /// Wrap `text` in the color of `class`.
    fn colorize(&self, class: ColorClass, text: &str) -> String;

    /// Remove any coloring from `text`.
    fn strip(&self, text: &str) -> String;
}
