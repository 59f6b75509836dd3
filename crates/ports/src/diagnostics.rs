//! Diagnostic side channel contract.

/// A sink that receives the library's own pre-formatted diagnostic lines.
///
/// Writers report formatting failures here instead of through their output
/// sink, so a failing record never produces a partial line.
pub trait DiagnosticSink: Send + Sync {
    /// Write a line to the sink.
    fn write_line(&self, line: &str);
}
