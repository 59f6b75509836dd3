//! Diagnostic sinks for the writer's side channel.

use crate::color::AnsiColorizer;
use logwire_ports::{ColorClass, Colorizer, DiagnosticSink};
use std::io::Write;

/// Diagnostic sink that writes red lines to stderr.
#[derive(Debug, Default)]
pub struct StderrDiagnostics;

impl DiagnosticSink for StderrDiagnostics {
    fn write_line(&self, line: &str) {
        let mut colored = AnsiColorizer.colorize(ColorClass::Error, line.trim_end_matches('\n'));
        colored.push('\n');
        if let Err(error) = std::io::stderr().lock().write_all(colored.as_bytes()) {
            eprintln!("logwire: diagnostics write failed: {error}");
        }
    }
}
