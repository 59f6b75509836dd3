//! # logwire-ports
//!
//! Port traits for the logwire hexagonal architecture.
//!
//! This crate defines the seams between the log writer and its collaborators:
//! formatters, colorizers, column aligners, clocks, and the diagnostic side
//! channel. It depends only on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod align;
pub mod clock;
pub mod color;
pub mod diagnostics;
pub mod formatter;

pub use align::*;
pub use clock::*;
pub use color::*;
pub use diagnostics::*;
pub use formatter::*;

// Re-export domain types used in port signatures, so adapter crates can
// implement ports without directly depending on `logwire-domain`.
pub use logwire_domain::{DateLayout, DateLayoutError, Level, LogRecord, Tag, TagValue};
