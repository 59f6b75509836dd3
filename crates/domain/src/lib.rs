//! # logwire-domain
//!
//! Domain model for structured log envelopes.
//!
//! - **Level** - ordinal severity with trace/fatal fallback names
//! - **Tag** - key, severity, and kind-tagged value
//! - **Envelope** - inline encoder for plain-text log messages
//! - **`parse_log`** - decoder that never fails
//! - **`TagContext`** - immutable context tag store
//! - **`LogRecord`** - decoded entry handed to formatters
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use logwire_shared::shared_crate_version;

pub mod context;
pub mod envelope;
pub mod level;
pub mod parse;
pub mod record;
pub mod tag;

pub use context::TagContext;
pub use envelope::Envelope;
pub use level::{Level, LevelParseError};
pub use parse::{DecodedLog, parse_log};
pub use record::{DateLayout, DateLayoutError, LogRecord};
pub use tag::{Tag, TagKind, TagValue};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
