//! # logwire-app
//!
//! Log writer orchestration: decode envelopes, apply the level threshold,
//! merge context tags, format, and write one line per record.
//! This crate depends on `ports` and `domain`.

pub mod writer;

pub use writer::{FORMAT_FAILURE_PREFIX, LogWriter, WriterDeps, WriterOptions};

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use logwire_domain::domain_crate_version;
    use logwire_ports::ports_crate_version;

    #[test]
    fn app_can_use_ports_and_domain() {
        assert!(!app_crate_version().is_empty());
        assert!(!ports_crate_version().is_empty());
        assert!(!domain_crate_version().is_empty());
    }
}
