//! # logwire-adapters
//!
//! Adapter implementations for ports: JSON and text formatters, ANSI colors,
//! tab-stop alignment, the system clock, and stderr diagnostics.
//! This crate depends on `ports` and `shared`.

pub mod align;
pub mod clock;
pub mod color;
pub mod diagnostics;
pub mod json;
pub mod text;

pub use align::TabAligner;
pub use clock::SystemClock;
pub use color::{AnsiColorizer, PlainColorizer, strip_ansi};
pub use diagnostics::StderrDiagnostics;
pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use logwire_ports::ports_crate_version;
    use logwire_shared::shared_crate_version;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                continue;
            }
            if in_deps && line.starts_with("logwire-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn adapters_do_not_depend_on_app_or_config() {
        let deps = workspace_deps();
        let forbidden = ["logwire-app", "logwire-config", "logwire"];

        for dep in &deps {
            assert!(
                !forbidden.contains(&dep.as_str()),
                "forbidden dependency found: {dep}"
            );
        }
    }

    #[test]
    fn adapters_can_use_ports_and_shared() {
        assert!(!adapters_crate_version().is_empty());
        assert!(!ports_crate_version().is_empty());
        assert!(!shared_crate_version().is_empty());
    }
}
