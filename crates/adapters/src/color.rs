//! ANSI terminal colors.

use logwire_ports::{ColorClass, Colorizer};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";
const BOLD_RED: &str = "\x1b[1m\x1b[31m";

static ANSI_SGR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\x1b\[[;\d]*m").ok());

/// Remove ANSI SGR sequences from `text`.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    match ANSI_SGR.as_ref() {
        Some(pattern) => pattern.replace_all(text, ""),
        None => Cow::Borrowed(text),
    }
}

const fn sequence(class: ColorClass) -> &'static str {
    match class {
        ColorClass::Trace | ColorClass::Timestamp => GRAY,
        ColorClass::Debug => CYAN,
        ColorClass::Info => GREEN,
        ColorClass::Warn => YELLOW,
        ColorClass::Error => RED,
        ColorClass::Fatal => BOLD_RED,
    }
}

/// Colorizer emitting ANSI escape sequences.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiColorizer;

impl Colorizer for AnsiColorizer {
    fn colorize(&self, class: ColorClass, text: &str) -> String {
        format!("{}{text}{RESET}", sequence(class))
    }

    fn strip(&self, text: &str) -> String {
        strip_ansi(text).into_owned()
    }
}

/// Colorizer that leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainColorizer;

impl Colorizer for PlainColorizer {
    fn colorize(&self, _class: ColorClass, text: &str) -> String {
        text.to_string()
    }

    fn strip(&self, text: &str) -> String {
        strip_ansi(text).into_owned()
    }
}
