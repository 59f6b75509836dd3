//! Tag model: key, severity, and a kind-tagged value.

use crate::Level;
use serde::{Serialize, Serializer};
use std::fmt;

/// Kind of a tag value, as written into envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// UTF-8 text.
    String,
    /// Signed 64-bit integer.
    Int,
    /// 64-bit float.
    Float,
    /// Boolean.
    Bool,
    /// Pre-encoded JSON payload.
    Raw,
}

impl TagKind {
    /// Kind marker used in the envelope wire format.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float64",
            Self::Bool => "bool",
            Self::Raw => "json",
        }
    }

    /// Reverse of [`TagKind::wire_name`].
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "int" => Some(Self::Int),
            "float64" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            "json" => Some(Self::Raw),
            _ => None,
        }
    }
}

/// Value carried by a tag.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// Text value.
    String(String),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Pre-encoded JSON value.
    Raw(serde_json::Value),
}

impl TagValue {
    /// Serialize any value into a raw JSON tag value.
    pub fn serialized<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Self::Raw)
    }

    /// Kind of this value.
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        match self {
            Self::String(_) => TagKind::String,
            Self::Int(_) => TagKind::Int,
            Self::Float(_) => TagKind::Float,
            Self::Bool(_) => TagKind::Bool,
            Self::Raw(_) => TagKind::Raw,
        }
    }

    /// Returns true when both values have the same kind and serialize alike.
    ///
    /// Floats compare by their textual form: every `NaN` matches, `0.0` and
    /// `-0.0` do not.
    #[must_use]
    pub fn same_serialized(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => {
                (left.is_nan() && right.is_nan()) || left.to_bits() == right.to_bits()
            },
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Raw(left), Self::Raw(right)) => left == right,
            _ => false,
        }
    }
}

impl fmt::Display for TagValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => formatter.write_str(value),
            Self::Int(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Bool(value) => write!(formatter, "{value}"),
            Self::Raw(serde_json::Value::String(value)) => formatter.write_str(value),
            Self::Raw(value) => write!(formatter, "{value}"),
        }
    }
}

impl Serialize for TagValue {
    /// Untagged: each value serializes as its natural JSON type.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(value) => serializer.serialize_str(value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Raw(value) => value.serialize(serializer),
        }
    }
}

impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for TagValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for TagValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<serde_json::Value> for TagValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Raw(value)
    }
}

/// A key/value annotation scoped to a severity.
///
/// Keys are not unique: every occurrence is kept and rendered as one entry of
/// a per-key list.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Severity the tag was recorded at.
    pub level: Level,
    /// Tag value.
    pub value: TagValue,
}

impl Tag {
    /// Build a tag.
    pub fn new(key: impl Into<String>, level: Level, value: impl Into<TagValue>) -> Self {
        Self {
            key: key.into(),
            level,
            value: value.into(),
        }
    }

    /// Kind of the tag value.
    #[must_use]
    pub const fn kind(&self) -> TagKind {
        self.value.kind()
    }
}
