//! Formatter boundary contract.

use logwire_domain::{DateLayout, DateLayoutError, LogRecord};
use logwire_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::fmt;

/// Failure to render a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The JSON encoder rejected the record.
    Serialization {
        /// Encoder message.
        message: String,
    },
    /// A float tag is NaN or infinite and has no JSON representation.
    NonFiniteFloat {
        /// Tag key carrying the value.
        key: String,
    },
    /// The timestamp pattern could not be rendered.
    DateLayout(DateLayoutError),
}

impl fmt::Display for FormatError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialization { message } => write!(formatter, "serialization failed: {message}"),
            Self::NonFiniteFloat { key } => {
                write!(formatter, "tag {key:?} holds a non-finite float")
            },
            Self::DateLayout(error) => write!(formatter, "{error}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DateLayout(error) => Some(error),
            Self::Serialization { .. } | Self::NonFiniteFloat { .. } => None,
        }
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: error.to_string(),
        }
    }
}

impl From<DateLayoutError> for FormatError {
    fn from(error: DateLayoutError) -> Self {
        Self::DateLayout(error)
    }
}

impl From<FormatError> for ErrorEnvelope {
    fn from(error: FormatError) -> Self {
        let message = error.to_string();
        match error {
            FormatError::Serialization { .. } => Self::unexpected(
                ErrorCode::new("format", "serialization_failed"),
                message,
                ErrorClass::NonRetriable,
            ),
            FormatError::NonFiniteFloat { key } => Self::expected(
                ErrorCode::new("format", "non_finite_float"),
                message,
            )
            .with_metadata("key", key),
            FormatError::DateLayout(error) => Self::expected(
                ErrorCode::new("format", "invalid_date_layout"),
                message,
            )
            .with_metadata("pattern", error.pattern),
        }
    }
}

/// Boundary contract for rendering a record into one output line.
///
/// Implementations are pure: the same record and layout always produce the
/// same bytes, terminated by a newline. Closures with the matching signature
/// are formatters too.
pub trait Formatter: Send + Sync {
    /// Render `record` using `layout` for the timestamp.
    fn format(&self, record: &LogRecord, layout: &DateLayout) -> Result<Vec<u8>, FormatError>;
}

impl<F> Formatter for F
where
    F: Fn(&LogRecord, &DateLayout) -> Result<Vec<u8>, FormatError> + Send + Sync,
{
    fn format(&self, record: &LogRecord, layout: &DateLayout) -> Result<Vec<u8>, FormatError> {
        self(record, layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use logwire_domain::Level;

    #[test]
    fn closures_are_formatters() -> Result<(), FormatError> {
        let formatter = |record: &LogRecord, _: &DateLayout| -> Result<Vec<u8>, FormatError> {
            Ok(format!("{}\n", record.message).into_bytes())
        };
        let record = LogRecord::new(Level::INFO, "hi", Vec::new(), DateTime::default());

        assert_eq!(formatter.format(&record, &DateLayout::Omit)?, b"hi\n");
        Ok(())
    }

    #[test]
    fn format_errors_map_into_error_envelopes() {
        let envelope: ErrorEnvelope = FormatError::NonFiniteFloat {
            key: "ratio".to_string(),
        }
        .into();
        assert_eq!(envelope.code.namespace(), "format");
        assert_eq!(envelope.code.code(), "non_finite_float");
        assert_eq!(envelope.metadata.get("key"), Some(&"ratio".to_string()));
    }
}
