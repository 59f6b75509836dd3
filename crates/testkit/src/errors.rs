//! Test fixtures for shared error codes and envelopes.

use logwire_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::io;

/// Return a list of common error codes used in tests.
pub fn common_error_codes() -> Vec<ErrorCode> {
    vec![
        ErrorCode::invalid_input(),
        ErrorCode::serialization(),
        ErrorCode::io(),
        ErrorCode::internal(),
    ]
}

/// An invalid input error fixture.
pub fn invalid_input_error() -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::invalid_input(), "invalid input")
}

/// A retriable I/O error fixture.
pub fn broken_pipe_error() -> ErrorEnvelope {
    ErrorEnvelope::unexpected(ErrorCode::io(), "broken pipe", ErrorClass::Retriable)
}

/// The error every [`crate::FailingSink`] returns.
pub fn sink_closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "sink closed")
}
