//! Parse errors as values.
//!
//! Every failure carries a machine-readable code, a human-readable
//! message, the parser state it arose in, and optionally the buffer
//! position and extra detail. Errors serialize to JSON for structured
//! diagnostics.

use std::fmt;

/// State of the streaming parser.
///
/// Carried by [`ParseError`] so a caller can tell which phase of the
/// message rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParserState {
    /// Waiting for enough bytes to tell a request from a response.
    Idle,
    /// Reading the request line.
    RequestLine,
    /// Reading the status line.
    StatusLine,
    /// Reading the header block.
    Headers,
    /// Reading a body framed by `Content-Length`.
    BodyContentLength,
    /// Reading a chunk-size line.
    BodyChunkedSize,
    /// Reading chunk data.
    BodyChunkedData,
    /// Reading the chunked trailer section.
    BodyChunkedTrailer,
    /// A message was just completed.
    Complete,
    /// A fatal error occurred; terminal until reset.
    Error,
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "IDLE",
            Self::RequestLine => "REQUEST_LINE",
            Self::StatusLine => "STATUS_LINE",
            Self::Headers => "HEADERS",
            Self::BodyContentLength => "BODY_CONTENT_LENGTH",
            Self::BodyChunkedSize => "BODY_CHUNKED_SIZE",
            Self::BodyChunkedData => "BODY_CHUNKED_DATA",
            Self::BodyChunkedTrailer => "BODY_CHUNKED_TRAILER",
            Self::Complete => "COMPLETE",
            Self::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// Machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed or oversized request method.
    InvalidMethod,
    /// Version is not `HTTP/1.0` or `HTTP/1.1`.
    InvalidVersion,
    /// Malformed request target.
    InvalidTarget,
    /// Status code outside `[100, 999]` or not numeric.
    InvalidStatusCode,
    /// Malformed header line.
    InvalidHeader,
    /// Header name exceeds the fixed bound.
    HeaderNameTooLong,
    /// Header value exceeds the fixed bound.
    HeaderValueTooLong,
    /// Header count exceeds the configured limit.
    TooManyHeaders,
    /// `Content-Length` is not a plain non-negative decimal.
    InvalidContentLength,
    /// Accumulated body exceeds the configured limit.
    BodyTooLarge,
    /// Chunk-size line is malformed, over the cap, or past the chunk budget.
    InvalidChunkSize,
    /// Chunk data was not followed by CRLF.
    IncompleteChunk,
    /// Malformed chunked trailer section.
    InvalidChunkTrailer,
    /// Inactivity timeout (reported by the caller, never raised in-core).
    Timeout,
    /// Connection closed mid-message (reported by the caller).
    ConnectionClosed,
    /// Any failure not covered above.
    Unknown,
}

impl ErrorCode {
    /// The canonical code name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidMethod => "INVALID_METHOD",
            Self::InvalidVersion => "INVALID_VERSION",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::InvalidStatusCode => "INVALID_STATUS_CODE",
            Self::InvalidHeader => "INVALID_HEADER",
            Self::HeaderNameTooLong => "HEADER_NAME_TOO_LONG",
            Self::HeaderValueTooLong => "HEADER_VALUE_TOO_LONG",
            Self::TooManyHeaders => "TOO_MANY_HEADERS",
            Self::InvalidContentLength => "INVALID_CONTENT_LENGTH",
            Self::BodyTooLarge => "BODY_TOO_LARGE",
            Self::InvalidChunkSize => "INVALID_CHUNK_SIZE",
            Self::IncompleteChunk => "INCOMPLETE_CHUNK",
            Self::InvalidChunkTrailer => "INVALID_CHUNK_TRAILER",
            Self::Timeout => "TIMEOUT",
            Self::ConnectionClosed => "CONNECTION_CLOSED",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fatal parse failure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ParseError {
    code: ErrorCode,
    message: String,
    state: ParserState,
    #[serde(skip_serializing_if = "Option::is_none")]
    position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ParseError {
    /// Create an error with code, message, and originating state.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>, state: ParserState) -> Self {
        Self {
            code,
            message: message.into(),
            state,
            position: None,
            detail: None,
        }
    }

    /// Attach the buffer offset at which the failure was detected.
    #[must_use]
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Attach extra free-form detail.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Re-tag the error with the state it surfaced in.
    #[must_use]
    pub fn in_state(mut self, state: ParserState) -> Self {
        self.state = state;
        self
    }

    /// The failure category.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// The human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The parser state in which the failure arose.
    #[must_use]
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// The buffer position, when known.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Extra detail, when present.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (in {})", self.code, self.message, self.state)?;
        if let Some(position) = self.position {
            write!(f, " at byte {position}")?;
        }
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
