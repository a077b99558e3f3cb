//! Streaming message parser.
//!
//! [`StreamingParser`] owns a read buffer and a resumable state machine.
//! Feed it arbitrary byte fragments with [`parse`][StreamingParser::parse];
//! it emits every message whose bytes are fully present, holds partial
//! input across calls without losing or reinterpreting bytes, and handles
//! pipelined messages in order.
//!
//! Validation failures are fatal: the parser moves to
//! [`ParserState::Error`], keeps the failure in
//! [`last_error`][StreamingParser::last_error], and consumes nothing more
//! until [`reset`][StreamingParser::reset]. Partial input is never an
//! error.

use std::borrow::Cow;

use tracing::{debug, trace};
use wireline_core::{
    BodyFraming, ErrorCode, HeaderMap, Message, ParseError, ParserConfig, ParserState, StartLine,
};

use crate::connection::ConnectionInfo;
use crate::header_block;
use crate::start_line::{self, Tokenized};
use crate::validate;

// Upper bounds for a start-line that has not seen its CRLF yet. Past
// these, no suffix can make the line valid, so the buffer must not grow.
const MAX_REQUEST_LINE: usize =
    validate::MAX_METHOD_LENGTH + 1 + validate::MAX_TARGET_LENGTH + 1 + 8 + 2;
const MAX_STATUS_LINE: usize = 8 + 1 + 3 + 1 + validate::MAX_HEADER_VALUE_LENGTH + 2;

enum StepOutcome {
    Continue,
    NeedMore,
    Emit(Message),
}

/// Incremental HTTP/1.x message parser.
///
/// One parser serves one connection. Between messages the per-message
/// state auto-resets while the buffer retains any bytes belonging to the
/// next pipelined message.
///
/// # Example
///
/// ```
/// use wireline_http::StreamingParser;
///
/// let mut parser = StreamingParser::new();
/// let messages = parser.parse(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n");
/// assert_eq!(messages.len(), 1);
/// assert_eq!(messages[0].request_line().unwrap().target, "/");
/// ```
pub struct StreamingParser {
    config: ParserConfig,
    state: ParserState,
    buffer: Vec<u8>,
    offset: usize,
    start: Option<StartLine>,
    headers: HeaderMap,
    body: Vec<u8>,
    framing: BodyFraming,
    content_length: Option<usize>,
    chunk_size: usize,
    chunk_bytes_read: usize,
    chunk_count: usize,
    keep_alive: bool,
    last_error: Option<ParseError>,
}

impl StreamingParser {
    /// Create a parser with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Create a parser with the given configuration.
    #[must_use]
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            state: ParserState::Idle,
            buffer: Vec::new(),
            offset: 0,
            start: None,
            headers: HeaderMap::new(),
            body: Vec::new(),
            framing: BodyFraming::Identity,
            content_length: None,
            chunk_size: 0,
            chunk_bytes_read: 0,
            chunk_count: 0,
            keep_alive: true,
            last_error: None,
        }
    }

    /// Append bytes and emit every message they complete, in order.
    ///
    /// Returns the messages whose final byte arrived in (or before) this
    /// call. On a validation failure the parser transitions to
    /// [`ParserState::Error`] and returns whatever was already emitted;
    /// in the error state further calls consume nothing.
    pub fn parse(&mut self, bytes: &[u8]) -> Vec<Message> {
        if self.state == ParserState::Error {
            return Vec::new();
        }

        self.compact();
        if !bytes.is_empty() {
            self.buffer.extend_from_slice(bytes);
        }

        let mut messages = Vec::new();
        loop {
            match self.step() {
                Ok(StepOutcome::Continue) => {}
                Ok(StepOutcome::NeedMore) => break,
                Ok(StepOutcome::Emit(message)) => {
                    debug!(
                        kind = ?message.kind(),
                        body_len = message.body().len(),
                        keep_alive = message.keep_alive(),
                        "message complete"
                    );
                    messages.push(message);
                    self.compact();
                    self.reset_message_fields();
                }
                Err(error) => {
                    debug!(code = %error.code(), state = %error.state(), "parse failed");
                    self.last_error = Some(error);
                    self.set_state(ParserState::Error);
                    break;
                }
            }
        }
        messages
    }

    /// Current parser state.
    #[must_use]
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// The error that moved the parser to [`ParserState::Error`], if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&ParseError> {
        self.last_error.as_ref()
    }

    /// Number of buffered bytes not yet consumed.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// The configuration this parser runs with.
    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Discard all buffered bytes and per-message state and return to
    /// [`ParserState::Idle`]. The only way out of the error state.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.offset = 0;
        self.last_error = None;
        self.reset_message_fields();
        self.state = ParserState::Idle;
    }

    fn step(&mut self) -> Result<StepOutcome, ParseError> {
        match self.state {
            ParserState::Idle => self.step_idle(),
            ParserState::RequestLine => self.step_request_line(),
            ParserState::StatusLine => self.step_status_line(),
            ParserState::Headers => self.step_headers(),
            ParserState::BodyContentLength => self.step_body_content_length(),
            ParserState::BodyChunkedSize => self.step_chunk_size(),
            ParserState::BodyChunkedData => self.step_chunk_data(),
            ParserState::BodyChunkedTrailer => self.step_chunk_trailer(),
            ParserState::Complete => {
                self.set_state(ParserState::Idle);
                Ok(StepOutcome::Continue)
            }
            // Unreachable: the dispatch loop stops before stepping here.
            ParserState::Error => Ok(StepOutcome::NeedMore),
        }
    }

    // Four bytes decide the direction: responses always open with "HTTP".
    fn step_idle(&mut self) -> Result<StepOutcome, ParseError> {
        let view = &self.buffer[self.offset..];
        if view.len() < 4 {
            return Ok(StepOutcome::NeedMore);
        }
        if &view[..4] == b"HTTP" {
            self.set_state(ParserState::StatusLine);
        } else {
            self.set_state(ParserState::RequestLine);
        }
        Ok(StepOutcome::Continue)
    }

    fn step_request_line(&mut self) -> Result<StepOutcome, ParseError> {
        let view = &self.buffer[self.offset..];
        if find_crlf(view).is_none() {
            if view.len() > MAX_REQUEST_LINE {
                return Err(ParseError::new(
                    ErrorCode::InvalidTarget,
                    "request line exceeds maximum length",
                    ParserState::RequestLine,
                )
                .with_position(self.offset));
            }
            return Ok(StepOutcome::NeedMore);
        }

        match start_line::parse_request_line(view) {
            Ok(Tokenized::Complete { value, consumed }) => {
                self.offset += consumed;
                self.start = Some(StartLine::Request(value));
                self.set_state(ParserState::Headers);
                Ok(StepOutcome::Continue)
            }
            Ok(Tokenized::Partial) => Ok(StepOutcome::NeedMore),
            Err(error) => Err(error.with_position(self.offset)),
        }
    }

    fn step_status_line(&mut self) -> Result<StepOutcome, ParseError> {
        let view = &self.buffer[self.offset..];
        if find_crlf(view).is_none() {
            if view.len() > MAX_STATUS_LINE {
                return Err(ParseError::new(
                    ErrorCode::Unknown,
                    "status line exceeds maximum length",
                    ParserState::StatusLine,
                )
                .with_position(self.offset));
            }
            return Ok(StepOutcome::NeedMore);
        }

        match start_line::parse_status_line(view) {
            Ok(Tokenized::Complete { value, consumed }) => {
                self.offset += consumed;
                self.start = Some(StartLine::Status(value));
                self.set_state(ParserState::Headers);
                Ok(StepOutcome::Continue)
            }
            Ok(Tokenized::Partial) => Ok(StepOutcome::NeedMore),
            Err(error) => Err(error.with_position(self.offset)),
        }
    }

    fn step_headers(&mut self) -> Result<StepOutcome, ParseError> {
        let view = &self.buffer[self.offset..];
        let (block_len, consumed) = if view.starts_with(b"\r\n") {
            // No header fields at all.
            (0, 2)
        } else if let Some(pos) = view.windows(4).position(|w| w == b"\r\n\r\n") {
            (pos + 2, pos + 4)
        } else {
            return self.pending_headers();
        };

        let headers = header_block::parse_header_block(&view[..block_len], &self.config)?;
        self.offset += consumed;
        self.finish_headers(headers)
    }

    /// Bound memory while the block terminator is still outstanding: any
    /// complete line already over the length limit, or more complete
    /// lines than the header cap, can never become a valid block.
    fn pending_headers(&self) -> Result<StepOutcome, ParseError> {
        let mut remaining = &self.buffer[self.offset..];
        let mut complete_lines = 0usize;
        loop {
            match find_crlf(remaining) {
                Some(pos) => {
                    if pos > self.config.max_header_line_length {
                        return Err(ParseError::new(
                            ErrorCode::HeaderValueTooLong,
                            "header line exceeds length limit",
                            ParserState::Headers,
                        ));
                    }
                    complete_lines += 1;
                    if complete_lines > self.config.max_headers {
                        return Err(ParseError::new(
                            ErrorCode::TooManyHeaders,
                            "header count exceeds limit",
                            ParserState::Headers,
                        ));
                    }
                    remaining = &remaining[pos + 2..];
                }
                None => {
                    if remaining.len() > self.config.max_header_line_length {
                        return Err(ParseError::new(
                            ErrorCode::HeaderValueTooLong,
                            "header line exceeds length limit",
                            ParserState::Headers,
                        ));
                    }
                    return Ok(StepOutcome::NeedMore);
                }
            }
        }
    }

    fn finish_headers(&mut self, headers: HeaderMap) -> Result<StepOutcome, ParseError> {
        let version = match &self.start {
            Some(start) => start.version(),
            None => {
                return Err(ParseError::new(
                    ErrorCode::Unknown,
                    "headers completed without a start line",
                    ParserState::Headers,
                ));
            }
        };

        let connection = ConnectionInfo::parse_optional(headers.get("connection").as_deref());
        self.keep_alive = connection.should_keep_alive(version);

        let chunked = headers
            .get("transfer-encoding")
            .is_some_and(|value| value.to_ascii_lowercase().contains("chunked"));
        let content_length_raw = headers.get("content-length").map(Cow::into_owned);
        self.headers = headers;

        if chunked {
            // Chunked wins; any Content-Length is ignored (RFC 7230 §3.3.3).
            self.framing = BodyFraming::Chunked;
            self.content_length = None;
            self.set_state(ParserState::BodyChunkedSize);
            return Ok(StepOutcome::Continue);
        }

        if let Some(raw) = content_length_raw {
            let Some(length) = validate::parse_content_length(&raw) else {
                return Err(ParseError::new(
                    ErrorCode::InvalidContentLength,
                    "malformed Content-Length",
                    ParserState::Headers,
                )
                .with_detail(raw));
            };
            if length > self.config.max_body_size {
                return Err(ParseError::new(
                    ErrorCode::BodyTooLarge,
                    format!(
                        "declared body of {length} bytes exceeds limit of {}",
                        self.config.max_body_size
                    ),
                    ParserState::Headers,
                ));
            }
            self.framing = BodyFraming::ContentLength;
            self.content_length = Some(length);
            if length == 0 {
                return self.emit();
            }
            self.set_state(ParserState::BodyContentLength);
            return Ok(StepOutcome::Continue);
        }

        self.framing = BodyFraming::Identity;
        self.content_length = None;
        self.emit()
    }

    fn step_body_content_length(&mut self) -> Result<StepOutcome, ParseError> {
        let target = self.content_length.unwrap_or(0);
        let needed = target.saturating_sub(self.body.len());
        let available = self.buffer.len() - self.offset;
        let take = needed.min(available);
        if take > 0 {
            self.body
                .extend_from_slice(&self.buffer[self.offset..self.offset + take]);
            self.offset += take;
        }
        if self.body.len() == target {
            return self.emit();
        }
        Ok(StepOutcome::NeedMore)
    }

    fn step_chunk_size(&mut self) -> Result<StepOutcome, ParseError> {
        let view = &self.buffer[self.offset..];
        let Some(pos) = find_crlf(view) else {
            if view.len() > self.config.max_header_line_length {
                return Err(ParseError::new(
                    ErrorCode::InvalidChunkSize,
                    "chunk size line exceeds length limit",
                    ParserState::BodyChunkedSize,
                ));
            }
            return Ok(StepOutcome::NeedMore);
        };
        if pos > self.config.max_header_line_length {
            return Err(ParseError::new(
                ErrorCode::InvalidChunkSize,
                "chunk size line exceeds length limit",
                ParserState::BodyChunkedSize,
            ));
        }

        let line = &view[..pos];
        let Some(size) = validate::parse_chunk_size(line, self.config.max_body_size) else {
            return Err(ParseError::new(
                ErrorCode::InvalidChunkSize,
                "chunk size is not valid hexadecimal or exceeds the cap",
                ParserState::BodyChunkedSize,
            )
            .with_position(self.offset)
            .with_detail(String::from_utf8_lossy(line).into_owned()));
        };

        self.chunk_count += 1;
        if self.chunk_count > self.config.max_chunks {
            return Err(ParseError::new(
                ErrorCode::InvalidChunkSize,
                "chunk count exceeds limit",
                ParserState::BodyChunkedSize,
            ));
        }
        if self.body.len() + size > self.config.max_body_size {
            return Err(ParseError::new(
                ErrorCode::BodyTooLarge,
                format!(
                    "chunked body exceeds limit of {} bytes",
                    self.config.max_body_size
                ),
                ParserState::BodyChunkedSize,
            ));
        }

        self.offset += pos + 2;
        if size == 0 {
            self.set_state(ParserState::BodyChunkedTrailer);
        } else {
            self.chunk_size = size;
            self.chunk_bytes_read = 0;
            self.set_state(ParserState::BodyChunkedData);
        }
        Ok(StepOutcome::Continue)
    }

    fn step_chunk_data(&mut self) -> Result<StepOutcome, ParseError> {
        let needed = self.chunk_size.saturating_sub(self.chunk_bytes_read);
        if needed > 0 {
            let available = self.buffer.len() - self.offset;
            let take = needed.min(available);
            if take == 0 {
                return Ok(StepOutcome::NeedMore);
            }
            self.body
                .extend_from_slice(&self.buffer[self.offset..self.offset + take]);
            self.offset += take;
            self.chunk_bytes_read += take;
            if self.chunk_bytes_read < self.chunk_size {
                return Ok(StepOutcome::NeedMore);
            }
        }

        // The chunk data is in; the mandatory CRLF follows.
        let view = &self.buffer[self.offset..];
        if view.len() < 2 {
            return Ok(StepOutcome::NeedMore);
        }
        if &view[..2] != b"\r\n" {
            return Err(ParseError::new(
                ErrorCode::IncompleteChunk,
                "chunk data not terminated by CRLF",
                ParserState::BodyChunkedData,
            )
            .with_position(self.offset));
        }
        self.offset += 2;
        self.set_state(ParserState::BodyChunkedSize);
        Ok(StepOutcome::Continue)
    }

    // Trailer fields are consumed and discarded, one line per step.
    fn step_chunk_trailer(&mut self) -> Result<StepOutcome, ParseError> {
        let view = &self.buffer[self.offset..];
        if view.starts_with(b"\r\n") {
            self.offset += 2;
            return self.emit();
        }
        match find_crlf(view) {
            Some(pos) => {
                if pos > self.config.max_header_line_length {
                    return Err(ParseError::new(
                        ErrorCode::InvalidChunkTrailer,
                        "trailer line exceeds length limit",
                        ParserState::BodyChunkedTrailer,
                    ));
                }
                self.offset += pos + 2;
                Ok(StepOutcome::Continue)
            }
            None => {
                if view.len() > self.config.max_header_line_length {
                    return Err(ParseError::new(
                        ErrorCode::InvalidChunkTrailer,
                        "trailer line exceeds length limit",
                        ParserState::BodyChunkedTrailer,
                    ));
                }
                Ok(StepOutcome::NeedMore)
            }
        }
    }

    fn emit(&mut self) -> Result<StepOutcome, ParseError> {
        let Some(start) = self.start.take() else {
            return Err(ParseError::new(
                ErrorCode::Unknown,
                "message emitted without a start line",
                self.state,
            ));
        };
        let message = Message::new(
            start,
            std::mem::take(&mut self.headers),
            std::mem::take(&mut self.body),
            self.keep_alive,
            self.framing,
            self.content_length,
        );
        self.set_state(ParserState::Complete);
        Ok(StepOutcome::Emit(message))
    }

    fn reset_message_fields(&mut self) {
        self.start = None;
        self.headers = HeaderMap::new();
        self.body = Vec::new();
        self.framing = BodyFraming::Identity;
        self.content_length = None;
        self.chunk_size = 0;
        self.chunk_bytes_read = 0;
        self.chunk_count = 0;
        self.keep_alive = true;
    }

    fn compact(&mut self) {
        if self.offset > 0 {
            self.buffer.drain(..self.offset);
            self.offset = 0;
        }
    }

    fn set_state(&mut self, next: ParserState) {
        if self.state != next {
            trace!(from = %self.state, to = %next, "parser state");
            self.state = next;
        }
    }
}

impl Default for StreamingParser {
    fn default() -> Self {
        Self::new()
    }
}

fn find_crlf(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|w| w == b"\r\n")
}
