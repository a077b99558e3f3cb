//! Message model for the wireline HTTP/1.x parser.
//!
//! This crate provides the types that outlive a parse:
//!
//! - [`Method`], [`HttpVersion`], [`StatusCode`]
//! - [`HeaderMap`] — ordered, case-insensitive multi-map of header fields
//! - [`Message`] and its start-line forms
//! - [`ParseError`] — failures as values, with code, state, and position
//! - [`ParserConfig`] — limits and switches for the streaming parser
//!
//! The byte-level work (tokenizers, header-block parsing, the streaming
//! state machine, message writers) lives in `wireline-http`.

#![forbid(unsafe_code)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::uninlined_format_args)]

mod config;
mod error;
mod headers;
mod message;
mod method;
mod status;

pub use config::{
    DEFAULT_MAX_BODY_SIZE, DEFAULT_MAX_CHUNKS, DEFAULT_MAX_HEADERS,
    DEFAULT_MAX_HEADER_LINE_LENGTH, ParserConfig,
};
pub use error::{ErrorCode, ParseError, ParserState};
pub use headers::HeaderMap;
pub use message::{BodyFraming, Message, MessageKind, RequestLine, StartLine, StatusLine};
pub use method::{HttpVersion, Method};
pub use status::StatusCode;
